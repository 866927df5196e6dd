//! Expression types in the Monkey language AST.
//!
//! Expressions represent values and computations that evaluate to a value.
//! Each variant wraps a specific expression type.

use crate::ast::Node;
use crate::ast::statement::BlockStatement;
use crate::lexer::token::Token;
use std::fmt::{Display, Formatter, Result};

/// Enum representing all expression types in the AST.
#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    StringLiteral(StringLiteral),
    BooleanLiteral(BooleanLiteral),
    PrefixExpression(PrefixExpression),
    InfixExpression(InfixExpression),
    IfExpression(IfExpression),
    FunctionLiteral(FunctionLiteral),
    CallExpression(CallExpression),
    ArrayLiteral(ArrayLiteral),
    IndexExpression(IndexExpression),
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(ident) => ident.token_literal(),
            Expression::IntegerLiteral(int_lit) => int_lit.token_literal(),
            Expression::StringLiteral(str_lit) => str_lit.token_literal(),
            Expression::BooleanLiteral(bool_lit) => bool_lit.token_literal(),
            Expression::PrefixExpression(prefix) => prefix.token_literal(),
            Expression::InfixExpression(infix) => infix.token_literal(),
            Expression::IfExpression(if_expr) => if_expr.token_literal(),
            Expression::FunctionLiteral(func_lit) => func_lit.token_literal(),
            Expression::CallExpression(call) => call.token_literal(),
            Expression::ArrayLiteral(array) => array.token_literal(),
            Expression::IndexExpression(index) => index.token_literal(),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::IntegerLiteral(int_lit) => write!(f, "{}", int_lit),
            Expression::StringLiteral(str_lit) => write!(f, "{}", str_lit),
            Expression::BooleanLiteral(bool_lit) => write!(f, "{}", bool_lit),
            Expression::PrefixExpression(prefix) => write!(f, "{}", prefix),
            Expression::InfixExpression(infix) => write!(f, "{}", infix),
            Expression::IfExpression(if_expr) => write!(f, "{}", if_expr),
            Expression::FunctionLiteral(func_lit) => write!(f, "{}", func_lit),
            Expression::CallExpression(call) => write!(f, "{}", call),
            Expression::ArrayLiteral(array) => write!(f, "{}", array),
            Expression::IndexExpression(index) => write!(f, "{}", index),
        }
    }
}

/// Represents a name bound in the environment, e.g. `foobar`, `x`.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Node for Identifier {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

/// Represents an integer literal expression, e.g. `42`.
///
/// Stores both the token (for position information) and the parsed
/// 64-bit signed value.
#[derive(Debug, Clone)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl Node for IntegerLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a string literal expression, e.g. `"hello"`. The value is
/// the unescaped body without the surrounding quotes.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl Node for StringLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl Node for BooleanLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a prefix expression: a prefix operator (`!` or `-`)
/// followed by an expression, e.g. `!true`, `-5`.
#[derive(Debug, Clone)]
pub struct PrefixExpression {
    /// The token representing the prefix operator (e.g., BANG, MINUS)
    pub token: Token,
    /// The string representation of the operator (e.g., "!", "-")
    pub operator: String,
    /// The expression that the operator is applied to
    pub right: Box<Expression>,
}

impl Node for PrefixExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for PrefixExpression {
    /// Formats the prefix expression as `(operator right)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Represents an infix expression: a left expression, an infix operator
/// (`+`, `-`, `*`, `/`, `==`, `!=`, `<`, `>`), and a right expression,
/// e.g. `5 + 3`, `x == y`.
#[derive(Debug, Clone)]
pub struct InfixExpression {
    /// The token representing the infix operator (e.g., PLUS, MINUS, EQ, NOTEQ)
    pub token: Token,
    /// The left-hand side expression
    pub left: Box<Expression>,
    /// The string representation of the operator (e.g., "+", "-", "==", "!=")
    pub operator: String,
    /// The right-hand side expression
    pub right: Box<Expression>,
}

impl Node for InfixExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for InfixExpression {
    /// Formats the infix expression as `(left operator right)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

/// Represents an if expression with an optional else branch:
/// `if (<condition>) { <consequence> } else { <alternative> }`.
#[derive(Debug, Clone)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

impl Node for IfExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IfExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "if{} {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }
        Ok(())
    }
}

/// Represents a function literal: `fn(<parameters>) { <body> }`. The
/// parameters are plain identifiers; the body is a block statement.
#[derive(Debug, Clone)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl Node for FunctionLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for FunctionLiteral {
    /// Formats the function literal as `fn(p1, p2) body`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let params = self
            .parameters
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({}) {}", self.token_literal(), params, self.body)
    }
}

/// Represents a call expression: any expression in callee position
/// followed by a parenthesized argument list, e.g. `add(2, 3)`.
#[derive(Debug, Clone)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl Node for CallExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for CallExpression {
    /// Formats the call expression as `callee(a1, a2)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let arguments = self
            .arguments
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.function, arguments)
    }
}

/// Represents an array literal, e.g. `[1, 2 * 2, fn(x) { x }]`.
#[derive(Debug, Clone)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

impl Node for ArrayLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for ArrayLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let elements = self
            .elements
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}]", elements)
    }
}

/// Represents an index expression: `left[index]`, e.g. `myArray[1 + 1]`.
#[derive(Debug, Clone)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl Node for IndexExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IndexExpression {
    /// Formats the index expression as `(left[index])`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

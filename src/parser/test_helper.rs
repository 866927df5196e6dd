//! Helper functions for testing the parser.
//!
//! These assertions are shared between the integration tests under
//! `tests/` so every test reports failures in the same shape.

use crate::Parser;
use crate::ast::{
    Node,
    expression::Expression,
    statement::{Statement, BlockStatement},
};

/// Expected value of a literal expression in table-driven tests.
#[derive(Debug, Clone, Copy)]
pub enum Expected<'a> {
    Int(i64),
    Ident(&'a str),
    Bool(bool),
}

/// Panics with the collected parser errors if any were recorded.
#[track_caller]
pub fn check_parser_errors(p: &Parser) {
    if p.errors.is_empty() {
        return;
    }
    let mut message = format!("parser has {} errors", p.errors.len());
    for error in &p.errors {
        message.push_str(&format!("\nparser error: {}", error));
    }
    panic!("{}", message);
}

/// Validates that a statement is a `LetStatement` binding the expected name.
#[track_caller]
pub fn test_let_statement(s: &Statement, name: &str) -> bool {
    if s.token_literal() != "let" {
        panic!("s.token_literal not 'let'. got={}", s.token_literal());
    }

    let let_stmt = match s {
        Statement::Let(let_stmt) => let_stmt,
        _ => panic!("s not LetStatement. got={:?}", s),
    };

    if let_stmt.name.value != name {
        panic!(
            "let_stmt.name.value not '{}'. got={}",
            name, let_stmt.name.value
        );
    }

    if let_stmt.name.token_literal() != name {
        panic!(
            "let_stmt.name.token_literal() not '{}'. got={}",
            name,
            let_stmt.name.token_literal()
        );
    }

    true
}

/// Validates that a statement is a `ReturnStatement`.
#[track_caller]
pub fn is_return_statement(s: &Statement) -> bool {
    let return_stmt = match s {
        Statement::Return(return_stmt) => return_stmt,
        _ => panic!("s not ReturnStatement. got={:?}", s),
    };

    if return_stmt.token_literal() != "return" {
        panic!(
            "return_stmt.token_literal not 'return'. got={}",
            return_stmt.token_literal()
        );
    }

    true
}

/// Extracts the single expression statement of a one-statement program.
#[track_caller]
pub fn single_expression(program: &crate::ast::Program) -> &Expression {
    assert_eq!(
        program.statements.len(),
        1,
        "program.statements does not contain 1 statement. got={}",
        program.statements.len()
    );
    match &program.statements[0] {
        Statement::Expression(expr_stmt) => &expr_stmt.value,
        stmt => panic!("statement is not an ExpressionStatement. got={:?}", stmt),
    }
}

/// Extracts the single expression statement of a block.
#[track_caller]
pub fn single_block_expression(block: &BlockStatement) -> &Expression {
    assert_eq!(
        block.statements.len(),
        1,
        "block does not contain 1 statement. got={}",
        block.statements.len()
    );
    match &block.statements[0] {
        Statement::Expression(expr_stmt) => &expr_stmt.value,
        stmt => panic!("block statement is not an ExpressionStatement. got={:?}", stmt),
    }
}

/// Validates an integer literal expression against the expected value.
#[track_caller]
pub fn test_integer_literal(exp: &Expression, value: i64) -> bool {
    let int_lit = match exp {
        Expression::IntegerLiteral(il) => il,
        _ => panic!("exp not IntegerLiteral. got={:?}", exp),
    };

    if int_lit.value != value {
        panic!("int_lit.value not {}. got={}", value, int_lit.value);
    }

    let expected_token_literal = value.to_string();
    if int_lit.token_literal() != expected_token_literal {
        panic!(
            "int_lit.token_literal not {}. got='{}'",
            value,
            int_lit.token_literal()
        );
    }

    true
}

/// Validates an identifier expression against the expected name.
#[track_caller]
pub fn test_identifier(exp: &Expression, value: &str) -> bool {
    let ident = match exp {
        Expression::Identifier(ident) => ident,
        _ => panic!("exp not Identifier. got={:?}", exp),
    };

    if ident.value != value {
        panic!("ident.value not '{}'. got={}", value, ident.value);
    }

    if ident.token_literal() != value {
        panic!(
            "ident.token_literal not '{}'. got={}",
            value,
            ident.token_literal()
        );
    }

    true
}

/// Validates a boolean literal expression against the expected value.
#[track_caller]
pub fn test_boolean_literal(exp: &Expression, value: bool) -> bool {
    let bool_lit = match exp {
        Expression::BooleanLiteral(bl) => bl,
        _ => panic!("exp not BooleanLiteral. got={:?}", exp),
    };

    if bool_lit.value != value {
        panic!("bool_lit.value not {}. got={}", value, bool_lit.value);
    }

    if bool_lit.token_literal() != value.to_string() {
        panic!(
            "bool_lit.token_literal not {}. got={}",
            value,
            bool_lit.token_literal()
        );
    }

    true
}

/// Validates a literal expression against any expected literal kind.
#[track_caller]
pub fn test_literal_expression(exp: &Expression, expected: Expected) -> bool {
    match expected {
        Expected::Int(value) => test_integer_literal(exp, value),
        Expected::Ident(value) => test_identifier(exp, value),
        Expected::Bool(value) => test_boolean_literal(exp, value),
    }
}

/// Validates an infix expression's operands and operator.
#[track_caller]
pub fn test_infix_expression(
    exp: &Expression,
    left: Expected,
    operator: &str,
    right: Expected,
) -> bool {
    let infix = match exp {
        Expression::InfixExpression(infix) => infix,
        _ => panic!("exp not InfixExpression. got={:?}", exp),
    };

    test_literal_expression(&infix.left, left);

    if infix.operator != operator {
        panic!("infix.operator is not '{}'. got={}", operator, infix.operator);
    }

    test_literal_expression(&infix.right, right);

    true
}

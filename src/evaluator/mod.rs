//! Tree-walking evaluator for the Monkey language.
//!
//! `eval_program` walks the AST produced by the parser against an
//! environment chain and reduces it to a runtime `Object`. Two rules run
//! through every branch:
//!
//! - An `Error` object produced anywhere terminates evaluation of the
//!   current statement sequence and propagates upward unchanged.
//! - A `return` wraps its value in `Object::ReturnValue`, which rides up
//!   through nested blocks intact and is unwrapped at the program and
//!   function-call boundaries.

pub mod builtins;

use crate::ast::{
    Program,
    expression::{Expression, Identifier, IfExpression},
    statement::{BlockStatement, Statement},
};
use crate::object::{Function, Object, environment::Environment};
use std::cell::RefCell;
use std::rc::Rc;

/// Canonical singletons. Enum value equality makes comparisons against
/// these behave like identity checks.
pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// Evaluates a full program against the given environment.
///
/// Folds the statements left to right. A `ReturnValue` is unwrapped here
/// (it never escapes this boundary); an `Error` is returned as-is. The
/// result is `None` when the last statement produced no value (a let
/// statement).
pub fn eval_program(program: &Program, env: &Rc<RefCell<Environment>>) -> Option<Object> {
    log::trace!("evaluating program with {} statements", program.statements.len());
    let mut result = None;
    for statement in &program.statements {
        match eval_statement(statement, env) {
            Some(Object::ReturnValue(value)) => return Some(*value),
            Some(error @ Object::Error(_)) => return Some(error),
            other => result = other,
        }
    }
    result
}

/// Evaluates a single statement. Let statements bind a name and produce
/// no value; return statements wrap their value in `ReturnValue`.
fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> Option<Object> {
    match statement {
        Statement::Let(let_stmt) => {
            let value = eval_expression(&let_stmt.value, env);
            if is_error(&value) {
                return Some(value);
            }
            env.borrow_mut().set(&let_stmt.name.value, value);
            None
        }
        Statement::Return(return_stmt) => {
            let value = eval_expression(&return_stmt.value, env);
            if is_error(&value) {
                return Some(value);
            }
            Some(Object::ReturnValue(Box::new(value)))
        }
        Statement::Expression(expr_stmt) => Some(eval_expression(&expr_stmt.value, env)),
        Statement::Block(block) => eval_block_statement(block, env),
    }
}

/// Evaluates a block. Unlike `eval_program`, a `ReturnValue` is passed
/// through intact so the enclosing function-call boundary can unwrap it;
/// this is what lets a `return` inside nested blocks exit the whole
/// function.
fn eval_block_statement(
    block: &BlockStatement,
    env: &Rc<RefCell<Environment>>,
) -> Option<Object> {
    let mut result = None;
    for statement in &block.statements {
        let evaluated = eval_statement(statement, env);
        if let Some(object) = &evaluated {
            if matches!(object, Object::ReturnValue(_) | Object::Error(_)) {
                return evaluated;
            }
        }
        result = evaluated;
    }
    result
}

/// Evaluates an expression to a value. Every rule short-circuits on an
/// `Error` produced by a sub-evaluation.
fn eval_expression(expression: &Expression, env: &Rc<RefCell<Environment>>) -> Object {
    match expression {
        Expression::IntegerLiteral(int_lit) => Object::Integer(int_lit.value),
        Expression::StringLiteral(str_lit) => Object::String(str_lit.value.clone()),
        Expression::BooleanLiteral(bool_lit) => native_bool_to_boolean_object(bool_lit.value),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::PrefixExpression(prefix) => {
            let right = eval_expression(&prefix.right, env);
            if is_error(&right) {
                return right;
            }
            eval_prefix_expression(&prefix.operator, right)
        }
        Expression::InfixExpression(infix) => {
            let left = eval_expression(&infix.left, env);
            if is_error(&left) {
                return left;
            }
            let right = eval_expression(&infix.right, env);
            if is_error(&right) {
                return right;
            }
            eval_infix_expression(&infix.operator, left, right)
        }
        Expression::IfExpression(if_expr) => eval_if_expression(if_expr, env),
        Expression::FunctionLiteral(func_lit) => Object::Function(Function {
            parameters: func_lit.parameters.clone(),
            body: func_lit.body.clone(),
            env: Rc::clone(env),
        }),
        Expression::CallExpression(call) => {
            let function = eval_expression(&call.function, env);
            if is_error(&function) {
                return function;
            }
            let arguments = match eval_expressions(&call.arguments, env) {
                Ok(arguments) => arguments,
                Err(error) => return error,
            };
            apply_function(function, arguments)
        }
        Expression::ArrayLiteral(array) => {
            let elements = match eval_expressions(&array.elements, env) {
                Ok(elements) => elements,
                Err(error) => return error,
            };
            Object::Array(elements)
        }
        Expression::IndexExpression(index_expr) => {
            let left = eval_expression(&index_expr.left, env);
            if is_error(&left) {
                return left;
            }
            let index = eval_expression(&index_expr.index, env);
            if is_error(&index) {
                return index;
            }
            eval_index_expression(left, index)
        }
    }
}

/// Evaluates a sequence of expressions left to right, stopping at the
/// first error, which becomes the sole result.
fn eval_expressions(
    expressions: &[Expression],
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Object>, Object> {
    let mut result = Vec::with_capacity(expressions.len());
    for expression in expressions {
        let evaluated = eval_expression(expression, env);
        if is_error(&evaluated) {
            return Err(evaluated);
        }
        result.push(evaluated);
    }
    Ok(result)
}

/// Resolves an identifier through the environment chain, then the
/// built-in registry.
fn eval_identifier(ident: &Identifier, env: &Rc<RefCell<Environment>>) -> Object {
    if let Some(value) = env.borrow().get(&ident.value) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(&ident.value) {
        return builtin;
    }
    Object::Error(format!("identifier not found: {}", ident.value))
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => eval_bang_operator_expression(right),
        "-" => eval_minus_prefix_operator_expression(right),
        _ => Object::Error(format!("unknown operator: {}{}", operator, right.kind())),
    }
}

/// `!` negates truthiness: the two singleton falsy values map to TRUE,
/// everything else to FALSE.
fn eval_bang_operator_expression(right: Object) -> Object {
    match right {
        Object::Boolean(true) => FALSE,
        Object::Boolean(false) => TRUE,
        Object::Null => TRUE,
        _ => FALSE,
    }
}

/// `-` is defined on integers only.
fn eval_minus_prefix_operator_expression(right: Object) -> Object {
    match right {
        Object::Integer(value) => Object::Integer(-value),
        _ => Object::Error(format!("unknown operator: -{}", right.kind())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(operator, left, right)
        }
        (Object::String(left), Object::String(right)) => {
            eval_string_infix_expression(operator, left, right)
        }
        // Booleans are canonical, so == and != are identity comparisons
        (left @ Object::Boolean(_), right @ Object::Boolean(_)) => match operator {
            "==" => native_bool_to_boolean_object(left == right),
            "!=" => native_bool_to_boolean_object(left != right),
            _ => Object::Error(format!(
                "unknown operator: {} {} {}",
                left.kind(),
                operator,
                right.kind()
            )),
        },
        (left, right) if left.kind() != right.kind() => Object::Error(format!(
            "type mismatch: {} {} {}",
            left.kind(),
            operator,
            right.kind()
        )),
        (left, right) => Object::Error(format!(
            "unknown operator: {} {} {}",
            left.kind(),
            operator,
            right.kind()
        )),
    }
}

/// Integer arithmetic and comparisons. Division truncates toward zero;
/// division by zero is a host-level fault.
fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => Object::Integer(left / right),
        "<" => native_bool_to_boolean_object(left < right),
        ">" => native_bool_to_boolean_object(left > right),
        "==" => native_bool_to_boolean_object(left == right),
        "!=" => native_bool_to_boolean_object(left != right),
        _ => Object::Error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

/// `+` concatenates; no other string operator is defined.
fn eval_string_infix_expression(operator: &str, left: String, right: String) -> Object {
    if operator != "+" {
        return Object::Error(format!("unknown operator: STRING {} STRING", operator));
    }
    Object::String(left + &right)
}

/// Branch selection by truthiness. A falsy condition with no alternative
/// evaluates to the canonical NULL so downstream operators always see a
/// well-typed value.
fn eval_if_expression(if_expr: &IfExpression, env: &Rc<RefCell<Environment>>) -> Object {
    let condition = eval_expression(&if_expr.condition, env);
    if is_error(&condition) {
        return condition;
    }

    if is_truthy(&condition) {
        eval_block_statement(&if_expr.consequence, env).unwrap_or(NULL)
    } else if let Some(alternative) = &if_expr.alternative {
        eval_block_statement(alternative, env).unwrap_or(NULL)
    } else {
        NULL
    }
}

/// Indexing is defined for arrays by integers; out-of-range and negative
/// indices yield NULL.
fn eval_index_expression(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(index)) => {
            eval_array_index_expression(elements, index)
        }
        (left, _) => Object::Error(format!("index operator not supported: {}", left.kind())),
    }
}

fn eval_array_index_expression(elements: Vec<Object>, index: i64) -> Object {
    let max = elements.len() as i64 - 1;
    if index < 0 || index > max {
        return NULL;
    }
    elements[index as usize].clone()
}

/// Calls a function or built-in with already-evaluated arguments.
///
/// For a user function, a fresh environment enclosed by the function's
/// captured environment binds each parameter positionally; the body's
/// `ReturnValue` (if any) is stripped here so it never leaks into the
/// caller's block.
fn apply_function(function: Object, arguments: Vec<Object>) -> Object {
    match function {
        Object::Function(function) => {
            log::trace!("applying function with {} arguments", arguments.len());
            let extended_env = Rc::new(RefCell::new(extend_function_env(&function, arguments)));
            let evaluated = eval_block_statement(&function.body, &extended_env);
            unwrap_return_value(evaluated)
        }
        Object::Builtin(builtin) => builtin(arguments),
        other => Object::Error(format!("not a function: {}", other.kind())),
    }
}

fn extend_function_env(function: &Function, arguments: Vec<Object>) -> Environment {
    let mut env = Environment::new_enclosed(Rc::clone(&function.env));
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        env.set(&parameter.value, argument);
    }
    env
}

/// A body that produced no value evaluates to NULL at the call boundary.
fn unwrap_return_value(evaluated: Option<Object>) -> Object {
    match evaluated {
        Some(Object::ReturnValue(value)) => *value,
        Some(object) => object,
        None => NULL,
    }
}

fn native_bool_to_boolean_object(value: bool) -> Object {
    if value { TRUE } else { FALSE }
}

/// Exactly FALSE and NULL are falsy; zero and the empty string are truthy.
fn is_truthy(object: &Object) -> bool {
    !matches!(object, Object::Null | Object::Boolean(false))
}

fn is_error(object: &Object) -> bool {
    matches!(object, Object::Error(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn test_eval(input: &str) -> Option<Object> {
        let lexer = Lexer::new(input.to_string());
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        assert!(
            parser.errors.is_empty(),
            "parser errors for {:?}: {:?}",
            input,
            parser.errors
        );
        let env = Rc::new(RefCell::new(Environment::new()));
        eval_program(&program, &env)
    }

    #[track_caller]
    fn assert_integer(evaluated: Option<Object>, expected: i64) {
        match evaluated {
            Some(Object::Integer(value)) => assert_eq!(value, expected),
            other => panic!("object is not Integer. got={:?}", other),
        }
    }

    #[track_caller]
    fn assert_boolean(evaluated: Option<Object>, expected: bool) {
        match evaluated {
            Some(Object::Boolean(value)) => assert_eq!(value, expected),
            other => panic!("object is not Boolean. got={:?}", other),
        }
    }

    #[track_caller]
    fn assert_null(evaluated: Option<Object>) {
        match evaluated {
            Some(Object::Null) => {}
            other => panic!("object is not Null. got={:?}", other),
        }
    }

    #[test]
    fn test_eval_integer_expression() {
        let tests = vec![
            ("5", 5),
            ("10", 10),
            ("-5", -5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("3 * (3 * 3) + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
            // Division truncates toward zero
            ("7 / 2", 3),
            ("-7 / 2", -3),
        ];

        for (input, expected) in tests {
            assert_integer(test_eval(input), expected);
        }
    }

    #[test]
    fn test_eval_boolean_expression() {
        let tests = vec![
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 < 1", false),
            ("1 > 1", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 2", false),
            ("1 != 2", true),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("false != true", true),
            ("(1 < 2) == true", true),
            ("(1 < 2) == false", false),
            ("(1 > 2) == true", false),
            ("(1 > 2) == false", true),
        ];

        for (input, expected) in tests {
            assert_boolean(test_eval(input), expected);
        }
    }

    #[test]
    fn test_bang_operator() {
        let tests = vec![
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!!true", true),
            ("!!false", false),
            ("!!5", true),
            // Zero and the empty string are truthy
            ("!0", false),
            ("!\"\"", false),
        ];

        for (input, expected) in tests {
            assert_boolean(test_eval(input), expected);
        }
    }

    #[test]
    fn test_if_else_expressions() {
        let tests = vec![
            ("if (true) { 10 }", Some(10)),
            ("if (false) { 10 }", None),
            ("if (1) { 10 }", Some(10)),
            ("if (1 < 2) { 10 }", Some(10)),
            ("if (1 > 2) { 10 }", None),
            ("if (1 > 2) { 10 } else { 20 }", Some(20)),
            ("if (1 < 2) { 10 } else { 20 }", Some(10)),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input);
            match expected {
                Some(value) => assert_integer(evaluated, value),
                // A skipped if with no alternative normalizes to NULL
                None => assert_null(evaluated),
            }
        }
    }

    #[test]
    fn test_return_statements() {
        let tests = vec![
            ("return 10;", 10),
            ("return 10; 9;", 10),
            ("return 2 * 5; 9;", 10),
            ("9; return 2 * 5; 9;", 10),
            (
                "if (10 > 1) {
                    if (10 > 1) {
                        return 10;
                    }
                    return 1;
                }",
                10,
            ),
        ];

        for (input, expected) in tests {
            assert_integer(test_eval(input), expected);
        }
    }

    #[test]
    fn test_error_handling() {
        let tests = vec![
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) {
                    if (10 > 1) {
                        return true + false;
                    }
                    return 1;
                }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            ("\"a\" - \"b\"", "unknown operator: STRING - STRING"),
            ("\"a\" == \"b\"", "unknown operator: STRING == STRING"),
            ("[1, 2][true]", "index operator not supported: ARRAY"),
            ("5[0]", "index operator not supported: INTEGER"),
            ("5(1)", "not a function: INTEGER"),
        ];

        for (input, expected) in tests {
            match test_eval(input) {
                Some(Object::Error(message)) => assert_eq!(
                    message, expected,
                    "wrong error message for {:?}",
                    input
                ),
                other => panic!("no error object returned for {:?}. got={:?}", input, other),
            }
        }
    }

    #[test]
    fn test_let_statements() {
        let tests = vec![
            ("let a = 5; a;", 5),
            ("let a = 5 * 5; a;", 25),
            ("let a = 5; let b = a; b;", 5),
            ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
        ];

        for (input, expected) in tests {
            assert_integer(test_eval(input), expected);
        }
    }

    #[test]
    fn test_let_statement_produces_no_value() {
        assert!(test_eval("let a = 5;").is_none());
    }

    #[test]
    fn test_function_object() {
        let evaluated = test_eval("fn(x) { x + 2; };");
        let function = match evaluated {
            Some(Object::Function(function)) => function,
            other => panic!("object is not Function. got={:?}", other),
        };

        assert_eq!(function.parameters.len(), 1);
        assert_eq!(function.parameters[0].value, "x");
        assert_eq!(format!("{}", function.body), "(x + 2)");
    }

    #[test]
    fn test_function_application() {
        let tests = vec![
            ("let identity = fn(x) { x; }; identity(5);", 5),
            ("let identity = fn(x) { return x; }; identity(5);", 5),
            ("let double = fn(x) { x * 2; }; double(5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
            ("fn(x) { x; }(5)", 5),
        ];

        for (input, expected) in tests {
            assert_integer(test_eval(input), expected);
        }
    }

    #[test]
    fn test_closures() {
        let input = "
        let newAdder = fn(x) {
            fn(y) { x + y };
        };
        let addTwo = newAdder(2);
        addTwo(2);";
        assert_integer(test_eval(input), 4);
    }

    #[test]
    fn test_recursive_closure() {
        // The function's captured environment is the top-level one that
        // also maps its own name, so the recursive call resolves.
        let input = "
        let countdown = fn(x) {
            if (x == 0) {
                return 0;
            } else {
                countdown(x - 1);
            }
        };
        countdown(5);";
        assert_integer(test_eval(input), 0);
    }

    #[test]
    fn test_empty_function_body_yields_null() {
        assert_null(test_eval("let noop = fn() { }; noop();"));
        assert_null(test_eval("let binder = fn() { let a = 1; }; binder();"));
    }

    #[test]
    fn test_string_literal() {
        match test_eval("\"Hello World!\"") {
            Some(Object::String(value)) => assert_eq!(value, "Hello World!"),
            other => panic!("object is not String. got={:?}", other),
        }
    }

    #[test]
    fn test_string_concatenation() {
        match test_eval("\"Hello\" + \" \" + \"World!\"") {
            Some(Object::String(value)) => assert_eq!(value, "Hello World!"),
            other => panic!("object is not String. got={:?}", other),
        }
    }

    #[test]
    fn test_builtin_len() {
        let tests = vec![
            ("len(\"\")", Object::Integer(0)),
            ("len(\"four\")", Object::Integer(4)),
            ("len(\"hello world\")", Object::Integer(11)),
            ("len([1, 2, 3])", Object::Integer(3)),
            ("len([])", Object::Integer(0)),
            (
                "len(1)",
                Object::Error("argument to 'len' not supported, got INTEGER".to_string()),
            ),
            (
                "len(\"one\", \"two\")",
                Object::Error("wrong number of arguments. got=2, want=1".to_string()),
            ),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input);
            assert_eq!(evaluated, Some(expected), "wrong result for {:?}", input);
        }
    }

    #[test]
    fn test_user_binding_shadows_builtin() {
        assert_integer(test_eval("let len = fn(x) { 42 }; len(\"anything\")"), 42);
    }

    #[test]
    fn test_array_literals() {
        match test_eval("[1, 2 * 2, 3 + 3]") {
            Some(Object::Array(elements)) => {
                assert_eq!(elements.len(), 3);
                assert_eq!(elements[0], Object::Integer(1));
                assert_eq!(elements[1], Object::Integer(4));
                assert_eq!(elements[2], Object::Integer(6));
            }
            other => panic!("object is not Array. got={:?}", other),
        }
    }

    #[test]
    fn test_array_index_expressions() {
        let tests = vec![
            ("[1, 2, 3][0]", Some(1)),
            ("[1, 2, 3][1]", Some(2)),
            ("[1, 2, 3][2]", Some(3)),
            ("let i = 0; [1][i];", Some(1)),
            ("[1, 2, 3][1 + 1];", Some(3)),
            ("let myArray = [1, 2, 3]; myArray[2];", Some(3)),
            (
                "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
                Some(6),
            ),
            ("let myArray = [1, 2, 3]; let i = myArray[0]; myArray[i]", Some(2)),
            ("[1, 2, 3][3]", None),
            ("[1, 2, 3][-1]", None),
        ];

        for (input, expected) in tests {
            let evaluated = test_eval(input);
            match expected {
                Some(value) => assert_integer(evaluated, value),
                None => assert_null(evaluated),
            }
        }
    }

    #[test]
    fn test_error_stops_argument_evaluation() {
        match test_eval("len(foobar)") {
            Some(Object::Error(message)) => {
                assert_eq!(message, "identifier not found: foobar");
            }
            other => panic!("no error object returned. got={:?}", other),
        }
    }

    #[test]
    fn test_error_inside_array_literal() {
        match test_eval("[1, foobar, 3]") {
            Some(Object::Error(message)) => {
                assert_eq!(message, "identifier not found: foobar");
            }
            other => panic!("no error object returned. got={:?}", other),
        }
    }

    #[test]
    fn test_grouping_is_identity() {
        let tests = vec!["5", "true", "\"abc\"", "1 + 2 * 3"];
        for input in tests {
            let grouped = format!("({})", input);
            assert_eq!(test_eval(input), test_eval(&grouped));
        }
    }
}

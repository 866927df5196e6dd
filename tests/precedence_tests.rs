use monkey::lexer::Lexer;
use monkey::parser::{Parser, test_helper::*};

/// Tests operator precedence parsing to ensure expressions are parsed correctly
/// according to operator precedence rules.
#[test]
fn test_operator_precedence_parsing() {
    let tests: Vec<(&str, &str)> = vec![
        // Prefix operators with infix operators
        ("-a * b;", "((-a) * b)"),
        ("!-a;", "(!(-a))"),
        // Left-associative operators
        ("a + b + c;", "((a + b) + c)"),
        ("a + b - c;", "((a + b) - c)"),
        ("a * b * c;", "((a * b) * c)"),
        ("a * b / c;", "((a * b) / c)"),
        // Precedence: multiplication/division higher than addition/subtraction
        ("a + b / c;", "(a + (b / c))"),
        ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f)"),
        // Multiple statements
        ("3 + 4; -5 * 5;", "(3 + 4)((-5) * 5)"),
        // Comparison operators
        ("5 > 4 == 3 < 4;", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4;", "((5 < 4) != (3 > 4))"),
        // Mixed precedence
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5;",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        // Boolean operators
        ("true;", "true"),
        ("false;", "false"),
        ("3 > 5 == false;", "((3 > 5) == false)"),
        ("3 < 5 == true;", "((3 < 5) == true)"),
        ("!(true == true);", "(!(true == true))"),
        // Grouped expressions override precedence
        ("1 + (2 + 3) + 4;", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2;", "((5 + 5) * 2)"),
        ("2 / (5 + 5);", "(2 / (5 + 5))"),
        ("-(5 + 5);", "(-(5 + 5))"),
        // Calls bind tighter than any binary operator
        ("a + add(b * c) + d;", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8));",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        (
            "add(a + b + c * d / f + g);",
            "add((((a + b) + ((c * d) / f)) + g))",
        ),
        // Index binds tighter than calls
        (
            "a * [1, 2, 3, 4][b * c] * d;",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1]);",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (input, expected) in tests {
        let l = Lexer::new(input.to_string());
        let mut p = Parser::new(l);
        let program = p.parse_program();

        check_parser_errors(&p);

        let actual = format!("{}", program);
        assert_eq!(
            actual, expected,
            "expected={:?}, got={:?}",
            expected, actual
        );
    }
}

/// Printing a parsed program and re-parsing the printed form yields the
/// same structural print.
#[test]
fn test_printer_round_trip() {
    let inputs = vec![
        "-a * b;",
        "a + b * c + d / e - f;",
        "3 + 4 * 5 == 3 * 1 + 4 * 5;",
        "!(true == true);",
        "a + add(b * c) + d;",
        "a * [1, 2, 3, 4][b * c] * d;",
    ];

    for input in inputs {
        let mut first = Parser::new(Lexer::new(input.to_string()));
        let printed = format!("{}", first.parse_program());
        check_parser_errors(&first);

        let mut second = Parser::new(Lexer::new(printed.clone()));
        let reprinted = format!("{}", second.parse_program());
        check_parser_errors(&second);

        assert_eq!(printed, reprinted, "round trip diverged for {:?}", input);
    }
}

//! Display helpers for the Monkey REPL: the welcome banner, ANSI colors,
//! and parser-error printing.

use crate::parser::error::ParserError;
use colored::Colorize;
use std::io::{Result, Write};

pub const MONKEY_LOGO: &str = r#"
        .--.  .-"-----"-.  .--.
       / .. \/  .-. .-.  \/ .. \
      | |  '|  /   Y   \  |'  | |
      | \   \  \ 0 | 0 /  /   / |
       \ '- ,\.-"""""""-./, -' /
        ''-' /_   ^ ^   _\ '-''
            |  \._   _./  |
            \   \ '~' /   /
             '._ '-=-' _.'
                '-----'
"#;

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const CYAN: &str = "\x1b[36m";
pub const GRAY: &str = "\x1b[90m";

pub fn print_welcome() {
    // Get username for welcome message
    let username = users::get_current_username()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknownuser".to_string());

    // Print banner
    println!("\n{}", MONKEY_LOGO.cyan());
    println!("  {}\n", "Monkey Programming Language".cyan().bold());

    println!(
        "{}",
        format!("Hello {}! This is the Monkey programming language!", username)
            .green()
            .bold()
    );
    println!(
        "{}\n",
        "Type your commands below. Press Ctrl+D or Ctrl+C to exit.".bright_black()
    );
}

/// Prints parser errors to the output, one tab-indented line per error.
pub fn print_parser_errors<W: Write>(output: &mut W, errors: &Vec<ParserError>) -> Result<()> {
    writeln!(
        output,
        "{}",
        "Woops! We ran into some monkey business here!".red().bold()
    )?;
    writeln!(output, "parser errors:")?;
    for error in errors {
        writeln!(output, "\t{}{}{}", GRAY, error, RESET)?;
    }
    Ok(())
}

//! Parser error types and handling for the Monkey language.
//!
//! This module provides structured error types that eliminate scattered
//! format! strings and enable proper error handling throughout the parser.

mod parser_error;
mod span;

use crate::lexer::token::TokenType;
pub use parser_error::ParserError;
pub use span::Span;
use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;

/// All parser error types - centralized and exhaustive.
///
/// This enum represents every possible error that can occur during parsing.
/// Each variant contains the necessary context to generate a helpful error message.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserErrorType {
    /// The peek token did not match what the grammar requires next.
    ExpectedToken {
        expected: TokenType,
        got: TokenType,
        literal: String,
    },

    /// No prefix parse function is registered for the current token.
    /// Illegal tokens surface as parse errors through this variant.
    NoPrefixParseFunction {
        token_type: TokenType,
        literal: String,
    },

    /// An INT token whose lexeme does not fit a 64-bit signed integer.
    InvalidIntegerLiteral {
        literal: String,
    },
}

impl Display for ParserErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Self::ExpectedToken { expected, got, .. } => {
                write!(
                    f,
                    "expected next token to be {:?}, got {:?} instead",
                    expected, got
                )
            }
            Self::NoPrefixParseFunction { token_type, .. } => {
                write!(f, "no prefix parse function for {:?} found", token_type)
            }
            Self::InvalidIntegerLiteral { literal } => {
                write!(f, "could not parse '{}' as integer", literal)
            }
        }
    }
}

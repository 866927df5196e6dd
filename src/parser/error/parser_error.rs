//! Parser error types and error collection.

use super::span::Span;
use crate::{
    lexer::token::{Token, TokenType},
    parser::error::ParserErrorType,
};
use std::fmt;

/// A parser error with location and kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub kind: ParserErrorType,
    pub span: Span,
}

impl ParserError {
    /// Create a new parser error.
    pub fn new(kind: ParserErrorType, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create error from token position.
    pub fn at_token(kind: ParserErrorType, token: &Token) -> Self {
        Self {
            kind,
            span: Span::from_token(token),
        }
    }

    /// Create error at specific position.
    pub fn at(kind: ParserErrorType, line: usize, column: usize) -> Self {
        Self {
            kind,
            span: Span::new(line, column),
        }
    }

    /// Expected token error.
    pub fn expected_token(expected: TokenType, token: &Token) -> Self {
        Self::at_token(
            ParserErrorType::ExpectedToken {
                expected,
                got: token.token_type,
                literal: token.literal.clone(),
            },
            token,
        )
    }

    /// No prefix parse function error.
    pub fn no_prefix_fn(token: &Token) -> Self {
        Self::at_token(
            ParserErrorType::NoPrefixParseFunction {
                token_type: token.token_type,
                literal: token.literal.clone(),
            },
            token,
        )
    }

    /// Invalid integer literal error.
    pub fn invalid_integer(token: &Token) -> Self {
        Self::at_token(
            ParserErrorType::InvalidIntegerLiteral {
                literal: token.literal.clone(),
            },
            token,
        )
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.span, self.kind)
    }
}

impl std::error::Error for ParserError {}

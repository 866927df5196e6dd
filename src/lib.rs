//! An interpreter for the Monkey programming language.
//!
//! The pipeline transforms source text into values in three stages:
//! lexing ([`lexer`]), Pratt parsing ([`parser`]) and tree-walking
//! evaluation ([`evaluator`]) over the runtime values in [`object`].
//! The [`repl`] module drives the pipeline interactively.

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;

pub use lexer::Lexer;
pub use parser::Parser;

//! Canonical type syntax: lexer and parser.
//!
//! Accepts the same text that `TypeIdentity`'s `Display` produces, with
//! free whitespace, so canonical text round-trips.

mod lexer;
mod parser;


pub use parser::{SPECIFIERS, parse_type};

/// Errors produced while parsing type text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    #[error("type text is empty")]
    Empty,

    #[error("expected {expected}, found `{found}` at offset {offset}")]
    UnexpectedToken {
        offset: usize,
        found: String,
        expected: &'static str,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str },

    #[error("invalid characters `{text}` at offset {offset}")]
    InvalidCharacters { offset: usize, text: String },

    #[error("type is nested too deeply")]
    TooDeep,
}

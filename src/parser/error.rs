use crate::{parser::LexerError, types::CalDateTimeError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParserError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error("found {found}, expected {expected}")]
    Unexpected {
        found: String,
        expected: &'static str,
    },
    #[error("missing required property \"{0}\"")]
    MissingProperty(&'static str),
    #[error("\"{0}\" property occurs more than once")]
    DuplicateProperty(&'static str),
    #[error("property conflict: {0}")]
    PropertyConflict(&'static str),
    #[error("invalid {0}: {1}")]
    DateTime(&'static str, #[source] CalDateTimeError),
}

use serde::{de, ser};
use std::{fmt, io};
use thiserror::Error;

/// Raised while compiling a date layout, before any value gets formatted.
#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("unterminated quote starting at position {0}")]
    UnterminatedQuote(usize),
    #[error("illegal pattern character '{0}' at position {1}")]
    IllegalCharacter(char, usize),
    #[error("pattern field '{0}' does not accept a width of {1}")]
    UnsupportedWidth(char, usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid options: {0}")]
    Options(String),
    #[error("{0}")]
    CustomError(String),
}

impl ser::Error for Error {
    #[inline]
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::CustomError(msg.to_string())
    }
}

impl de::Error for Error {
    #[inline]
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::CustomError(msg.to_string())
    }
}

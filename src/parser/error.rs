//! Error type definition.

use std::fmt;

use thiserror::Error;

/// The class of parse failure, per `spec.md` §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidChar,
    UnexpectedEnd,
    BadPosition,
    BadEdit,
    CoordinateMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidChar => "invalid character",
            ErrorKind::UnexpectedEnd => "unexpected end of input",
            ErrorKind::BadPosition => "malformed position",
            ErrorKind::BadEdit => "malformed edit",
            ErrorKind::CoordinateMismatch => "coordinate kind mismatch",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing (and intrinsic validation of) HGVS expressions.
///
/// The parser never silently succeeds on malformed input: every rejected
/// input surfaces as one of these, carrying the byte offset into the
/// original string where the mismatch was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte offset {offset}: {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub offset: usize,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            message: message.into(),
        }
    }
}

//! Error types for loading traffic patterns

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a pattern from disk
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern file could not be read
    #[error("Failed to read pattern file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pattern file was read but is malformed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A malformed or incomplete pattern, located by its 1-based line number
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Pattern parse error at line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// What went wrong on the offending line
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found end of input")]
    MissingLine { expected: &'static str },

    #[error("invalid {field} '{value}': expected a non-negative integer")]
    InvalidCount { field: &'static str, value: String },

    #[error("target address is empty")]
    EmptyAddress,

    #[error("invalid port '{0}': expected an integer in 1..=65535")]
    InvalidPort(String),

    #[error("invalid probability '{0}': expected a number")]
    InvalidProbability(String),

    #[error("probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f64),

    #[error("unexpected content '{0}' after the last target")]
    TrailingContent(String),
}

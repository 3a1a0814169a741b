//! Error types
//!
//! Annotation problems are never errors: they are reported as
//! [`Violation`](crate::validation::Violation)s. The types here cover input
//! that cannot be read or validated at all.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading CoNLL-U text into a [`Document`](crate::parser::Document)
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected 10 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: invalid word id '{id}'")]
    InvalidId { line: usize, id: String },

    #[error("line {line}: word id {found} out of order, expected {expected}")]
    UnexpectedId {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid head '{head}'")]
    InvalidHead { line: usize, head: String },
}

/// Failure while loading a tagset definition
#[derive(Debug, Error)]
pub enum TagsetError {
    #[error("failed to read tagset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tagset TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("tagset '{name}' has an invalid punctuation pattern: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Precondition failure that stops a validation pass before any rule runs
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("sentence {sentence_index} ('{sent_id}') has no words")]
    MalformedSentence {
        sentence_index: usize,
        sent_id: String,
    },
}

//! Sindhi Treebank Validator
//!
//! Annotation checks for the Sindhi dependency treebank in CoNLL-U format.
//!
//! This library provides:
//! - A CoNLL-U reader
//! - Versioned tagset tables (tags, features, lexical overrides)
//! - The validation rule engine and its report formatter
//! - Configuration management

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod tagset;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use error::{ParseError, TagsetError, ValidationError};
pub use parser::{parse_document, read_document, Document, Sentence, Word};
pub use tagset::{Tagset, TagsetRegistry};
pub use validation::{validate_document, ValidateOptions, ValidationResult, Validator, Violation};

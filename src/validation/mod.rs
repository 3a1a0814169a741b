//! Validation Engine
//!
//! Annotation checks for parsed CoNLL-U documents, separated from reading
//! and from presentation.

pub mod cycle;
pub mod engine;
pub mod report;
pub mod rules;

pub use cycle::{find_cycle, CycleEdge};
pub use engine::{validate_document, Category, ValidateOptions, Validator, Violation};

// Re-export common types
pub use engine::ValidationResult;

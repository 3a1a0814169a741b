//! Report Rendering
//!
//! Turns a [`ValidationResult`] into the text printed for a file: one
//! header per category that has violations, then one line per violation.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use super::engine::{Category, ValidationResult, Violation};

/// Render the text report.
///
/// Headers appear at most once, in rule order. When `print_sent_idx` is set
/// each line names the numeric sentence index next to the sentence id.
pub fn render_text(result: &ValidationResult, print_sent_idx: bool) -> String {
    let mut out = String::new();
    let mut current: Option<Category> = None;

    for violation in &result.violations {
        if current != Some(violation.category) {
            current = Some(violation.category);
            let _ = writeln!(out, "{}", violation.category.header());
        }
        let _ = writeln!(out, "{}", render_line(violation, print_sent_idx));
        for detail in &violation.details {
            let _ = writeln!(out, "  {}", detail);
        }
    }

    out
}

/// A single detail line, without the category header
pub fn render_line(violation: &Violation, print_sent_idx: bool) -> String {
    if print_sent_idx {
        format!(
            "Sentence {} ({}) {}",
            violation.sent_id, violation.sentence_index, violation.message
        )
    } else {
        format!("Sentence {} {}", violation.sent_id, violation.message)
    }
}

/// JSON form of a file's validation result
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: &'a Path,
    pub flagged: Vec<usize>,
    pub violations: &'a [Violation],
}

impl<'a> JsonReport<'a> {
    pub fn new(file: &'a Path, result: &'a ValidationResult) -> Self {
        Self {
            file,
            flagged: result.flagged.iter().copied().collect(),
            violations: &result.violations,
        }
    }
}

/// Render the JSON report
pub fn render_json(file: &Path, result: &ValidationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(file, result))
}

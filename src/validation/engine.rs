//! Validation Engine
//!
//! Runs the rule groups over a document and collects their violations.
//! Rendering lives in [`report`](super::report).

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::ValidationError;
use crate::parser::{Document, Word};
use crate::tagset::Tagset;

use super::rules::{RuleContext, RULES};

/// Category of an annotation problem. Declaration order is the order in
/// which the rule groups run and in which report sections appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UnknownUpos,
    NoRoot,
    SpaceInWord,
    PunctLabeledNonPunct,
    NonPunctLabeledPunct,
    UnexpectedSpaceAfterNo,
    NoHead,
    UnlabeledArc,
    PunctRoot,
    MultipleRoots,
    Cycle,
    XposError,
    BlankFeats,
    FeatureError,
    WordSpecificPos,
    UnexpectedStructure,
    AdvmodEmph,
}

impl Category {
    /// Header printed once above the violations of this category
    pub fn header(&self) -> &'static str {
        match self {
            Category::UnknownUpos => "UNKNOWN UPOS",
            Category::NoRoot => "NO ROOT SENTENCES",
            Category::SpaceInWord => "SPACE IN WORD",
            Category::PunctLabeledNonPunct => "PUNCT WORDS LABELED NON-PUNCT",
            Category::NonPunctLabeledPunct => "NON PUNCT WORDS LABELED PUNCT",
            Category::UnexpectedSpaceAfterNo => "UNEXPECTED SpaceAfter=No",
            Category::NoHead => "NO HEAD WORDS",
            Category::UnlabeledArc => "UNLABELED ARCS",
            Category::PunctRoot => "PUNCT ROOT",
            Category::MultipleRoots => "MULTIPLE ROOTS",
            Category::Cycle => "CYCLES",
            Category::XposError => "XPOS ERRORS",
            Category::BlankFeats => "BLANK FEAT ERRORS",
            Category::FeatureError => "FEATURE ERRORS",
            Category::WordSpecificPos => "WORD-SPECIFIC POS ERRORS",
            Category::UnexpectedStructure => "UNEXPECTED POS & DEPREL COMBINATION",
            Category::AdvmodEmph => "ADVMOD:EMPH ERRORS",
        }
    }
}

/// A single annotation problem
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub category: Category,
    pub sentence_index: usize,
    pub sent_id: String,
    /// Id of the offending word, if the problem is about one word
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_id: Option<usize>,
    /// Source line of the offending word
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
    /// Extra indented lines, e.g. the edges of a cycle
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl Violation {
    pub fn new(category: Category, sentence_index: usize, sent_id: &str, message: String) -> Self {
        Self {
            category,
            sentence_index,
            sent_id: sent_id.to_string(),
            word_id: None,
            line: None,
            message,
            details: Vec::new(),
        }
    }

    pub fn with_word(mut self, word: &Word) -> Self {
        self.word_id = Some(word.id);
        self.line = word.line_number;
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

/// Switches for a validation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidateOptions {
    /// Check XPOS against the UPOS table
    pub check_xpos: bool,
    /// Check features against the UPOS table; blank features are always checked
    pub check_feats: bool,
    /// Include the numeric sentence index in rendered diagnostics
    pub print_sent_idx: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            check_xpos: true,
            check_feats: true,
            print_sent_idx: false,
        }
    }
}

/// Result of validating a document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Violations in rule-group order, then sentence order
    pub violations: Vec<Violation>,
    /// Indices of sentences with at least one violation
    pub flagged: BTreeSet<usize>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.flagged.insert(violation.sentence_index);
        self.violations.push(violation);
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.category == category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.in_category(category).count()
    }
}

/// Stateless rule engine bound to a tagset
#[derive(Debug, Clone)]
pub struct Validator<'a> {
    tagset: &'a Tagset,
    options: ValidateOptions,
}

impl<'a> Validator<'a> {
    pub fn new(tagset: &'a Tagset, options: ValidateOptions) -> Self {
        Self { tagset, options }
    }

    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    /// Run every enabled rule group over every sentence.
    ///
    /// Fails only when a sentence has no words; annotation problems are
    /// returned as violations.
    pub fn validate(&self, document: &Document) -> Result<ValidationResult, ValidationError> {
        for (sentence_index, sentence) in document.sentences.iter().enumerate() {
            if sentence.words.is_empty() {
                return Err(ValidationError::MalformedSentence {
                    sentence_index,
                    sent_id: sentence.sent_id.clone(),
                });
            }
        }

        let mut result = ValidationResult::new();

        for rule in RULES {
            if !rule.gate.is_enabled(&self.options) {
                log::debug!("skipping rule group {:?}", rule.category);
                continue;
            }

            let mut violations = Vec::new();
            for (sentence_index, sentence) in document.sentences.iter().enumerate() {
                let ctx = RuleContext {
                    tagset: self.tagset,
                    sentence,
                    sentence_index,
                };
                (rule.check)(&ctx, &mut violations);
            }

            log::debug!("{:?}: {} violations", rule.category, violations.len());
            for violation in violations {
                result.add(violation);
            }
        }

        Ok(result)
    }
}

/// Validate a document with the given tagset and options
pub fn validate_document(
    document: &Document,
    tagset: &Tagset,
    options: ValidateOptions,
) -> Result<ValidationResult, ValidationError> {
    Validator::new(tagset, options).validate(document)
}

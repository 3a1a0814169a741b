//! Tagset Schema Types
//!
//! The file form of a tagset (matches TOML) and the runtime form used by
//! the validator.

use std::collections::{BTreeSet, HashMap, HashSet};

use regex::Regex;
use serde::Deserialize;

use crate::error::TagsetError;

/// Root tagset file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TagsetFile {
    pub tagset: TagsetMeta,
    pub upos: Vec<String>,
    #[serde(default)]
    pub features_required: Vec<String>,
    pub punctuation_pattern: String,
    #[serde(default)]
    pub advmod_emph_exceptions: Vec<String>,
    /// UPOS -> allowed XPOS
    #[serde(default)]
    pub xpos: HashMap<String, Vec<String>>,
    /// UPOS -> allowed `Key=Value` features
    #[serde(default)]
    pub feats: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub refinements: Refinements,
    /// Literal word -> the only UPOS tags it may carry
    #[serde(default)]
    pub enforced_pos: HashMap<String, Vec<String>>,
    /// Literal word -> allowed (UPOS, deprel) pairs
    #[serde(default)]
    pub structure: HashMap<String, Vec<(String, String)>>,
}

/// Tagset metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TagsetMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Cross-field feature constraints
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Refinements {
    /// XPOS tags an ADP may have when it carries a `Case` feature
    #[serde(default)]
    pub case_marking_xpos: Vec<String>,
    /// Required `Aspect` value of a `VerbForm=Inf` verb
    pub infinitive_aspect: Option<String>,
}

/// Runtime tagset (optimized for lookups)
#[derive(Debug, Clone)]
pub struct Tagset {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub upos: BTreeSet<String>,
    pub features_required: HashSet<String>,
    pub punctuation: Regex,
    pub advmod_emph_exceptions: HashSet<String>,
    pub xpos: HashMap<String, Vec<String>>,
    pub feats: HashMap<String, HashSet<String>>,
    pub refinements: Refinements,
    pub enforced_pos: HashMap<String, Vec<String>>,
    pub structure: HashMap<String, Vec<(String, String)>>,
}

impl TryFrom<TagsetFile> for Tagset {
    type Error = TagsetError;

    fn try_from(file: TagsetFile) -> Result<Self, Self::Error> {
        let punctuation =
            Regex::new(&file.punctuation_pattern).map_err(|source| TagsetError::Pattern {
                name: file.tagset.name.clone(),
                source,
            })?;

        let feats = file
            .feats
            .into_iter()
            .map(|(upos, feats)| (upos, feats.into_iter().collect()))
            .collect();

        Ok(Self {
            name: file.tagset.name,
            version: file.tagset.version,
            description: file.tagset.description,
            upos: file.upos.into_iter().collect(),
            features_required: file.features_required.into_iter().collect(),
            punctuation,
            advmod_emph_exceptions: file.advmod_emph_exceptions.into_iter().collect(),
            xpos: file.xpos,
            feats,
            refinements: file.refinements,
            enforced_pos: file.enforced_pos,
            structure: file.structure,
        })
    }
}

impl Tagset {
    /// Parse a tagset from TOML text
    pub fn from_toml(content: &str) -> Result<Self, TagsetError> {
        let file: TagsetFile = toml::from_str(content)?;
        Self::try_from(file)
    }

    pub fn is_known_upos(&self, upos: &str) -> bool {
        self.upos.contains(upos)
    }

    /// Whether `text` is made only of punctuation characters
    pub fn is_punctuation(&self, text: &str) -> bool {
        self.punctuation.is_match(text)
    }

    /// Allowed XPOS for `upos`, `None` if the UPOS has no XPOS entry
    pub fn allowed_xpos(&self, upos: &str) -> Option<&[String]> {
        self.xpos.get(upos).map(Vec::as_slice)
    }

    /// Allowed features for `upos`, `None` if the UPOS has no feature entry
    pub fn allowed_feats(&self, upos: &str) -> Option<&HashSet<String>> {
        self.feats.get(upos)
    }

    pub fn requires_features(&self, upos: &str) -> bool {
        self.features_required.contains(upos)
    }

    pub fn enforced_pos(&self, word: &str) -> Option<&[String]> {
        self.enforced_pos.get(word).map(Vec::as_slice)
    }

    pub fn allowed_structures(&self, word: &str) -> Option<&[(String, String)]> {
        self.structure.get(word).map(Vec::as_slice)
    }

    pub fn is_advmod_emph_exception(&self, sentence_text: &str) -> bool {
        self.advmod_emph_exceptions.contains(sentence_text)
    }
}

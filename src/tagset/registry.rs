//! Tagset Registry
//!
//! In-memory registry of named tagsets. The Sindhi tagset is embedded in the
//! binary; further tagsets can be loaded from TOML files or directories.

use std::collections::HashMap;
use std::path::Path;

use super::schema::Tagset;
use crate::error::TagsetError;
use crate::parser::Document;

/// Name of the embedded tagset
pub const DEFAULT_TAGSET: &str = "sindhi";

const EMBEDDED_SINDHI: &str = include_str!("../../resources/tagsets/sindhi.tagset.toml");

/// Simple in-memory tagset registry
#[derive(Debug, Clone)]
pub struct TagsetRegistry {
    tagsets: HashMap<String, Tagset>,
    active_tagset: Option<String>,
}

impl Default for TagsetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TagsetRegistry {
    pub fn new() -> Self {
        Self {
            tagsets: HashMap::new(),
            active_tagset: None,
        }
    }

    /// Add a tagset, replacing any tagset with the same name
    pub fn add_tagset(&mut self, tagset: Tagset) {
        if self.tagsets.contains_key(&tagset.name) {
            log::info!("Replacing tagset '{}'", tagset.name);
        }
        self.tagsets.insert(tagset.name.clone(), tagset);
    }

    /// Set the active tagset
    pub fn set_active_tagset(&mut self, name: &str) -> bool {
        if self.tagsets.contains_key(name) {
            self.active_tagset = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Get the currently active tagset
    pub fn get_active_tagset(&self) -> Option<&Tagset> {
        self.active_tagset
            .as_ref()
            .and_then(|name| self.tagsets.get(name))
    }

    pub fn get_tagset(&self, name: &str) -> Option<&Tagset> {
        self.tagsets.get(name)
    }

    /// List all available tagsets
    pub fn list_tagsets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tagsets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Add the embedded Sindhi tagset
    pub fn add_embedded_sindhi_tagset(&mut self) -> Result<(), TagsetError> {
        let tagset = Tagset::from_toml(EMBEDDED_SINDHI)?;
        self.add_tagset(tagset);
        Ok(())
    }

    /// Registry holding the embedded tagset, already active
    pub fn with_embedded() -> Result<Self, TagsetError> {
        let mut registry = Self::new();
        registry.add_embedded_sindhi_tagset()?;
        registry.set_active_tagset(DEFAULT_TAGSET);
        Ok(registry)
    }

    /// Load a single tagset file and return its name
    pub fn load_file(&mut self, path: &Path) -> Result<String, TagsetError> {
        let content = std::fs::read_to_string(path).map_err(|source| TagsetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tagset = Tagset::from_toml(&content)?;
        let name = tagset.name.clone();
        log::info!("Loaded tagset '{}' from {}", name, path.display());
        self.add_tagset(tagset);
        Ok(name)
    }

    /// Load every `*.toml` file in `dir`. A missing directory is not an
    /// error; files that fail to load are logged and skipped.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize, TagsetError> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = std::fs::read_dir(dir).map_err(|source| TagsetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("toml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(_) => loaded += 1,
                Err(e) => log::warn!("Failed to load tagset file {}: {}", path.display(), e),
            }
        }
        Ok(loaded)
    }

    /// Detect a tagset named in the document's comments, e.g.
    /// `# tagset = sindhi`. Only the first sentence is checked.
    pub fn detect_comment_tagset(&self, document: &Document) -> Option<String> {
        let first = document.sentences.first()?;
        first
            .comments
            .iter()
            .find_map(|comment| extract_tagset_from_comment(comment))
            .filter(|name| self.tagsets.contains_key(name))
    }
}

/// Extract a tagset name from a comment string
fn extract_tagset_from_comment(comment: &str) -> Option<String> {
    let (key, value) = crate::parser::lexer::comment_key_value(comment)?;
    if key != "tagset" {
        return None;
    }
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        Some(value.to_string())
    } else {
        None
    }
}

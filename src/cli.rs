//! Command-line driver
//!
//! Wires configuration, tagsets, the reader and the validator together for
//! the `sd-validate` binary.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::config::{Config, OutputFormat};
use crate::parser::read_document;
use crate::tagset::TagsetRegistry;
use crate::validation::{report, ValidationResult, Validator};

/// Run the validator over every configured file.
///
/// Returns `true` when no sentence in any file was flagged.
pub fn run(config: &Config) -> Result<bool> {
    let registry = build_registry(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut all_clean = true;
    for path in &config.files {
        if config.format == OutputFormat::Text {
            writeln!(out, "Validating {}", path.display())?;
        }

        let result = validate_file(path, &registry, config)?;
        if !result.flagged.is_empty() {
            all_clean = false;
        }
        log::info!(
            "{}: {} violations in {} sentences",
            path.display(),
            result.violations.len(),
            result.flagged.len()
        );

        match config.format {
            OutputFormat::Text => {
                write!(out, "{}", report::render_text(&result, config.options.print_sent_idx))?;
            }
            OutputFormat::Json => {
                writeln!(out, "{}", report::render_json(path, &result)?)?;
            }
        }
    }

    Ok(all_clean)
}

/// Build the tagset registry: embedded tagset, then tagset directories, then
/// activate the configured tagset
pub fn build_registry(config: &Config) -> Result<TagsetRegistry> {
    let mut registry = TagsetRegistry::new();
    registry
        .add_embedded_sindhi_tagset()
        .context("Failed to load embedded tagset")?;

    for dir in &config.tagset_dirs {
        let loaded = registry
            .load_directory(dir)
            .with_context(|| format!("Failed to read tagset directory: {}", dir.display()))?;
        if loaded > 0 {
            log::info!("Loaded {} tagsets from {}", loaded, dir.display());
        }
    }

    let name = config.get_effective_tagset();
    if !registry.set_active_tagset(&name) {
        return Err(anyhow!(
            "Unknown tagset '{}' (available: {})",
            name,
            registry.list_tagsets().join(", ")
        ));
    }

    Ok(registry)
}

/// Read and validate a single file. A `# tagset = NAME` comment in the
/// file's first sentence takes precedence over the active tagset.
pub fn validate_file(
    path: &Path,
    registry: &TagsetRegistry,
    config: &Config,
) -> Result<ValidationResult> {
    let document = read_document(path)
        .with_context(|| format!("Failed to read CoNLL-U file: {}", path.display()))?;

    let tagset = match registry.detect_comment_tagset(&document) {
        Some(name) => {
            log::info!("{}: using tagset '{}' from comment", path.display(), name);
            registry.get_tagset(&name)
        }
        None => registry.get_active_tagset(),
    }
    .ok_or_else(|| anyhow!("No active tagset"))?;

    let result = Validator::new(tagset, config.options)
        .validate(&document)
        .with_context(|| format!("Failed to validate {}", path.display()))?;
    Ok(result)
}

//! Configuration management for the treebank validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Tagset directory configuration

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::tagset::DEFAULT_TAGSET;
use crate::validation::ValidateOptions;

/// Output format for validation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Command-line arguments for the validator
#[derive(Debug, Parser)]
#[command(name = "sd-validate")]
#[command(about = "Validate a file of SD dependencies & tags")]
#[command(version)]
pub struct Args {
    /// CoNLL-U files to validate
    #[arg(required = true, help = "File to validate")]
    pub filename: Vec<PathBuf>,

    /// Skip the UPOS/XPOS compatibility check
    #[arg(long = "no_check_xpos", help = "Don't check the xpos in the file")]
    pub no_check_xpos: bool,

    /// Skip the UPOS/feature compatibility check
    #[arg(long = "no_check_feats", help = "Don't check the feats in the file")]
    pub no_check_feats: bool,

    /// Print the numeric sentence index next to the sentence id
    #[arg(long = "print_sent_idx", help = "Include sentence indices in diagnostics")]
    pub print_sent_idx: bool,

    /// Explicitly specify the tagset to use
    #[arg(long, help = "Tagset to validate against (e.g., 'sindhi')")]
    pub tagset: Option<String>,

    /// Custom tagset directory to search for tagset files
    #[arg(long, help = "Directory containing tagset TOML files")]
    pub tagset_dir: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with a failure status when any sentence is flagged
    #[arg(long)]
    pub strict: bool,

    /// Log level for the validator
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Files to validate, in command-line order
    pub files: Vec<PathBuf>,
    /// Rule group switches
    pub options: ValidateOptions,
    /// Tagset name explicitly set via command line
    pub cli_tagset: Option<String>,
    /// Directories to search for tagset files, lowest priority first
    pub tagset_dirs: Vec<PathBuf>,
    pub format: OutputFormat,
    pub strict: bool,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut tagset_dirs = Vec::new();

        // Default user config directory
        if let Some(config_dir) = dirs::config_dir() {
            tagset_dirs.push(config_dir.join("sd-treebank").join("tagsets"));
        }

        // User-specified directory wins over the default one
        if let Some(custom_dir) = args.tagset_dir {
            tagset_dirs.push(custom_dir);
        }

        Ok(Config {
            files: args.filename,
            options: ValidateOptions {
                check_xpos: !args.no_check_xpos,
                check_feats: !args.no_check_feats,
                print_sent_idx: args.print_sent_idx,
            },
            cli_tagset: args.tagset,
            tagset_dirs,
            format: args.format,
            strict: args.strict,
            log_level: args.log_level,
        })
    }

    /// Get the effective tagset name: CLI argument or the embedded default
    pub fn get_effective_tagset(&self) -> String {
        self.cli_tagset
            .clone()
            .unwrap_or_else(|| DEFAULT_TAGSET.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let args = Args::try_parse_from(args.iter().copied()).expect("parse args");
        Config::from_args(args).expect("create config")
    }

    #[test]
    fn test_defaults() {
        let config = config(&["sd-validate", "a.conllu"]);

        assert_eq!(config.files, vec![PathBuf::from("a.conllu")]);
        assert_eq!(config.options, ValidateOptions::default());
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.strict);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.get_effective_tagset(), DEFAULT_TAGSET);
    }

    #[test]
    fn test_check_switches() {
        let config = config(&[
            "sd-validate",
            "--no_check_xpos",
            "--no_check_feats",
            "--print_sent_idx",
            "a.conllu",
            "b.conllu",
        ]);

        assert_eq!(config.files.len(), 2);
        assert!(!config.options.check_xpos);
        assert!(!config.options.check_feats);
        assert!(config.options.print_sent_idx);
    }

    #[test]
    fn test_tagset_dir_is_searched_last() {
        let config = config(&["sd-validate", "--tagset-dir", "/tmp/tags", "a.conllu"]);
        assert_eq!(config.tagset_dirs.last(), Some(&PathBuf::from("/tmp/tags")));
    }

    #[test]
    fn test_filename_is_required() {
        assert!(Args::try_parse_from(["sd-validate"]).is_err());
    }

    #[test]
    fn test_json_format() {
        let config = config(&["sd-validate", "--format", "json", "--tagset", "x", "a.conllu"]);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.get_effective_tagset(), "x");
    }
}

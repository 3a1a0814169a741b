use std::fs;
use std::io::Write;

use clap::Parser;
use sd_treebank::cli::{build_registry, validate_file};
use sd_treebank::config::{Args, Config};
use sd_treebank::tagset::TagsetRegistry;
use sd_treebank::validation::Category;
use tempfile::TempDir;

const MINI_TAGSET: &str = r#"
upos = ["NOUN", "VERB", "PUNCT"]
punctuation_pattern = '^[.,]+$'

[tagset]
name = "mini"
version = "0.1"

[xpos]
NOUN = ["NN"]
VERB = ["VM"]
PUNCT = ["PUNCT"]

[feats]
NOUN = ["Case=Nom", "Number=Sing"]
VERB = []
PUNCT = []
"#;

/// Sentence that is clean under the embedded tagset but uses a UPOS the
/// mini tagset does not know
const ADJ_SENTENCE: &str = "# sent_id = t-1
# text = سٺو ڪم
1\tسٺو\tسٺو\tADJ\tJJ\tGender=Masc\t2\tamod\t_\t_
2\tڪم\tڪم\tNOUN\tNN\tCase=Nom|Number=Sing\t0\troot\t_\t_
";

fn tagset_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("mini.toml"), MINI_TAGSET).expect("write tagset");
    dir
}

fn config_for(dir: &TempDir, extra: &[&str]) -> Config {
    let dir_arg = dir.path().to_string_lossy().to_string();
    let mut args = vec!["sd-validate", "--tagset-dir", dir_arg.as_str()];
    args.extend_from_slice(extra);
    args.push("input.conllu");
    Config::from_args(Args::try_parse_from(args).expect("parse args")).expect("config")
}

fn write_corpus(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).expect("create corpus");
    file.write_all(content.as_bytes()).expect("write corpus");
    path
}

#[test]
fn test_load_directory_adds_tagsets() {
    let dir = tagset_dir();
    fs::write(dir.path().join("notes.txt"), "not a tagset").unwrap();
    fs::write(dir.path().join("broken.toml"), "upos = [").unwrap();

    let mut registry = TagsetRegistry::with_embedded().unwrap();
    let loaded = registry.load_directory(dir.path()).unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(registry.list_tagsets(), vec!["mini", "sindhi"]);
    let mini = registry.get_tagset("mini").unwrap();
    assert_eq!(mini.version.as_deref(), Some("0.1"));
    assert!(mini.is_known_upos("NOUN"));
    assert!(!mini.is_known_upos("ADJ"));
}

#[test]
fn test_missing_directory_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TagsetRegistry::new();

    let loaded = registry.load_directory(&dir.path().join("absent")).unwrap();
    assert_eq!(loaded, 0);
    assert!(registry.list_tagsets().is_empty());
}

#[test]
fn test_build_registry_activates_cli_tagset() {
    let dir = tagset_dir();
    let config = config_for(&dir, &["--tagset", "mini"]);

    let registry = build_registry(&config).unwrap();
    assert_eq!(registry.get_active_tagset().unwrap().name, "mini");
}

#[test]
fn test_build_registry_rejects_unknown_tagset() {
    let dir = tagset_dir();
    let config = config_for(&dir, &["--tagset", "klingon"]);

    let err = build_registry(&config).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("klingon"));
    assert!(message.contains("mini"));
    assert!(message.contains("sindhi"));
}

#[test]
fn test_default_tagset_accepts_sentence() {
    let dir = tagset_dir();
    let config = config_for(&dir, &[]);
    let registry = build_registry(&config).unwrap();
    let corpus = write_corpus(&dir, "plain.conllu", ADJ_SENTENCE);

    let result = validate_file(&corpus, &registry, &config).unwrap();
    assert!(result.flagged.is_empty(), "{:?}", result.violations);
}

#[test]
fn test_comment_tagset_overrides_active_tagset() {
    let dir = tagset_dir();
    let config = config_for(&dir, &[]);
    let registry = build_registry(&config).unwrap();
    let content = format!("# tagset = mini\n{}", ADJ_SENTENCE);
    let corpus = write_corpus(&dir, "mini.conllu", &content);

    let result = validate_file(&corpus, &registry, &config).unwrap();
    assert_eq!(result.flagged.iter().copied().collect::<Vec<_>>(), vec![0]);
    assert_eq!(result.count(Category::UnknownUpos), 1);
}

#[test]
fn test_unknown_comment_tagset_is_ignored() {
    let dir = tagset_dir();
    let config = config_for(&dir, &[]);
    let registry = build_registry(&config).unwrap();
    let content = format!("# tagset = klingon\n{}", ADJ_SENTENCE);
    let corpus = write_corpus(&dir, "other.conllu", &content);

    let result = validate_file(&corpus, &registry, &config).unwrap();
    assert!(result.flagged.is_empty());
}

#[test]
fn test_validate_file_reports_read_errors() {
    let dir = tagset_dir();
    let config = config_for(&dir, &[]);
    let registry = build_registry(&config).unwrap();

    let err = validate_file(&dir.path().join("missing.conllu"), &registry, &config).unwrap_err();
    assert!(err.to_string().contains("missing.conllu"));
}

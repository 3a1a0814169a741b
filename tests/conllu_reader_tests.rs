use std::io::Write;

use sd_treebank::error::ParseError;
use sd_treebank::parser::read_document;
use sd_treebank::tagset::TagsetRegistry;
use sd_treebank::validation::{validate_document, Category, ValidateOptions};

const CORPUS: &str = "# sent_id = Kawish-20100810-001
# text = هو آيو۔
1\tهو\tهو\tPRON\tPRP\tCase=Nom|Number=Sing|Person=3\t2\tnsubj\t_\t_
2\tآيو\tاچڻ\tVERB\tVM\tGender=Masc|Number=Sing\t0\troot\t_\tSpaceAfter=No
3\t۔\t۔\tPUNCT\tPUNCT\t_\t2\tpunct\t_\t_

# sent_id = Kawish-20100810-002
# text = ڪتاب سٺو
1\tڪتاب\tڪتاب\tNOUN\tNN\t_\t2\tnsubj\t_\tSpaceAfter=No
2\tسٺو\tسٺو\tADJ\tJJ\tGender=Masc\t0\troot\t_\t_
";

fn write_corpus(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write corpus");
    file
}

#[test]
fn test_read_document_from_file() {
    let file = write_corpus(CORPUS);
    let doc = read_document(file.path()).expect("read document");

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.sentences[0].sent_id, "Kawish-20100810-001");
    assert_eq!(doc.sentences[0].text, "هو آيو۔");
    assert_eq!(doc.sentences[1].words[1].line_number, Some(10));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_document(dir.path().join("missing.conllu")).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}

#[test]
fn test_validate_parsed_corpus() {
    let file = write_corpus(CORPUS);
    let doc = read_document(file.path()).expect("read document");
    let registry = TagsetRegistry::with_embedded().expect("embedded tagset");
    let tagset = registry.get_active_tagset().expect("active tagset");

    let result = validate_document(&doc, tagset, ValidateOptions::default()).expect("validate");

    // second sentence: placeholder feats on a NOUN, and a no-space join
    // between two words
    assert_eq!(result.flagged.iter().copied().collect::<Vec<_>>(), vec![1]);
    assert_eq!(result.count(Category::FeatureError), 1);
    assert_eq!(result.count(Category::UnexpectedSpaceAfterNo), 1);

    let space = result
        .in_category(Category::UnexpectedSpaceAfterNo)
        .next()
        .expect("violation");
    assert_eq!(space.sent_id, "Kawish-20100810-002");
    assert_eq!(space.line, Some(9));
}

#[test]
fn test_comment_only_sentence_is_rejected_by_validator() {
    let file = write_corpus("# sent_id = lonely\n\n");
    let doc = read_document(file.path()).expect("read document");
    let registry = TagsetRegistry::with_embedded().expect("embedded tagset");
    let tagset = registry.get_active_tagset().expect("active tagset");

    assert_eq!(doc.len(), 1);
    assert!(validate_document(&doc, tagset, ValidateOptions::default()).is_err());
}

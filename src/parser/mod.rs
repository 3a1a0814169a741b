//! CoNLL-U Reader
//!
//! Builds a [`Document`] from CoNLL-U text. Columns are kept as written,
//! apart from `_` which means "absent" everywhere except FEATS.

pub mod ast;
pub mod lexer;

use std::path::Path;

pub use ast::{Document, Sentence, Token, Word, EMPTY_FIELD};
pub use lexer::{classify_line, Line, LineKind};

use crate::error::ParseError;

/// Parse a complete CoNLL-U document
pub fn parse_document(content: &str) -> Result<Document, ParseError> {
    let mut sentences = Vec::new();
    let mut builder = SentenceBuilder::default();

    for (line_idx, raw) in content.lines().enumerate() {
        let line_number = line_idx + 1;
        let line = classify_line(raw);

        match line.kind {
            LineKind::Blank => {
                if let Some(sentence) = builder.finish() {
                    sentences.push(sentence);
                }
                builder = SentenceBuilder::default();
            }
            LineKind::Comment => builder.add_comment(line.text),
            LineKind::MultiwordToken => builder.add_multiword_token(line.text, line_number)?,
            LineKind::EmptyNode => {
                log::debug!("line {}: skipping empty node", line_number);
            }
            LineKind::Word => builder.add_word(line.text, line_number)?,
        }
    }

    if let Some(sentence) = builder.finish() {
        sentences.push(sentence);
    }

    log::debug!("parsed {} sentences", sentences.len());
    Ok(Document::new(sentences))
}

/// Read and parse a CoNLL-U file
pub fn read_document(path: impl AsRef<Path>) -> Result<Document, ParseError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content)
}

/// Accumulates the lines of one sentence
#[derive(Debug, Default)]
struct SentenceBuilder {
    sent_id: Option<String>,
    text: Option<String>,
    comments: Vec<String>,
    tokens: Vec<Token>,
    words: Vec<Word>,
    /// Last word id covered by the most recent multi-word token
    open_token_end: Option<usize>,
}

impl SentenceBuilder {
    fn add_comment(&mut self, line: &str) {
        let comment = line.trim_start_matches('#');
        match lexer::comment_key_value(comment) {
            Some(("sent_id", value)) => self.sent_id = Some(value.to_string()),
            Some(("text", value)) => self.text = Some(value.to_string()),
            _ => {}
        }
        self.comments.push(comment.trim().to_string());
    }

    fn add_multiword_token(&mut self, text: &str, line_number: usize) -> Result<(), ParseError> {
        let columns = checked_columns(text, line_number)?;
        let (start, end) = lexer::parse_range(columns[0]).ok_or_else(|| ParseError::InvalidId {
            line: line_number,
            id: columns[0].to_string(),
        })?;

        self.tokens.push(Token {
            word_ids: start..=end,
            text: columns[1].to_string(),
            spaces_after: spaces_after(columns[9]),
        });
        self.open_token_end = Some(end);
        Ok(())
    }

    fn add_word(&mut self, text: &str, line_number: usize) -> Result<(), ParseError> {
        let columns = checked_columns(text, line_number)?;

        let id: usize = columns[0].parse().map_err(|_| ParseError::InvalidId {
            line: line_number,
            id: columns[0].to_string(),
        })?;
        let expected = self.words.len() + 1;
        if id != expected {
            return Err(ParseError::UnexpectedId {
                line: line_number,
                expected,
                found: id,
            });
        }

        let head = match columns[6] {
            EMPTY_FIELD | "" => None,
            head => Some(head.parse().map_err(|_| ParseError::InvalidHead {
                line: line_number,
                head: head.to_string(),
            })?),
        };

        let inside_token = self.open_token_end.is_some_and(|end| id <= end);
        if !inside_token {
            self.open_token_end = None;
            self.tokens.push(Token {
                word_ids: id..=id,
                text: columns[1].to_string(),
                spaces_after: spaces_after(columns[9]),
            });
        }

        self.words.push(Word {
            id,
            text: columns[1].to_string(),
            lemma: optional(columns[2]),
            upos: optional(columns[3]),
            xpos: optional(columns[4]),
            feats: Some(columns[5].to_string()),
            head,
            deprel: optional(columns[7]),
            misc: optional(columns[9]),
            token: self.tokens.len() - 1,
            line_number: Some(line_number),
        });
        Ok(())
    }

    fn finish(self) -> Option<Sentence> {
        if self.words.is_empty() && self.comments.is_empty() {
            return None;
        }

        let mut sentence = Sentence {
            sent_id: self.sent_id.unwrap_or_default(),
            text: String::new(),
            comments: self.comments,
            tokens: self.tokens,
            words: self.words,
        };
        sentence.text = match self.text {
            Some(text) => text,
            None => sentence.rebuild_text(),
        };
        Some(sentence)
    }
}

fn checked_columns(text: &str, line_number: usize) -> Result<Vec<&str>, ParseError> {
    let columns = lexer::split_columns(text);
    if columns.len() != lexer::COLUMN_COUNT {
        return Err(ParseError::ColumnCount {
            line: line_number,
            found: columns.len(),
        });
    }
    Ok(columns)
}

fn optional(column: &str) -> Option<String> {
    if column == EMPTY_FIELD {
        None
    } else {
        Some(column.to_string())
    }
}

/// Spacing after a token, taken from its MISC column
fn spaces_after(misc: &str) -> String {
    let mut spaces = " ".to_string();
    for entry in misc.split('|') {
        if entry == "SpaceAfter=No" {
            return String::new();
        }
        if let Some(value) = entry.strip_prefix("SpacesAfter=") {
            spaces = lexer::decode_spaces(value);
        }
    }
    spaces
}

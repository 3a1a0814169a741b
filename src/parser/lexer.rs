//! CoNLL-U Lexer
//!
//! Classifies each line of a CoNLL-U file and splits word lines into their
//! columns. No sentence assembly here.

/// Number of tab-separated columns on a word line
pub const COLUMN_COUNT: usize = 10;

/// Kinds of lines in a CoNLL-U file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    /// Whitespace-only line, ends the current sentence
    Blank,
    /// `#` comment line
    Comment,
    /// Word line with an integer id
    Word,
    /// Multi-word token line, id is a range like `3-4`
    MultiwordToken,
    /// Empty node line, id is a decimal like `5.1`
    EmptyNode,
}

/// A classified line with its content
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    pub kind: LineKind,
    pub text: &'a str,
}

/// Classify a single line. Trailing `\r` is removed.
pub fn classify_line(line: &str) -> Line<'_> {
    let text = line.trim_end_matches(['\r', '\n']);

    let kind = if text.trim().is_empty() {
        LineKind::Blank
    } else if text.starts_with('#') {
        LineKind::Comment
    } else {
        let id = text.split('\t').next().unwrap_or("");
        if id.contains('-') {
            LineKind::MultiwordToken
        } else if id.contains('.') {
            LineKind::EmptyNode
        } else {
            LineKind::Word
        }
    };

    Line { kind, text }
}

/// Split a word or token line into its columns
pub fn split_columns(text: &str) -> Vec<&str> {
    text.split('\t').collect()
}

/// Parse a multi-word token id like `3-4`
pub fn parse_range(id: &str) -> Option<(usize, usize)> {
    let (start, end) = id.split_once('-')?;
    let start = start.parse().ok()?;
    let end = end.parse().ok()?;
    if start <= end { Some((start, end)) } else { None }
}

/// Split a comment line into key and value, for `# key = value` comments
pub fn comment_key_value(comment: &str) -> Option<(&str, &str)> {
    let (key, value) = comment.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, value.trim()))
}

/// Decode the whitespace encoded in a MISC `SpacesAfter=` value
pub fn decode_spaces(value: &str) -> String {
    let mut decoded = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('s') => decoded.push(' '),
            Some('t') => decoded.push('\t'),
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('p') => decoded.push('|'),
            Some(other) => decoded.push(other),
            None => decoded.push('\\'),
        }
    }
    decoded
}

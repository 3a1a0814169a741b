//! Corpus Data Model
//!
//! Plain data for a parsed CoNLL-U corpus. No validation logic here: the
//! validator reads these types and never mutates them.

use std::ops::RangeInclusive;

/// Placeholder used by CoNLL-U for an empty column
pub const EMPTY_FIELD: &str = "_";

/// An ordered sequence of sentences, in corpus order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub sentences: Vec<Sentence>,
}

/// A sentence with its comments, surface tokens and syntactic words
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    /// Value of the `# sent_id =` comment, empty if missing
    pub sent_id: String,
    /// Value of the `# text =` comment, rebuilt from the tokens if missing
    pub text: String,
    /// Comment lines without the leading `#`
    pub comments: Vec<String>,
    /// Surface tokens; a multi-word token covers several words
    pub tokens: Vec<Token>,
    /// Syntactic words, `words[i].id == i + 1`
    pub words: Vec<Word>,
}

/// A surface token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Ids of the words this token covers
    pub word_ids: RangeInclusive<usize>,
    pub text: String,
    /// Whitespace after the token; empty means `SpaceAfter=No`
    pub spaces_after: String,
}

/// A syntactic word
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// 1-based position within the sentence
    pub id: usize,
    pub text: String,
    pub lemma: Option<String>,
    pub upos: Option<String>,
    pub xpos: Option<String>,
    /// Raw FEATS column; `Some("_")` and `Some("")` are kept as written
    pub feats: Option<String>,
    /// Id of the governing word, 0 for the sentence root
    pub head: Option<usize>,
    pub deprel: Option<String>,
    pub misc: Option<String>,
    /// Index into [`Sentence::tokens`] of the token holding this word
    pub token: usize,
    /// 1-based line in the source file, when read from one
    pub line_number: Option<usize>,
}

impl Document {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl Sentence {
    /// Build a sentence with one token per word, each followed by a space.
    /// The sentence text is the words joined by spaces.
    pub fn from_words(sent_id: &str, words: Vec<Word>) -> Self {
        let mut tokens = Vec::with_capacity(words.len());
        let mut words = words;
        for (idx, word) in words.iter_mut().enumerate() {
            word.id = idx + 1;
            word.token = idx;
            tokens.push(Token {
                word_ids: word.id..=word.id,
                text: word.text.clone(),
                spaces_after: " ".to_string(),
            });
        }

        let mut sentence = Self {
            sent_id: sent_id.to_string(),
            text: String::new(),
            comments: Vec::new(),
            tokens,
            words,
        };
        sentence.text = sentence.rebuild_text();
        sentence
    }

    /// Surface text reconstructed from the tokens and their spacing
    pub fn rebuild_text(&self) -> String {
        let mut text = String::new();
        for (idx, token) in self.tokens.iter().enumerate() {
            text.push_str(&token.text);
            if idx + 1 < self.tokens.len() {
                text.push_str(&token.spaces_after);
            }
        }
        text
    }

    /// The token holding `word`
    pub fn token_of(&self, word: &Word) -> Option<&Token> {
        self.tokens.get(word.token)
    }

    /// Whether the word at `word_idx` is followed by a no-space join.
    ///
    /// Only the last word of a token carries the token's spacing; words
    /// inside a multi-word token are never joined to the next word by
    /// `SpaceAfter=No`.
    pub fn no_space_after(&self, word_idx: usize) -> bool {
        let Some(word) = self.words.get(word_idx) else {
            return false;
        };
        match self.token_of(word) {
            Some(token) => *token.word_ids.end() == word.id && token.spaces_after.is_empty(),
            None => false,
        }
    }

    /// Mark the token holding the word at `word_idx` as `SpaceAfter=No`
    pub fn set_no_space_after(&mut self, word_idx: usize) {
        if let Some(token_idx) = self.words.get(word_idx).map(|w| w.token) {
            if let Some(token) = self.tokens.get_mut(token_idx) {
                token.spaces_after.clear();
            }
        }
        self.text = self.rebuild_text();
    }

    /// Look up a word by its 1-based id
    pub fn word(&self, id: usize) -> Option<&Word> {
        id.checked_sub(1).and_then(|idx| self.words.get(idx))
    }
}

impl Word {
    /// A word with only its surface form set. Use the builder methods to
    /// fill in the annotation columns.
    pub fn new(text: &str) -> Self {
        Self {
            id: 0,
            text: text.to_string(),
            lemma: None,
            upos: None,
            xpos: None,
            feats: None,
            head: None,
            deprel: None,
            misc: None,
            token: 0,
            line_number: None,
        }
    }

    pub fn upos(mut self, upos: &str) -> Self {
        self.upos = Some(upos.to_string());
        self
    }

    pub fn xpos(mut self, xpos: &str) -> Self {
        self.xpos = Some(xpos.to_string());
        self
    }

    pub fn feats(mut self, feats: &str) -> Self {
        self.feats = Some(feats.to_string());
        self
    }

    pub fn head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    pub fn deprel(mut self, deprel: &str) -> Self {
        self.deprel = Some(deprel.to_string());
        self
    }

    pub fn is_upos(&self, tag: &str) -> bool {
        self.upos.as_deref() == Some(tag)
    }

    pub fn is_root(&self) -> bool {
        self.deprel.as_deref() == Some("root")
    }

    /// Feature tokens, or an empty list when the column is absent or `_`
    pub fn feature_list(&self) -> Vec<&str> {
        match self.feats.as_deref() {
            None | Some(EMPTY_FIELD) | Some("") => Vec::new(),
            Some(feats) => feats.split('|').collect(),
        }
    }
}

//! Tokenization and normalization.
//!
//! A token is a maximal run of ASCII alphanumerics that may contain an
//! apostrophe when the apostrophe sits between two alphanumerics, so
//! `don't` is one token while `'quoted'` yields `quoted`. Every other
//! character, including all non-ASCII characters, separates tokens.

/// Maximum length of a normalized word, in bytes.
pub const MAX_WORD_LEN: usize = 49;

/// Lazy iterator over the raw tokens of a text.
///
/// Calling [`Tokens::new`] again on the same text restarts the sequence.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// Create a token iterator over `text`.
    pub const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() && !bytes[self.pos].is_ascii_alphanumeric() {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            let embedded_apostrophe = b == b'\''
                && bytes
                    .get(self.pos + 1)
                    .is_some_and(u8::is_ascii_alphanumeric);
            if b.is_ascii_alphanumeric() || embedded_apostrophe {
                self.pos += 1;
            } else {
                break;
            }
        }

        // Both ends sit on ASCII bytes, so the slice is on char boundaries.
        Some(&self.text[start..self.pos])
    }
}

/// Normalize a token into a frequency-table key.
///
/// Lowercases, drops every non-alphanumeric character (including the
/// embedded apostrophe) and truncates to [`MAX_WORD_LEN`] bytes. May return
/// an empty string, which callers discard.
pub fn normalize_word(token: &str) -> String {
    token
        .bytes()
        .filter(u8::is_ascii_alphanumeric)
        .take(MAX_WORD_LEN)
        .map(|b| char::from(b.to_ascii_lowercase()))
        .collect()
}

/// Character, line and sentence counts for a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCounts {
    /// Number of characters.
    pub chars: usize,
    /// Number of `\n` plus one for a trailing unterminated line.
    pub lines: usize,
    /// Number of sentence terminators (`.`, `!`, `?`).
    pub sentences: usize,
}

impl TextCounts {
    /// Count characters, lines and sentence terminators in one pass.
    pub fn scan(text: &str) -> Self {
        let mut counts = Self::default();
        for ch in text.chars() {
            counts.chars += 1;
            match ch {
                '\n' => counts.lines += 1,
                c if is_sentence_terminator(c) => counts.sentences += 1,
                _ => {}
            }
        }
        if !text.is_empty() && !text.ends_with('\n') {
            counts.lines += 1;
        }
        counts
    }
}

/// Whether `ch` ends a sentence.
pub const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

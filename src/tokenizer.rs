//! Tokenization seam.
//!
//! The engine only needs tokens with character spans and lemmas, so the
//! trait is deliberately small. [`SimpleTokenizer`] is the built-in
//! rule-based implementation; linguistic pipelines can be plugged in
//! per language through the builder.

/// A token produced by a [`Tokenizer`], with its character offset in the
/// source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appeared in the input
    pub text: String,
    /// Character (not byte) offset of the token start
    pub start: usize,
    /// Lemma assigned by the tokenizer
    pub lemma: String,
    /// Whether whitespace followed this token
    pub whitespace_follows: bool,
    /// Whether the token is whitespace-only
    pub is_space: bool,
    /// Whether the token is a single punctuation mark
    pub is_punct: bool,
}

impl Token {
    /// Length of the token in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits text into tokens and assigns lemmas.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`. Concatenating token texts and the whitespace
    /// implied by `whitespace_follows` need not reproduce the input;
    /// the engine splices by character spans instead.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Lemma of a standalone word (used for substrings of a token)
    fn lemmatize(&self, word: &str) -> String {
        word.to_lowercase()
    }

    /// Placeholder lemma this tokenizer emits for pronouns, if any
    fn pronoun_placeholder(&self) -> Option<&str> {
        None
    }
}

/// Rule-based tokenizer: words are maximal runs of alphanumerics and
/// underscores, every other non-space character is its own punctuation
/// token, and lemmas are lower-cased surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens: Vec<Token> = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if chars[i].is_whitespace() {
                if let Some(last) = tokens.last_mut() {
                    last.whitespace_follows = true;
                }
                i += 1;
                continue;
            }

            let start = i;
            if is_word_char(chars[i]) {
                while i < chars.len() && is_word_char(chars[i]) {
                    i += 1;
                }
            } else {
                i += 1;
            }

            let text: String = chars[start..i].iter().collect();
            let is_punct = !is_word_char(chars[start]);
            tokens.push(Token {
                lemma: text.to_lowercase(),
                text,
                start,
                whitespace_follows: false,
                is_space: false,
                is_punct,
            });
        }

        tokens
    }
}

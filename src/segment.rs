//! Splitting mixed-language text into per-language segments.
//!
//! Detection works on whole stretches of text, so the splitter bisects
//! at token boundaries and recurses until each piece detects as a
//! single configured language. Concatenating the segments always
//! reproduces the input exactly.

use crate::lexical::LanguageDetector;

/// A stretch of text attributed to one language, or to none when
/// detection finds no configured language in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub language: Option<String>,
    pub text: String,
}

/// Split `text` into tokens at word boundaries: maximal runs of
/// alphanumerics and underscores, every other character by itself.
/// The tokens concatenate back to the input.
fn boundary_tokens(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let start = i;
        if chars[i].is_alphanumeric() || chars[i] == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
        } else {
            i += 1;
        }
        tokens.push(chars[start..i].iter().collect());
    }

    tokens
}

/// Attributes language segments using a [`LanguageDetector`].
pub struct LanguageSplitter<'a> {
    languages: &'a [String],
    detector: Option<&'a dyn LanguageDetector>,
    multilingual: bool,
}

impl<'a> LanguageSplitter<'a> {
    pub fn new(
        languages: &'a [String],
        detector: Option<&'a dyn LanguageDetector>,
        multilingual: bool,
    ) -> Self {
        Self {
            languages,
            detector,
            multilingual,
        }
    }

    /// Configured languages detected in `text`, best first. Detection
    /// that yields nothing falls back to the primary language before
    /// the configured-language filter is applied.
    pub fn detect(&self, text: &str) -> Vec<String> {
        let detector = match (self.multilingual, self.detector) {
            (true, Some(detector)) => detector,
            _ => return self.languages.first().cloned().into_iter().collect(),
        };

        let mut detected: Vec<String> = Vec::new();
        for (code, _confidence) in detector.detect(text) {
            if !detected.contains(&code) {
                detected.push(code);
            }
        }
        if detected.is_empty() {
            detected.extend(self.languages.first().cloned());
        }
        detected.retain(|code| self.languages.contains(code));
        detected
    }

    /// Split `text` into language segments. Without multilingual
    /// analysis the whole text is one segment in the primary language.
    pub fn split(&self, text: &str) -> Vec<Segment> {
        if !self.multilingual || self.detector.is_none() {
            return vec![Segment {
                language: self.languages.first().cloned(),
                text: text.to_string(),
            }];
        }
        self.split_recursive(text)
    }

    fn split_recursive(&self, text: &str) -> Vec<Segment> {
        let detected = self.detect(text);
        if detected.is_empty() {
            return vec![Segment {
                language: None,
                text: text.to_string(),
            }];
        }

        let tokens = boundary_tokens(text);
        if detected.len() == 1 || tokens.len() <= 1 {
            return vec![Segment {
                language: Some(detected[0].clone()),
                text: text.to_string(),
            }];
        }

        let midpoint = tokens.len() / 2;
        let left: String = tokens[..midpoint].concat();
        let right: String = tokens[midpoint..].concat();

        let mut segments = self.split_recursive(&left);
        for segment in self.split_recursive(&right) {
            match segments.last_mut() {
                Some(last) if last.language == segment.language => {
                    last.text.push_str(&segment.text);
                }
                _ => segments.push(segment),
            }
        }
        segments
    }
}

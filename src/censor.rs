//! The per-token censoring state machine.
//!
//! A token is scanned substring by substring, longest first then
//! leftmost, each candidate expanded into its lexical forms and tested
//! against the exact dictionary and, with deep analysis, the fuzzy
//! index. A hit rewrites the token and restarts the scan; a pass with
//! no rewrite settles the token.

use crate::cache::CensorCache;
use crate::config::Config;
use crate::dictionary::WordListStore;
use crate::distance::{opcodes, OpKind};
use crate::lexical::LexicalResolver;
use crate::tokenizer::{Token, Tokenizer};
use crate::word::Word;
use tracing::trace;

/// Censors single tokens against the dictionary store.
///
/// Borrows one configuration bundle; the engine constructs a fresh
/// `Censorer` per call under its read lock.
pub struct Censorer<'a> {
    config: &'a Config,
    deep: bool,
    store: &'a WordListStore,
    resolver: &'a LexicalResolver<'a>,
    tokenizer: &'a dyn Tokenizer,
    cache: &'a CensorCache,
}

impl<'a> Censorer<'a> {
    pub fn new(
        config: &'a Config,
        deep: bool,
        store: &'a WordListStore,
        resolver: &'a LexicalResolver<'a>,
        tokenizer: &'a dyn Tokenizer,
        cache: &'a CensorCache,
    ) -> Self {
        Self {
            config,
            deep,
            store,
            resolver,
            tokenizer,
            cache,
        }
    }

    fn repeated_censor(&self, length: usize) -> String {
        std::iter::repeat(self.config.censor_char).take(length).collect()
    }

    /// Mask only the part of `word` that aligns with `root`.
    ///
    /// The edit script between the lower-cased word and the root marks
    /// surplus characters at either end as deletes or inserts; the span
    /// between them is the matched part and gets masked.
    fn censor_part(&self, word: &str, root: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let lowered = word.to_lowercase();
        // Case folding that changes length breaks index alignment
        if lowered.chars().count() != chars.len() {
            return self.repeated_censor(chars.len());
        }

        let script = opcodes(&lowered, root);
        let start = match script.first() {
            Some(op) if matches!(op.kind, OpKind::Delete | OpKind::Insert) => op.source.end,
            _ => 0,
        };
        let finish = match script.last() {
            Some(op) if matches!(op.kind, OpKind::Delete | OpKind::Insert) => op.source.start,
            _ => chars.len(),
        };

        chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| {
                if i >= start && i < finish {
                    self.config.censor_char
                } else {
                    ch
                }
            })
            .collect()
    }

    fn mask(&self, surface: &str, root: &str) -> String {
        if self.config.censor_whole_words {
            self.repeated_censor(surface.chars().count())
        } else {
            self.censor_part(surface, root)
        }
    }

    /// Evaluate one candidate string against the dictionaries.
    ///
    /// Returns the censored result and whether the candidate was proven
    /// to contain no profanity anywhere inside (which lets the caller
    /// drop all of its substrings from the scan).
    pub fn censor_step(&self, hint: Option<&str>, surface: &str, lemma: &str) -> (Word, bool) {
        let mut forms =
            self.resolver
                .forms(surface, lemma, hint, self.tokenizer.pronoun_placeholder());

        if self.deep {
            // Obfuscated spellings hide behind digits and symbols, so
            // the letters-only renderings join the candidate set
            let reduced: Vec<String> = forms
                .iter()
                .map(|form| self.resolver.keep_only_letters_or_dictionary_word(hint, form))
                .filter(|reduced| !reduced.is_empty() && !forms.contains(reduced))
                .collect();
            for rendering in reduced {
                for form in self.resolver.forms(&rendering, &rendering, hint, None) {
                    if !forms.contains(&form) {
                        forms.push(form);
                    }
                }
            }
        }

        if !forms.is_empty() && forms.iter().all(|form| self.cache.is_clean(form)) {
            return (Word::clean(surface), true);
        }

        if let Some(cached) = self.cache.get_word(surface) {
            return (cached, false);
        }

        for form in &forms {
            if self.store.is_profane_word(hint, form) {
                let word = Word::censored_from(surface, self.mask(surface, form), form.clone());
                self.cache.put_word(surface, &word);
                return (word, false);
            }
        }

        if self.deep {
            if forms
                .iter()
                .any(|form| self.resolver.is_dictionary_word(hint, form))
            {
                return (Word::clean(surface), true);
            }

            if let Some(index) = self.store.resolve_index(hint) {
                for form in &forms {
                    let tolerance = self.config.tolerance(form.chars().count());
                    let matches = index.find_within(form, tolerance);
                    if let Some(root) = matches.first() {
                        trace!(form, root, tolerance, "fuzzy match");
                        let word =
                            Word::censored_from(surface, self.mask(surface, root), root.clone());
                        self.cache.put_word(surface, &word);
                        return (word, false);
                    }
                }
            }
        }

        (Word::clean(surface), false)
    }

    /// Censor one token, scanning its substrings when deep analysis is
    /// on. Returns a [`Word`] over the full token text.
    pub fn censor_token(&self, hint: Option<&str>, token: &Token) -> Word {
        let surface = &token.text;

        if !self.deep {
            let (word, _) = self.censor_step(hint, surface, &token.lemma);
            return word;
        }

        let original: Vec<char> = surface.chars().collect();
        let mut censored = original.clone();
        let mut root: Option<String> = None;

        loop {
            let previous = censored.clone();
            let length = previous.len();
            // Spans proven clean this pass; substrings inside them are
            // skipped instead of re-evaluated
            let mut drops: Vec<(usize, usize)> = Vec::new();
            let mut changed = false;

            'scan: for span_length in (1..=length).rev() {
                for start in 0..=(length - span_length) {
                    let finish = start + span_length;
                    let span: String = previous[start..finish].iter().collect();

                    if span.chars().all(|ch| ch == self.config.censor_char) {
                        continue;
                    }
                    if drops
                        .iter()
                        .any(|&(drop_start, drop_finish)| drop_start <= start && finish <= drop_finish)
                    {
                        continue;
                    }

                    let lemma = self.tokenizer.lemmatize(&span);
                    let (word, no_profanity_inside) = self.censor_step(hint, &span, &lemma);
                    if no_profanity_inside {
                        drops.push((start, finish));
                    }
                    if word.is_profane() {
                        root.get_or_insert_with(|| {
                            word.original_profane_word.clone().unwrap_or_else(|| span.clone())
                        });
                        if self.config.censor_whole_words {
                            censored = vec![self.config.censor_char; original.len()];
                        } else {
                            let mut rewritten = previous[..start].to_vec();
                            rewritten.extend(word.censored.chars());
                            rewritten.extend_from_slice(&previous[finish..]);
                            censored = rewritten;
                        }
                        changed = censored != previous;
                        break 'scan;
                    }
                }
            }

            if !changed {
                break;
            }
        }

        let censored_text: String = censored.into_iter().collect();
        if censored_text == *surface {
            if !self.resolver.is_dictionary_word(hint, surface) {
                self.cache.add_clean(surface);
            }
            Word::clean(surface.clone())
        } else {
            let word = Word {
                uncensored: surface.clone(),
                censored: censored_text,
                original_profane_word: root,
            };
            self.cache.put_word(surface, &word);
            word
        }
    }
}

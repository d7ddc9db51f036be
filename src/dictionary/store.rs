//! Layered profane word lists and their fuzzy-search indexes.
//!
//! Each language resolves to three layers: the built-in list shipped with
//! the crate, an optional custom list that replaces it, and an optional
//! extra list that is always unioned in. The effective dictionary is
//! `custom-or-built-in ∪ extra`, lower-cased, ordered, duplicate-free.

use crate::automaton::FuzzyIndex;
use crate::config::ConfigError;
use rustc_hash::{FxHashMap, FxHashSet};

/// Built-in word list resources: one plain-text file per language,
/// one trimmed word per line.
const BUILTIN_WORD_LISTS: &[(&str, &str)] = &[
    ("en", include_str!("../../data/en_profane_words.txt")),
    ("ru", include_str!("../../data/ru_profane_words.txt")),
];

/// An ordered, duplicate-free set of lower-cased words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    order: Vec<String>,
    set: FxHashSet<String>,
}

impl WordList {
    /// Build from words: trimmed, lower-cased, empties skipped,
    /// first occurrence wins.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = WordList::default();
        for word in words {
            list.push(word.as_ref());
        }
        list
    }

    fn push(&mut self, word: &str) {
        let normalized = word.trim().to_lowercase();
        if !normalized.is_empty() && self.set.insert(normalized.clone()) {
            self.order.push(normalized);
        }
    }

    /// Union another list into this one, preserving order
    pub fn extend_from(&mut self, other: &WordList) {
        for word in &other.order {
            self.push(word);
        }
    }

    /// Membership test (the query must already be a dictionary form;
    /// words are stored lower-cased)
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word)
    }

    /// Iterate words in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the list holds no words
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Parse a plain-text word list resource: one trimmed word per line,
/// empty lines skipped.
pub fn parse_word_list(text: &str) -> WordList {
    WordList::from_words(text.lines())
}

/// Per-language word lists plus derived fuzzy indexes.
///
/// Mutations only stage data; [`WordListStore::rebuild`] recomputes the
/// effective dictionaries, the shared alphabet, and (when deep analysis
/// is on) the per-language indexes in one pass. Callers must rebuild
/// after any mutation and before any lookup.
#[derive(Debug, Clone, Default)]
pub struct WordListStore {
    languages: Vec<String>,
    custom: FxHashMap<String, WordList>,
    extra: FxHashMap<String, WordList>,
    effective: FxHashMap<String, WordList>,
    indexes: FxHashMap<String, FuzzyIndex>,
}

impl WordListStore {
    /// Create a store for the configured languages
    pub fn new(languages: &[String]) -> Self {
        Self {
            languages: languages.to_vec(),
            ..Self::default()
        }
    }

    /// Load the built-in list for a language, if the crate ships one
    pub fn builtin(language: &str) -> Option<WordList> {
        BUILTIN_WORD_LISTS
            .iter()
            .find(|(code, _)| *code == language)
            .map(|(_, text)| parse_word_list(text))
    }

    /// Swap the configured language list (staged; rebuild required)
    pub fn set_languages(&mut self, languages: &[String]) {
        self.languages = languages.to_vec();
    }

    /// Replace the custom layer (staged; rebuild required)
    pub fn set_custom(&mut self, custom: FxHashMap<String, Vec<String>>) {
        self.custom = custom
            .into_iter()
            .map(|(language, words)| (language, WordList::from_words(words)))
            .collect();
    }

    /// Replace the extra layer (staged; rebuild required)
    pub fn set_extra(&mut self, extra: FxHashMap<String, Vec<String>>) {
        self.extra = extra
            .into_iter()
            .map(|(language, words)| (language, WordList::from_words(words)))
            .collect();
    }

    /// Drop custom and extra layers, reverting to built-ins
    pub fn restore(&mut self) {
        self.custom.clear();
        self.extra.clear();
    }

    /// Current custom layer
    pub fn custom(&self) -> &FxHashMap<String, WordList> {
        &self.custom
    }

    /// Current extra layer
    pub fn extra(&self) -> &FxHashMap<String, WordList> {
        &self.extra
    }

    /// Recompute effective dictionaries and (with `deep`) fuzzy indexes.
    ///
    /// Fails when no configured language resolves any word list at all.
    pub fn rebuild(&mut self, deep: bool) -> Result<(), ConfigError> {
        self.effective.clear();
        self.indexes.clear();

        for language in &self.languages {
            let mut effective = if self.custom.is_empty() {
                Self::builtin(language).unwrap_or_default()
            } else {
                self.custom.get(language).cloned().unwrap_or_default()
            };
            if let Some(extra) = self.extra.get(language) {
                effective.extend_from(extra);
            }
            if !effective.is_empty() {
                self.effective.insert(language.clone(), effective);
            }
        }

        if self.effective.is_empty() {
            return Err(ConfigError::NoProfaneWordLists {
                languages: self.languages.join(", "),
            });
        }

        if deep {
            let alphabet: FxHashSet<char> = self
                .effective
                .values()
                .flat_map(|list| list.iter())
                .flat_map(|word| word.chars())
                .collect();

            for (language, list) in &self.effective {
                self.indexes.insert(
                    language.clone(),
                    FuzzyIndex::new(list.iter(), alphabet.clone()),
                );
            }
        }

        Ok(())
    }

    /// Effective dictionary for a language, if it resolved to any words
    pub fn effective(&self, language: &str) -> Option<&WordList> {
        self.effective.get(language)
    }

    /// Fuzzy index for a language (only present after a deep rebuild)
    pub fn index(&self, language: &str) -> Option<&FuzzyIndex> {
        self.indexes.get(language)
    }

    /// First index resolving for the hint, then configured order
    pub fn resolve_index(&self, hint: Option<&str>) -> Option<&FuzzyIndex> {
        hint.into_iter()
            .chain(self.languages.iter().map(String::as_str))
            .find_map(|language| self.indexes.get(language))
    }

    /// Exact membership of `word` in the hinted language's dictionary,
    /// or in any effective dictionary when the hint is unspecified.
    pub fn is_profane_word(&self, hint: Option<&str>, word: &str) -> bool {
        match hint {
            Some(language) => self
                .effective
                .get(language)
                .is_some_and(|list| list.contains(word)),
            None => self.effective.values().any(|list| list.contains(word)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(languages: &[&str]) -> WordListStore {
        WordListStore::new(&languages.iter().map(|l| l.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_word_list_normalizes() {
        let list = WordList::from_words(["  Shit ", "FUCK", "shit", ""]);
        assert_eq!(list.len(), 2);
        assert!(list.contains("shit"));
        assert!(list.contains("fuck"));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["shit", "fuck"]);
    }

    #[test]
    fn test_parse_word_list_skips_blanks() {
        let list = parse_word_list("shit\n\nfuck\n");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_builtin_lists_load() {
        assert!(WordListStore::builtin("en").is_some_and(|l| l.contains("shit")));
        assert!(WordListStore::builtin("ru").is_some_and(|l| l.contains("бля")));
        assert!(WordListStore::builtin("xx").is_none());
    }

    #[test]
    fn test_effective_is_builtin_by_default() {
        let mut store = store(&["en"]);
        store.rebuild(false).unwrap();
        assert!(store.is_profane_word(Some("en"), "turd"));
        assert!(!store.is_profane_word(Some("en"), "world"));
    }

    #[test]
    fn test_custom_replaces_builtin() {
        let mut store = store(&["en"]);
        let mut custom = FxHashMap::default();
        custom.insert("en".to_string(), vec!["unicorn".to_string()]);
        store.set_custom(custom);
        store.rebuild(false).unwrap();

        assert!(store.is_profane_word(Some("en"), "unicorn"));
        assert!(!store.is_profane_word(Some("en"), "shit"));
    }

    #[test]
    fn test_extra_unions_with_builtin() {
        let mut store = store(&["en"]);
        let mut extra = FxHashMap::default();
        extra.insert("en".to_string(), vec!["hey".to_string()]);
        store.set_extra(extra);
        store.rebuild(false).unwrap();

        assert!(store.is_profane_word(Some("en"), "hey"));
        assert!(store.is_profane_word(Some("en"), "shit"));
    }

    #[test]
    fn test_restore_reverts_to_builtin() {
        let mut store = store(&["en"]);
        let mut custom = FxHashMap::default();
        custom.insert("en".to_string(), vec!["cupcakes".to_string()]);
        store.set_custom(custom);
        store.rebuild(false).unwrap();
        store.restore();
        store.rebuild(false).unwrap();

        assert!(!store.is_profane_word(Some("en"), "cupcakes"));
        assert!(store.is_profane_word(Some("en"), "shit"));
    }

    #[test]
    fn test_unknown_hint_falls_back_to_nothing() {
        let mut store = store(&["en"]);
        store.rebuild(false).unwrap();
        assert!(!store.is_profane_word(Some("fi"), "shit"));
        // Unspecified hint searches every dictionary
        assert!(store.is_profane_word(None, "shit"));
    }

    #[test]
    fn test_no_resolvable_lists_is_fatal() {
        let mut store = store(&["xx"]);
        assert!(matches!(
            store.rebuild(false),
            Err(ConfigError::NoProfaneWordLists { .. })
        ));
    }

    #[test]
    fn test_indexes_built_only_when_deep() {
        let mut store = store(&["en"]);
        store.rebuild(false).unwrap();
        assert!(store.index("en").is_none());
        store.rebuild(true).unwrap();
        assert!(store.index("en").is_some());
        assert_eq!(store.index("en").unwrap().find_within("fuk", 1), vec!["fuck"]);
    }

    #[test]
    fn test_resolve_index_order() {
        let mut store = store(&["en", "ru"]);
        store.rebuild(true).unwrap();
        // Unknown hint falls through to the first configured language
        assert!(store.resolve_index(Some("fi")).is_some());
        assert!(store.resolve_index(None).is_some());
    }
}

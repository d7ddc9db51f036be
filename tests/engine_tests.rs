//! End-to-end tests of the engine against realistic text.
//!
//! Deep analysis without a spell checker cannot tell real words from
//! obfuscated profanity, so sentence-level tests install a small
//! vocabulary-backed spell checker the way a production deployment
//! installs hunspell.

use profanity_filter::{
    AnalysisType, CacheError, CacheStore, Config, ConfigError, LanguageDetector, ProfanityFilter,
    SpellChecker, Word,
};
use rustc_hash::FxHashMap;
use std::sync::Arc;

const TEST_STATEMENT: &str = "Hey, I like unicorns, chocolate, oranges and man's blood, Turd!";
const CLEAN_STATEMENT: &str = "Hey there, I like chocolate too mate.";

/// Spell checker over a fixed vocabulary, stemming plurals by
/// stripping a trailing "s".
struct VocabSpell {
    words: Vec<&'static str>,
}

impl VocabSpell {
    fn english() -> Arc<dyn SpellChecker> {
        Arc::new(VocabSpell {
            words: vec![
                "hey", "there", "i", "like", "unicorn", "unicorns", "chocolate", "orange",
                "oranges", "and", "man", "blood", "too", "mate", "duck", "world", "day", "dick",
            ],
        })
    }
}

impl SpellChecker for VocabSpell {
    fn is_valid(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase().as_str())
    }

    fn stems(&self, word: &str) -> Vec<Vec<u8>> {
        let lowered = word.to_lowercase();
        let mut stems = vec![lowered.as_bytes().to_vec()];
        if let Some(singular) = lowered.strip_suffix('s') {
            if self.words.contains(&singular) {
                stems.push(singular.as_bytes().to_vec());
            }
        }
        stems
    }
}

/// Cache backend whose every operation fails.
struct OfflineStore;

impl OfflineStore {
    fn error() -> CacheError {
        CacheError::Backend("store offline".to_string())
    }
}

impl CacheStore for OfflineStore {
    fn get_word(&self, _key: &str) -> Result<Option<Word>, CacheError> {
        Err(Self::error())
    }

    fn put_word(&self, _key: &str, _word: Word) -> Result<(), CacheError> {
        Err(Self::error())
    }

    fn add_clean(&self, _key: &str) -> Result<(), CacheError> {
        Err(Self::error())
    }

    fn is_clean(&self, _key: &str) -> Result<bool, CacheError> {
        Err(Self::error())
    }

    fn flush(&self) -> Result<(), CacheError> {
        Err(Self::error())
    }
}

/// Attributes Cyrillic text to Russian and Latin text to English.
struct ScriptDetector;

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Vec<(String, f64)> {
        let mut codes = Vec::new();
        if text.chars().any(|ch| ('\u{0400}'..='\u{04ff}').contains(&ch)) {
            codes.push(("ru".to_string(), 0.9));
        }
        if text.chars().any(|ch| ch.is_ascii_alphabetic()) {
            codes.push(("en".to_string(), 0.8));
        }
        codes
    }
}

fn english_filter() -> ProfanityFilter {
    ProfanityFilter::builder()
        .spell_checker("en", VocabSpell::english())
        .build()
        .unwrap()
}

fn dictionaries(entries: &[(&str, &[&str])]) -> FxHashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(language, words)| {
            (
                language.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_censor_word() {
    let filter = ProfanityFilter::new().unwrap();

    let world = filter.censor_word("world");
    assert_eq!(world, Word::clean("world"));
    assert!(!world.is_profane());

    let shiiit = filter.censor_word("shiiit");
    assert_eq!(shiiit.censored, "******");
    assert_eq!(shiiit.original_profane_word.as_deref(), Some("shit"));
}

#[test]
fn test_is_profane_and_is_clean() {
    let filter = english_filter();
    assert!(filter.is_profane(TEST_STATEMENT));
    assert!(!filter.is_clean(TEST_STATEMENT));
    assert!(filter.is_clean(CLEAN_STATEMENT));
}

#[test]
fn test_censor_statement() {
    let filter = english_filter();
    assert_eq!(
        filter.censor(TEST_STATEMENT),
        "Hey, I like unicorns, chocolate, oranges and man's blood, ****!"
    );
    assert_eq!(filter.censor(CLEAN_STATEMENT), CLEAN_STATEMENT);
}

#[test]
fn test_censor_char_reconfiguration() {
    let filter = ProfanityFilter::new().unwrap();
    assert_eq!(filter.censor("shit"), "****");

    let config = Config {
        censor_char: '#',
        ..filter.config()
    };
    filter.reconfigure(config).unwrap();
    assert_eq!(filter.censor("shit"), "####");
}

#[test]
fn test_custom_dictionaries_replace_builtin() {
    let filter = english_filter();
    filter
        .set_custom_profane_word_dictionaries(dictionaries(&[(
            "en",
            &["unicorn", "chocolate"],
        )]))
        .unwrap();

    assert_eq!(
        filter.censor(TEST_STATEMENT),
        "Hey, I like ********, *********, oranges and man's blood, Turd!"
    );
}

#[test]
fn test_extra_dictionaries_union_with_builtin() {
    let filter = english_filter();
    filter
        .set_extra_profane_word_dictionaries(dictionaries(&[("en", &["hey", "like"])]))
        .unwrap();

    assert_eq!(
        filter.censor(TEST_STATEMENT),
        "***, I **** unicorns, chocolate, oranges and man's blood, ****!"
    );
}

#[test]
fn test_restore_dictionaries() {
    let filter = english_filter();
    filter
        .set_custom_profane_word_dictionaries(dictionaries(&[("en", &["unicorn"])]))
        .unwrap();
    filter
        .set_extra_profane_word_dictionaries(dictionaries(&[("en", &["like"])]))
        .unwrap();
    assert!(!filter.custom_profane_word_dictionaries().is_empty());
    assert!(!filter.extra_profane_word_dictionaries().is_empty());

    filter.restore_profane_word_dictionaries().unwrap();
    assert!(filter.custom_profane_word_dictionaries().is_empty());
    assert!(filter.extra_profane_word_dictionaries().is_empty());

    assert_eq!(
        filter.censor(TEST_STATEMENT),
        "Hey, I like unicorns, chocolate, oranges and man's blood, ****!"
    );
}

#[test]
fn test_failed_dictionary_mutation_keeps_previous_dictionaries() {
    let filter = english_filter();
    // Warm the cache with one word; the rollback must also protect
    // words that were never cached
    assert_eq!(filter.censor("shit"), "****");

    let result =
        filter.set_custom_profane_word_dictionaries(dictionaries(&[("fi", &["mulkku"])]));
    assert!(matches!(result, Err(ConfigError::NoProfaneWordLists { .. })));

    assert_eq!(filter.censor("turd"), "****");
    assert!(filter.custom_profane_word_dictionaries().is_empty());
}

#[test]
fn test_tokenization_splits_possessive() {
    let filter = english_filter();
    filter
        .set_custom_profane_word_dictionaries(dictionaries(&[("en", &["man"])]))
        .unwrap();

    assert_eq!(filter.censor("man's blood"), "***'s blood");
}

#[test]
fn test_stems_reach_dictionary_roots() {
    let filter = english_filter();
    assert_eq!(filter.censor_word("Dick").censored, "****");
    assert_eq!(filter.censor_word("DICK").censored, "****");
    assert_eq!(filter.censor_word("dicks").censored, "*****");
    assert_eq!(filter.censor_word("fucks").censored, "*****");
}

#[test]
fn test_deep_analysis_obfuscations() {
    let filter = ProfanityFilter::new().unwrap();
    assert_eq!(filter.censor("sh1t"), "****");
    assert_eq!(filter.censor("mulkku0"), "*******");
    assert_eq!(filter.censor("oofucko"), "*******");
    assert_eq!(filter.censor("fuckfuck"), "********");
    assert_eq!(filter.censor("addflxppxpfs"), "addflxppxpfs");
}

#[test]
fn test_deep_analysis_partial_censoring() {
    let filter = ProfanityFilter::builder()
        .censor_whole_words(false)
        .build()
        .unwrap();
    assert_eq!(filter.censor("mulkku0"), "******0");
    assert_eq!(filter.censor("oofucko"), "oo****o");

    let oofuko = filter.censor_word("oofuko");
    assert_eq!(oofuko.censored, "oo***o");
    assert_eq!(oofuko.original_profane_word.as_deref(), Some("fuck"));

    filter
        .set_extra_profane_word_dictionaries(dictionaries(&[("en", &["hor"])]))
        .unwrap();
    assert_eq!(filter.censor("h0r1h0r1"), "***1***1");
}

#[test]
fn test_without_deep_analysis() {
    let filter = ProfanityFilter::builder()
        .analyses(vec![AnalysisType::Morphological, AnalysisType::Multilingual])
        .build()
        .unwrap();
    assert!(!filter.active_analyses().contains(&AnalysisType::Deep));

    assert_eq!(filter.censor("mulkku0"), "mulkku0");
    assert_eq!(filter.censor("shit"), "****");
}

#[test]
fn test_spell_checker_protects_near_miss_words() {
    let filter = english_filter();
    // One edit from "fuck", but a real word
    assert_eq!(filter.censor_word("duck"), Word::clean("duck"));
}

#[test]
fn test_russian() {
    let filter = ProfanityFilter::builder()
        .languages(["ru"])
        .build()
        .unwrap();
    assert_eq!(filter.censor("бля"), "***");
    assert!(filter.is_profane("бля"));
    assert!(filter.is_clean("это просто текст"));
}

#[test]
fn test_multilingual_mixed_text() {
    let filter = ProfanityFilter::builder()
        .languages(["ru", "en"])
        .language_detector(Arc::new(ScriptDetector))
        .build()
        .unwrap();
    assert!(filter
        .active_analyses()
        .contains(&AnalysisType::Multilingual));

    assert_eq!(
        filter.censor("Да бля, это просто shit какой-то!"),
        "Да ***, это просто **** какой-то!"
    );
}

#[test]
fn test_failing_cache_backend_degrades_to_recomputation() {
    let filter = ProfanityFilter::builder()
        .cache_store(Arc::new(OfflineStore))
        .spell_checker("en", VocabSpell::english())
        .build()
        .unwrap();

    assert_eq!(
        filter.censor(TEST_STATEMENT),
        "Hey, I like unicorns, chocolate, oranges and man's blood, ****!"
    );
    assert_eq!(filter.censor_word("shiiit").censored, "******");
    // Every call recomputes from scratch and agrees with the last
    assert_eq!(filter.censor("sh1t"), "****");
    assert_eq!(filter.censor("sh1t"), "****");
    assert!(filter.is_clean(CLEAN_STATEMENT));
}

#[test]
fn test_repeated_calls_are_stable() {
    let filter = english_filter();
    let first = filter.censor(TEST_STATEMENT);
    // Second call hits the cache and clean set
    let second = filter.censor(TEST_STATEMENT);
    assert_eq!(first, second);
}

//! The engine: configuration lifecycle, capability wiring, and the
//! public censor operations.

use crate::cache::{CacheStore, CensorCache, InMemoryStore};
use crate::censor::Censorer;
use crate::config::{AnalysisType, Config, ConfigError, Fingerprint};
use crate::dictionary::WordListStore;
use crate::lexical::{LanguageDetector, LexicalResolver, MorphAnalyzer, SpellChecker};
use crate::segment::LanguageSplitter;
use crate::tokenizer::{SimpleTokenizer, Token, Tokenizer};
use crate::word::Word;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::debug;

static FALLBACK_TOKENIZER: SimpleTokenizer = SimpleTokenizer;

/// Everything a censor call reads, swapped as one bundle on
/// reconfiguration so in-flight calls never observe a partial update.
struct EngineState {
    config: Config,
    active: FxHashSet<AnalysisType>,
    fingerprint: Fingerprint,
    store: WordListStore,
    tokenizers: FxHashMap<String, Arc<dyn Tokenizer>>,
    tokenizers_supplied: bool,
    spells: FxHashMap<String, Arc<dyn SpellChecker>>,
    morphs: FxHashMap<String, Arc<dyn MorphAnalyzer>>,
    detector: Option<Arc<dyn LanguageDetector>>,
    cache: CensorCache,
}

impl EngineState {
    /// Recompute every structure derived from the configuration:
    /// tokenizer bindings, active analyses, dictionaries, indexes, and
    /// the cache fingerprint.
    fn rebuild(&mut self) -> Result<(), ConfigError> {
        self.config.validate()?;

        if self.tokenizers_supplied {
            let resolvable = self
                .config
                .languages
                .iter()
                .any(|language| self.tokenizers.contains_key(language));
            if !resolvable {
                return Err(ConfigError::NoTokenizer {
                    languages: self.config.languages_str(),
                });
            }
        } else {
            self.tokenizers = self
                .config
                .languages
                .iter()
                .map(|language| {
                    (
                        language.clone(),
                        Arc::new(SimpleTokenizer) as Arc<dyn Tokenizer>,
                    )
                })
                .collect();
        }

        let deep = self.config.has_analysis(AnalysisType::Deep);
        let morphological =
            self.config.has_analysis(AnalysisType::Morphological) && !self.morphs.is_empty();
        let multilingual =
            self.config.has_analysis(AnalysisType::Multilingual) && self.detector.is_some();
        if self.config.has_analysis(AnalysisType::Morphological) && !morphological {
            debug!("morphological analysis requested but no analyzers supplied; disabled");
        }
        if self.config.has_analysis(AnalysisType::Multilingual) && !multilingual {
            debug!("multilingual analysis requested but no detector supplied; disabled");
        }

        self.active.clear();
        if deep {
            self.active.insert(AnalysisType::Deep);
        }
        if morphological {
            self.active.insert(AnalysisType::Morphological);
        }
        if multilingual {
            self.active.insert(AnalysisType::Multilingual);
        }

        self.store.set_languages(&self.config.languages);
        self.store.rebuild(deep)?;

        self.fingerprint = Fingerprint::compute(&self.config, deep, morphological, multilingual);
        self.cache.rescope(self.fingerprint);
        debug!(
            languages = %self.config.languages_str(),
            deep, morphological, multilingual,
            "engine rebuilt"
        );
        Ok(())
    }

    fn is_active(&self, analysis: AnalysisType) -> bool {
        self.active.contains(&analysis)
    }

    fn resolve_tokenizer(&self, hint: Option<&str>) -> &dyn Tokenizer {
        hint.into_iter()
            .chain(self.config.languages.iter().map(String::as_str))
            .find_map(|language| self.tokenizers.get(language))
            .or_else(|| self.tokenizers.values().next())
            .map(|tokenizer| tokenizer.as_ref())
            .unwrap_or(&FALLBACK_TOKENIZER)
    }

    /// Shared traversal behind `censor` and `is_profane`.
    fn censor_inner(&self, text: &str, stop_on_first: bool) -> (String, bool) {
        let deep = self.is_active(AnalysisType::Deep);
        let multilingual = self.is_active(AnalysisType::Multilingual);

        let no_morphs = FxHashMap::default();
        let morphs = if self.is_active(AnalysisType::Morphological) {
            &self.morphs
        } else {
            &no_morphs
        };
        let resolver = LexicalResolver::new(&self.config.languages, &self.spells, morphs, deep);

        let detector = if multilingual {
            self.detector.as_deref()
        } else {
            None
        };
        let splitter = LanguageSplitter::new(&self.config.languages, detector, multilingual);

        let mut output = String::new();
        let mut profane = false;
        'segments: for segment in splitter.split(text) {
            let hint = segment.language.as_deref();
            let tokenizer = self.resolve_tokenizer(hint);
            let censorer = Censorer::new(
                &self.config,
                deep,
                &self.store,
                &resolver,
                tokenizer,
                &self.cache,
            );

            let chars: Vec<char> = segment.text.chars().collect();
            let mut rebuilt = String::new();
            let mut cursor = 0;
            for token in tokenizer.tokenize(&segment.text) {
                rebuilt.extend(chars[cursor..token.start].iter());
                cursor = token.start + token.char_len();

                if token.is_space || token.is_punct {
                    rebuilt.push_str(&token.text);
                    continue;
                }
                let word = censorer.censor_token(hint, &token);
                if word.is_profane() {
                    profane = true;
                    if stop_on_first {
                        break 'segments;
                    }
                }
                rebuilt.push_str(&word.censored);
            }
            rebuilt.extend(chars[cursor..].iter());
            output.push_str(&rebuilt);
        }

        (output, profane)
    }
}

/// The profanity filter engine.
///
/// Thread-safe: censor calls share a read lock, while reconfiguration
/// and dictionary mutation take the write lock and swap the derived
/// structures in one step.
pub struct ProfanityFilter {
    state: RwLock<EngineState>,
}

impl ProfanityFilter {
    /// Engine with the default configuration (English, `'*'`, all
    /// analyses requested, whole-word masking)
    pub fn new() -> Result<Self, ConfigError> {
        ProfanityFilterBuilder::default().build()
    }

    pub fn builder() -> ProfanityFilterBuilder {
        ProfanityFilterBuilder::default()
    }

    /// Censor all profanity in `text`
    pub fn censor(&self, text: &str) -> String {
        self.state.read().censor_inner(text, false).0
    }

    /// Whether `text` contains any profanity
    pub fn is_profane(&self, text: &str) -> bool {
        self.state.read().censor_inner(text, true).1
    }

    /// Whether `text` contains no profanity
    pub fn is_clean(&self, text: &str) -> bool {
        !self.is_profane(text)
    }

    /// Censor a single word, returning the full [`Word`] result
    pub fn censor_word(&self, word: &str) -> Word {
        let state = self.state.read();
        let deep = state.is_active(AnalysisType::Deep);

        let no_morphs = FxHashMap::default();
        let morphs = if state.is_active(AnalysisType::Morphological) {
            &state.morphs
        } else {
            &no_morphs
        };
        let resolver = LexicalResolver::new(&state.config.languages, &state.spells, morphs, deep);
        let tokenizer = state.resolve_tokenizer(None);
        let censorer = Censorer::new(
            &state.config,
            deep,
            &state.store,
            &resolver,
            tokenizer,
            &state.cache,
        );

        let token = Token {
            lemma: tokenizer.lemmatize(word),
            text: word.to_string(),
            start: 0,
            whitespace_follows: false,
            is_space: false,
            is_punct: false,
        };
        censorer.censor_token(None, &token)
    }

    /// Swap in a new configuration atomically. On failure the previous
    /// configuration stays in effect.
    pub fn reconfigure(&self, config: Config) -> Result<(), ConfigError> {
        let mut state = self.state.write();
        let previous = std::mem::replace(&mut state.config, config);
        if let Err(error) = state.rebuild() {
            state.config = previous;
            let _ = state.rebuild();
            return Err(error);
        }
        Ok(())
    }

    /// Replace built-in word lists with custom ones. On failure the
    /// previous dictionaries stay in effect.
    pub fn set_custom_profane_word_dictionaries(
        &self,
        custom: FxHashMap<String, Vec<String>>,
    ) -> Result<(), ConfigError> {
        let mut state = self.state.write();
        self.rebuild_dictionaries(&mut state, |store| store.set_custom(custom))
    }

    /// Union extra words into the effective dictionaries. On failure
    /// the previous dictionaries stay in effect.
    pub fn set_extra_profane_word_dictionaries(
        &self,
        extra: FxHashMap<String, Vec<String>>,
    ) -> Result<(), ConfigError> {
        let mut state = self.state.write();
        self.rebuild_dictionaries(&mut state, |store| store.set_extra(extra))
    }

    /// Drop custom and extra dictionaries, reverting to the built-ins
    pub fn restore_profane_word_dictionaries(&self) -> Result<(), ConfigError> {
        let mut state = self.state.write();
        self.rebuild_dictionaries(&mut state, WordListStore::restore)
    }

    /// Stage a word list mutation and rebuild. A failed rebuild swaps
    /// the previous store back, staged layers and built indexes
    /// included, so a rejected mutation leaves lookups untouched.
    fn rebuild_dictionaries(
        &self,
        state: &mut EngineState,
        stage: impl FnOnce(&mut WordListStore),
    ) -> Result<(), ConfigError> {
        let deep = state.config.has_analysis(AnalysisType::Deep);
        let previous = state.store.clone();
        stage(&mut state.store);
        if let Err(error) = state.store.rebuild(deep) {
            state.store = previous;
            return Err(error);
        }
        // Word list contents are not in the fingerprint, so any change
        // to them must drop cached results explicitly
        state.cache.flush();
        Ok(())
    }

    /// Current custom word lists, if any were set
    pub fn custom_profane_word_dictionaries(&self) -> FxHashMap<String, Vec<String>> {
        let state = self.state.read();
        state
            .store
            .custom()
            .iter()
            .map(|(language, list)| {
                (language.clone(), list.iter().map(str::to_string).collect())
            })
            .collect()
    }

    /// Current extra word lists, if any were set
    pub fn extra_profane_word_dictionaries(&self) -> FxHashMap<String, Vec<String>> {
        let state = self.state.read();
        state
            .store
            .extra()
            .iter()
            .map(|(language, list)| {
                (language.clone(), list.iter().map(str::to_string).collect())
            })
            .collect()
    }

    /// Analyses that are both requested and backed by resources
    pub fn active_analyses(&self) -> Vec<AnalysisType> {
        let state = self.state.read();
        AnalysisType::all()
            .into_iter()
            .filter(|analysis| state.active.contains(analysis))
            .collect()
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> Config {
        self.state.read().config.clone()
    }
}

/// Fluent constructor for [`ProfanityFilter`].
#[derive(Default)]
pub struct ProfanityFilterBuilder {
    config: Config,
    censor_char: Option<String>,
    tokenizers: FxHashMap<String, Arc<dyn Tokenizer>>,
    spells: FxHashMap<String, Arc<dyn SpellChecker>>,
    morphs: FxHashMap<String, Arc<dyn MorphAnalyzer>>,
    detector: Option<Arc<dyn LanguageDetector>>,
    cache_store: Option<Arc<dyn CacheStore>>,
    custom: Option<FxHashMap<String, Vec<String>>>,
    extra: Option<FxHashMap<String, Vec<String>>>,
}

impl ProfanityFilterBuilder {
    /// Censor character; must be exactly one character, validated at
    /// build time
    pub fn censor_char(mut self, censor_char: impl Into<String>) -> Self {
        self.censor_char = Some(censor_char.into());
        self
    }

    pub fn censor_whole_words(mut self, censor_whole_words: bool) -> Self {
        self.config.censor_whole_words = censor_whole_words;
        self
    }

    /// Analyses to request; unavailable ones degrade at build time
    pub fn analyses(mut self, analyses: Vec<AnalysisType>) -> Self {
        self.config.analyses = analyses;
        self
    }

    /// Languages in priority order
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_relative_distance(mut self, max_relative_distance: f64) -> Self {
        self.config.max_relative_distance = max_relative_distance;
        self
    }

    /// Bind a tokenizer to a language. Languages without a binding use
    /// [`SimpleTokenizer`] only when no tokenizer was supplied at all.
    pub fn tokenizer(mut self, language: impl Into<String>, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizers.insert(language.into(), tokenizer);
        self
    }

    pub fn spell_checker(
        mut self,
        language: impl Into<String>,
        spell: Arc<dyn SpellChecker>,
    ) -> Self {
        self.spells.insert(language.into(), spell);
        self
    }

    pub fn morph_analyzer(
        mut self,
        language: impl Into<String>,
        morph: Arc<dyn MorphAnalyzer>,
    ) -> Self {
        self.morphs.insert(language.into(), morph);
        self
    }

    pub fn language_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// External cache backend; defaults to [`InMemoryStore`]
    pub fn cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    pub fn custom_profane_word_dictionaries(
        mut self,
        custom: FxHashMap<String, Vec<String>>,
    ) -> Self {
        self.custom = Some(custom);
        self
    }

    pub fn extra_profane_word_dictionaries(
        mut self,
        extra: FxHashMap<String, Vec<String>>,
    ) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn build(self) -> Result<ProfanityFilter, ConfigError> {
        let mut config = self.config;
        if let Some(raw) = self.censor_char {
            config.censor_char = Config::censor_char_from_str(&raw)?;
        }
        config.validate()?;

        let mut store = WordListStore::new(&config.languages);
        if let Some(custom) = self.custom {
            store.set_custom(custom);
        }
        if let Some(extra) = self.extra {
            store.set_extra(extra);
        }

        let cache_store = self
            .cache_store
            .unwrap_or_else(|| Arc::new(InMemoryStore::default()));

        let mut state = EngineState {
            tokenizers_supplied: !self.tokenizers.is_empty(),
            tokenizers: self.tokenizers,
            spells: self.spells,
            morphs: self.morphs,
            detector: self.detector,
            active: FxHashSet::default(),
            fingerprint: Fingerprint::from_raw(0),
            store,
            cache: CensorCache::new(cache_store, Fingerprint::from_raw(0)),
            config,
        };
        state.rebuild()?;

        Ok(ProfanityFilter {
            state: RwLock::new(state),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default() {
        let filter = ProfanityFilter::new().unwrap();
        assert_eq!(filter.config().censor_char, '*');
        // Deep analysis needs nothing beyond the word lists
        assert!(filter.active_analyses().contains(&AnalysisType::Deep));
        // Morphological and multilingual degrade without resources
        assert!(!filter.active_analyses().contains(&AnalysisType::Morphological));
        assert!(!filter.active_analyses().contains(&AnalysisType::Multilingual));
    }

    #[test]
    fn test_build_rejects_bad_censor_char() {
        assert!(matches!(
            ProfanityFilter::builder().censor_char("**").build(),
            Err(ConfigError::InvalidCensorChar(_))
        ));
    }

    #[test]
    fn test_build_rejects_unknown_language() {
        assert!(matches!(
            ProfanityFilter::builder().languages(["xx"]).build(),
            Err(ConfigError::NoProfaneWordLists { .. })
        ));
    }

    #[test]
    fn test_build_rejects_empty_languages() {
        assert!(matches!(
            ProfanityFilter::builder().languages(Vec::<String>::new()).build(),
            Err(ConfigError::NoLanguages)
        ));
    }

    #[test]
    fn test_supplied_tokenizers_must_cover_a_language() {
        let result = ProfanityFilter::builder()
            .tokenizer("ru", Arc::new(SimpleTokenizer))
            .languages(["en"])
            .build();
        assert!(matches!(result, Err(ConfigError::NoTokenizer { .. })));
    }

    #[test]
    fn test_reconfigure_failure_keeps_previous_config() {
        let filter = ProfanityFilter::new().unwrap();
        let bad = Config {
            languages: vec!["xx".to_string()],
            ..Config::default()
        };
        assert!(filter.reconfigure(bad).is_err());
        assert_eq!(filter.config().languages, vec!["en"]);
        assert_eq!(filter.censor("shit"), "****");
    }
}

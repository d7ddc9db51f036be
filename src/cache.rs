//! Censor result caching.
//!
//! Two layers: a [`CacheStore`] backend (fallible, swappable for an
//! external store) and [`CensorCache`], the engine-facing wrapper that
//! scopes every key to the active configuration fingerprint and treats
//! backend failures as misses.

use crate::config::Fingerprint;
use crate::word::Word;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Error from a cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Backend(String),
}

/// Storage backend for censor results.
///
/// Keys arrive already scoped to a configuration fingerprint, so the
/// backend never needs to reason about configuration changes beyond
/// honoring [`CacheStore::flush`].
pub trait CacheStore: Send + Sync {
    fn get_word(&self, key: &str) -> Result<Option<Word>, CacheError>;
    fn put_word(&self, key: &str, word: Word) -> Result<(), CacheError>;
    fn add_clean(&self, key: &str) -> Result<(), CacheError>;
    fn is_clean(&self, key: &str) -> Result<bool, CacheError>;
    fn flush(&self) -> Result<(), CacheError>;
}

/// Default in-process backend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    words: RwLock<FxHashMap<String, Word>>,
    clean: RwLock<FxHashSet<String>>,
}

impl CacheStore for InMemoryStore {
    fn get_word(&self, key: &str) -> Result<Option<Word>, CacheError> {
        Ok(self.words.read().get(key).cloned())
    }

    fn put_word(&self, key: &str, word: Word) -> Result<(), CacheError> {
        self.words.write().insert(key.to_string(), word);
        Ok(())
    }

    fn add_clean(&self, key: &str) -> Result<(), CacheError> {
        self.clean.write().insert(key.to_string());
        Ok(())
    }

    fn is_clean(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.clean.read().contains(key))
    }

    fn flush(&self) -> Result<(), CacheError> {
        self.words.write().clear();
        self.clean.write().clear();
        Ok(())
    }
}

/// Configuration-scoped cache of censor results.
///
/// All operations are best effort: a failing backend degrades to a
/// cache miss (logged at debug), never to an engine error.
pub struct CensorCache {
    store: Arc<dyn CacheStore>,
    fingerprint: Fingerprint,
}

impl CensorCache {
    pub fn new(store: Arc<dyn CacheStore>, fingerprint: Fingerprint) -> Self {
        Self { store, fingerprint }
    }

    fn key(&self, surface: &str) -> String {
        format!("{:016x}:{}", self.fingerprint.as_u64(), surface)
    }

    /// Adopt a new fingerprint, flushing stale entries first
    pub fn rescope(&mut self, fingerprint: Fingerprint) {
        if fingerprint != self.fingerprint {
            self.flush();
            self.fingerprint = fingerprint;
        }
    }

    /// Drop all entries. Dictionary mutations call this directly since
    /// word list contents are not part of the fingerprint.
    pub fn flush(&self) {
        if let Err(error) = self.store.flush() {
            debug!(%error, "cache flush failed; stale entries may linger");
        }
    }

    pub fn get_word(&self, surface: &str) -> Option<Word> {
        match self.store.get_word(&self.key(surface)) {
            Ok(word) => word,
            Err(error) => {
                debug!(%error, surface, "cache read failed; treating as miss");
                None
            }
        }
    }

    pub fn put_word(&self, surface: &str, word: &Word) {
        if let Err(error) = self.store.put_word(&self.key(surface), word.clone()) {
            debug!(%error, surface, "cache write failed; result not stored");
        }
    }

    pub fn add_clean(&self, surface: &str) {
        if let Err(error) = self.store.add_clean(&self.key(surface)) {
            debug!(%error, surface, "clean-set write failed");
        }
    }

    pub fn is_clean(&self, surface: &str) -> bool {
        match self.store.is_clean(&self.key(surface)) {
            Ok(clean) => clean,
            Err(error) => {
                debug!(%error, surface, "clean-set read failed; treating as unknown");
                false
            }
        }
    }
}

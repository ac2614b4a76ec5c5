use std::collections::HashMap;

use super::{Translation, store::CacheKey};

/// Resolved translations kept for the lifetime of a [`Resolver`](super::Resolver).
///
/// Nothing expires on its own. Callers that change the underlying store
/// drop stale entries with [`TranslationCache::invalidate_language`] or
/// [`TranslationCache::clear`].
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<CacheKey, Translation>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&Translation> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: CacheKey, translation: Translation) {
        self.entries.insert(key, translation);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry resolved for `language`. Returns how many were dropped.
    pub fn invalidate_language(&mut self, language: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.language != language);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

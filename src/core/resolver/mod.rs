//! Runtime translation lookup.
//!
//! A lookup walks the language chain (`es-MX`, then `es`, ...) and, at each
//! level, tries domains before contexts from most to least specific:
//! each requested id, then "no value", then "any value". Results are kept in
//! an explicit [`TranslationCache`] and in the store's fast table.

mod cache;
mod plural;
mod store;
mod text;

use std::collections::HashSet;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

pub use cache::TranslationCache;
pub use plural::{format_count, interpolate, select_plural};
pub use store::{
    CacheKey, CachedTranslation, ContextId, Dimension, DomainId, Language, LanguageId,
    MemoryStore, NewTranslation, SourceId, StoreError, StoredTranslation, TranslationQuery,
    TranslationStore,
};
pub use text::{LocaleText, escape_newlines, unescape_newlines};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored translation of {key:?} is not a valid plural array")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: LocaleText,
    /// `false` when `text` is the untranslated source.
    pub is_translated: bool,
    pub is_draft: bool,
    /// Where the stored translation came from, if known.
    pub reference: Option<String>,
}

impl Translation {
    /// The source text itself, flagged as an untranslated draft.
    pub fn identity(source: &LocaleText) -> Self {
        Self {
            text: source.clone(),
            is_translated: false,
            is_draft: true,
            reference: None,
        }
    }

    fn encode(&self) -> CachedTranslation {
        CachedTranslation {
            text: self.text.encode(),
            is_json: self.text.is_json(),
            is_translated: self.is_translated,
            is_draft: self.is_draft,
            reference: self.reference.clone(),
        }
    }

    fn decode(cached: CachedTranslation) -> Result<Self, ResolveError> {
        let text = LocaleText::decode(&cached.text, cached.is_json).map_err(|source| {
            ResolveError::Decode {
                key: cached.text.clone(),
                source,
            }
        })?;
        Ok(Self {
            text,
            is_translated: cached.is_translated,
            is_draft: cached.is_draft,
            reference: cached.reference,
        })
    }
}

/// Domain and context names to prefer, most specific first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    pub domains: Vec<String>,
    pub contexts: Vec<String>,
}

impl TranslateOptions {
    pub fn domain(mut self, name: impl Into<String>) -> Self {
        self.domains.push(name.into());
        self
    }

    pub fn context(mut self, name: impl Into<String>) -> Self {
        self.contexts.push(name.into());
        self
    }
}

/// One input of [`Resolver::translate_all`].
pub enum BatchItem {
    Text(LocaleText),
    /// Produces the text on demand; a failure only affects this item.
    Lazy(Box<dyn FnOnce() -> anyhow::Result<LocaleText>>),
}

impl From<&str> for BatchItem {
    fn from(text: &str) -> Self {
        BatchItem::Text(LocaleText::from(text))
    }
}

impl From<LocaleText> for BatchItem {
    fn from(text: LocaleText) -> Self {
        BatchItem::Text(text)
    }
}

pub struct Resolver<S> {
    store: S,
    cache: TranslationCache,
}

impl<S: TranslationStore> Resolver<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: TranslationCache::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TranslationCache {
        &mut self.cache
    }

    /// Translate through both caches, resolving and filling them on a miss.
    pub fn translate(
        &mut self,
        language: &str,
        text: &LocaleText,
        options: &TranslateOptions,
    ) -> Result<Translation, ResolveError> {
        if language.is_empty() {
            return Ok(Translation::identity(text));
        }

        let key = CacheKey {
            language: language.to_string(),
            domains: options.domains.clone(),
            contexts: options.contexts.clone(),
            source: text.key(),
            is_json: text.is_json(),
        };

        if let Some(hit) = self.cache.get(&key) {
            debug!(language, source = %key.source, "translation cache hit");
            return Ok(hit.clone());
        }

        if let Some(cached) = self.store.cached_translation(&key)? {
            debug!(language, source = %key.source, "fast table hit");
            let translation = Translation::decode(cached)?;
            self.cache.insert(key, translation.clone());
            return Ok(translation);
        }

        let translation = self.resolve(language, text, options)?;
        self.store.cache_translation(key.clone(), translation.encode())?;
        self.cache.insert(key, translation.clone());
        Ok(translation)
    }

    /// Run the full fallback walk, bypassing every cache.
    pub fn resolve(
        &mut self,
        language: &str,
        text: &LocaleText,
        options: &TranslateOptions,
    ) -> Result<Translation, ResolveError> {
        if language.is_empty() {
            return Ok(Translation::identity(text));
        }

        let mut current = Some(self.store.language(language)?);
        let Some(source) = self.store.source_id(&text.key(), text.is_json())? else {
            debug!(language, source = %text.key(), "unknown source text");
            return Ok(Translation::identity(text));
        };

        let mut domains = Vec::with_capacity(options.domains.len() + 2);
        for name in &options.domains {
            if let Some(id) = self.store.domain_id(name)? {
                domains.push(Dimension::Is(id));
            }
        }
        domains.extend([Dimension::Null, Dimension::Any]);

        let mut contexts = Vec::with_capacity(options.contexts.len() + 2);
        for name in &options.contexts {
            if let Some(id) = self.store.context_id(name)? {
                contexts.push(Dimension::Is(id));
            }
        }
        contexts.extend([Dimension::Null, Dimension::Any]);

        let mut visited = HashSet::new();
        while let Some(level) = current {
            if !visited.insert(level.id) {
                warn!(language, tag = %level.tag, "language parent chain has a cycle");
                break;
            }

            for domain in &domains {
                for context in &contexts {
                    let query = TranslationQuery {
                        source,
                        language: level.id,
                        domain: *domain,
                        context: *context,
                    };
                    if let Some(found) = self.store.find_translation(&query)? {
                        debug!(language, resolved_in = %level.tag, "translation found");
                        let translated = LocaleText::decode(&found.text, found.is_json)
                            .map_err(|source| ResolveError::Decode {
                                key: text.key(),
                                source,
                            })?;
                        return Ok(Translation {
                            text: translated,
                            is_translated: true,
                            is_draft: found.is_draft,
                            reference: found.reference,
                        });
                    }
                }
            }

            current = match level.parent_id {
                Some(parent) => Some(self.store.language_by_id(parent)?),
                None => None,
            };
        }

        Ok(Translation::identity(text))
    }

    /// Translate a batch, keyed by each item's source key.
    ///
    /// An item that fails to resolve maps to its own source text; an item
    /// whose text cannot be produced is left out. Neither fails the batch.
    pub fn translate_all(
        &mut self,
        language: &str,
        items: Vec<BatchItem>,
        options: &TranslateOptions,
    ) -> IndexMap<String, LocaleText> {
        let mut results = IndexMap::with_capacity(items.len());
        for item in items {
            let text = match item {
                BatchItem::Text(text) => text,
                BatchItem::Lazy(produce) => match produce() {
                    Ok(text) => text,
                    Err(error) => {
                        warn!(language, error = %error, "could not produce text to translate");
                        continue;
                    }
                },
            };

            let translated = self.translate_or_source(language, &text, options).text;
            results.insert(text.key(), translated);
        }
        results
    }

    /// Translate each text in order, one outcome per input.
    ///
    /// A text that fails to resolve comes back as its own untranslated source.
    pub fn translate_each(
        &mut self,
        language: &str,
        texts: &[LocaleText],
        options: &TranslateOptions,
    ) -> Vec<Translation> {
        texts
            .iter()
            .map(|text| self.translate_or_source(language, text, options))
            .collect()
    }

    fn translate_or_source(
        &mut self,
        language: &str,
        text: &LocaleText,
        options: &TranslateOptions,
    ) -> Translation {
        self.translate(language, text, options).unwrap_or_else(|error| {
            warn!(language, source = %text.key(), error = %error, "translation failed");
            Translation::identity(text)
        })
    }
}

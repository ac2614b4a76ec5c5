use std::{collections::BTreeMap, collections::HashMap, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use super::text::LocaleText;
use crate::config::LocaleConfig;
use crate::core::merge::TranslationsFile;

macro_rules! id_type {
    ($($name:ident),*) => {$(
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);
    )*};
}

id_type!(LanguageId, SourceId, DomainId, ContextId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: LanguageId,
    pub tag: String,
    pub parent_id: Option<LanguageId>,
}

/// How a query filters on domain or context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension<T> {
    /// Rows with exactly this id.
    Is(T),
    /// Rows without a value.
    Null,
    /// The dimension is not filtered.
    Any,
}

impl<T: PartialEq> Dimension<T> {
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Dimension::Is(id) => value == Some(id),
            Dimension::Null => value.is_none(),
            Dimension::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationQuery {
    pub source: SourceId,
    pub language: LanguageId,
    pub domain: Dimension<DomainId>,
    pub context: Dimension<ContextId>,
}

/// A stored translation, text still in its encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTranslation {
    pub text: String,
    pub is_json: bool,
    pub is_draft: bool,
    pub reference: Option<String>,
}

/// Identity of one resolved lookup in the fast table and the in-process cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub language: String,
    pub domains: Vec<String>,
    pub contexts: Vec<String>,
    pub source: String,
    pub is_json: bool,
}

/// A fast-table row: the outcome of a full resolution, encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTranslation {
    pub text: String,
    pub is_json: bool,
    pub is_translated: bool,
    pub is_draft: bool,
    pub reference: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown language id {0:?}")]
    UnknownLanguage(LanguageId),
    #[error("translation store unavailable: {0}")]
    Unavailable(String),
}

/// The persisted side of translation lookups.
///
/// Languages are created on first use; sources, domains and contexts are
/// only looked up.
pub trait TranslationStore {
    /// Find the language with `tag`, creating a parentless one if needed.
    fn language(&mut self, tag: &str) -> Result<Language, StoreError>;

    fn language_by_id(&self, id: LanguageId) -> Result<Language, StoreError>;

    fn source_id(&self, text: &str, is_json: bool) -> Result<Option<SourceId>, StoreError>;

    fn domain_id(&self, name: &str) -> Result<Option<DomainId>, StoreError>;

    fn context_id(&self, name: &str) -> Result<Option<ContextId>, StoreError>;

    /// First row matching `query` whose text is present and non-empty.
    fn find_translation(
        &self,
        query: &TranslationQuery,
    ) -> Result<Option<StoredTranslation>, StoreError>;

    fn cached_translation(&self, key: &CacheKey) -> Result<Option<CachedTranslation>, StoreError>;

    fn cache_translation(
        &mut self,
        key: CacheKey,
        value: CachedTranslation,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct TranslationRow {
    source: SourceId,
    language: LanguageId,
    domain: Option<DomainId>,
    context: Option<ContextId>,
    text: Option<String>,
    is_json: bool,
    is_draft: bool,
    reference: Option<String>,
}

/// A translation to add to a [`MemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct NewTranslation<'a> {
    pub domain: Option<&'a str>,
    pub context: Option<&'a str>,
    /// `None` registers the source without a translation.
    pub text: Option<&'a LocaleText>,
    pub is_draft: bool,
    pub reference: Option<&'a str>,
}

/// In-memory [`TranslationStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    languages: Vec<Language>,
    sources: IndexMap<(String, bool), SourceId>,
    domains: IndexMap<String, DomainId>,
    contexts: IndexMap<String, ContextId>,
    rows: Vec<TranslationRow>,
    fast_table: HashMap<CacheKey, CachedTranslation>,
}

fn next_id(len: usize) -> u32 {
    u32::try_from(len + 1).unwrap_or(u32::MAX)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one language per configured locale from its translations file.
    ///
    /// Each entry becomes a row with the entry's domain and no context.
    /// A locale whose file does not exist contributes no rows.
    pub fn from_locales(root: &Path, locales: &BTreeMap<String, LocaleConfig>) -> Result<Self> {
        let mut store = Self::new();
        for (tag, locale) in locales {
            store.add_language(tag, locale.parent.as_deref());

            let path = root.join(&locale.file);
            let file = TranslationsFile::load(&path, true)?;
            for (key, entry) in &file.entries {
                let source = LocaleText::from_key(key, entry.is_json)
                    .with_context(|| format!("Invalid plural key \"{}\" in {}", key, path.display()))?;
                let text = match &entry.translation {
                    Some(value) if entry.is_translated() => Some(
                        serde_json::from_value::<LocaleText>(value.clone()).with_context(|| {
                            format!("Invalid translation for \"{}\" in {}", key, path.display())
                        })?,
                    ),
                    _ => None,
                };
                store.add_translation(
                    tag,
                    &source,
                    NewTranslation {
                        domain: entry.domain.as_deref(),
                        context: None,
                        text: text.as_ref(),
                        is_draft: entry.is_draft,
                        reference: Some(&entry.reference),
                    },
                );
            }
            debug!(locale = %tag, entries = file.len(), "loaded locale");
        }
        Ok(store)
    }

    /// Register `tag`, optionally under `parent`. Either may already exist.
    pub fn add_language(&mut self, tag: &str, parent: Option<&str>) -> LanguageId {
        let parent_id = parent.map(|p| self.add_language(p, None));
        let id = match self.languages.iter().position(|l| l.tag == tag) {
            Some(index) => self.languages[index].id,
            None => {
                let id = LanguageId(next_id(self.languages.len()));
                self.languages.push(Language {
                    id,
                    tag: tag.to_string(),
                    parent_id: None,
                });
                id
            }
        };
        if let Some(parent_id) = parent_id
            && let Some(language) = self.languages.iter_mut().find(|l| l.id == id)
        {
            language.parent_id = Some(parent_id);
        }
        id
    }

    pub fn add_source(&mut self, text: &LocaleText) -> SourceId {
        let next = SourceId(next_id(self.sources.len()));
        *self
            .sources
            .entry((text.key(), text.is_json()))
            .or_insert(next)
    }

    pub fn add_domain(&mut self, name: &str) -> DomainId {
        let next = DomainId(next_id(self.domains.len()));
        *self.domains.entry(name.to_string()).or_insert(next)
    }

    pub fn add_context(&mut self, name: &str) -> ContextId {
        let next = ContextId(next_id(self.contexts.len()));
        *self.contexts.entry(name.to_string()).or_insert(next)
    }

    /// Store a translation of `source` for `language`.
    pub fn add_translation(&mut self, language: &str, source: &LocaleText, new: NewTranslation<'_>) {
        let row = TranslationRow {
            source: self.add_source(source),
            language: self.add_language(language, None),
            domain: new.domain.map(|d| self.add_domain(d)),
            context: new.context.map(|c| self.add_context(c)),
            is_json: new.text.is_some_and(LocaleText::is_json),
            text: new.text.map(LocaleText::encode),
            is_draft: new.is_draft,
            reference: new.reference.map(str::to_string),
        };
        self.rows.push(row);
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl TranslationStore for MemoryStore {
    fn language(&mut self, tag: &str) -> Result<Language, StoreError> {
        let id = self.add_language(tag, None);
        self.language_by_id(id)
    }

    fn language_by_id(&self, id: LanguageId) -> Result<Language, StoreError> {
        self.languages
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(StoreError::UnknownLanguage(id))
    }

    fn source_id(&self, text: &str, is_json: bool) -> Result<Option<SourceId>, StoreError> {
        Ok(self.sources.get(&(text.to_string(), is_json)).copied())
    }

    fn domain_id(&self, name: &str) -> Result<Option<DomainId>, StoreError> {
        Ok(self.domains.get(name).copied())
    }

    fn context_id(&self, name: &str) -> Result<Option<ContextId>, StoreError> {
        Ok(self.contexts.get(name).copied())
    }

    fn find_translation(
        &self,
        query: &TranslationQuery,
    ) -> Result<Option<StoredTranslation>, StoreError> {
        let found = self.rows.iter().find(|row| {
            row.source == query.source
                && row.language == query.language
                && query.domain.matches(row.domain.as_ref())
                && query.context.matches(row.context.as_ref())
                && row.text.as_deref().is_some_and(|t| !t.is_empty())
        });
        Ok(found.and_then(|row| {
            row.text.clone().map(|text| StoredTranslation {
                text,
                is_json: row.is_json,
                is_draft: row.is_draft,
                reference: row.reference.clone(),
            })
        }))
    }

    fn cached_translation(&self, key: &CacheKey) -> Result<Option<CachedTranslation>, StoreError> {
        Ok(self.fast_table.get(key).cloned())
    }

    fn cache_translation(
        &mut self,
        key: CacheKey,
        value: CachedTranslation,
    ) -> Result<(), StoreError> {
        self.fast_table.insert(key, value);
        Ok(())
    }
}

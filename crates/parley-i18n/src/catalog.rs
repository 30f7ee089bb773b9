//! In-memory translation catalog.
//!
//! A [`Catalog`] maps key -> locale -> [`Entry`]. It is built once (usually by
//! [`crate::BundleLoader`]) and then shared read-only behind a
//! [`crate::TranslationStore`].

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parley_core::{Key, Locale};

use crate::plural::PluralForms;
use crate::translation::Translation;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Single(Arc<str>),
    Plural(Arc<PluralForms>),
}

impl Entry {
    pub fn single(template: impl Into<Arc<str>>) -> Self {
        Self::Single(template.into())
    }

    pub fn plural(forms: PluralForms) -> Self {
        Self::Plural(Arc::new(forms))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<Key, HashMap<Locale, Entry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&mut self, key: Key, locale: Locale, entry: Entry) -> Option<Entry> {
        self.entries.entry(key).or_default().insert(locale, entry)
    }

    pub fn insert_single(
        &mut self,
        key: impl Into<Key>,
        locale: Locale,
        template: impl Into<Arc<str>>,
    ) -> Option<Entry> {
        self.insert(key.into(), locale, Entry::single(template))
    }

    pub fn insert_plural(
        &mut self,
        key: impl Into<Key>,
        locale: Locale,
        forms: PluralForms,
    ) -> Option<Entry> {
        self.insert(key.into(), locale, Entry::plural(forms))
    }

    /// Exact (key, locale) lookup. No fallback.
    pub fn get(&self, key: &str, locale: &Locale) -> Option<&Entry> {
        self.entries.get(key)?.get(locale)
    }

    /// Exact lookup wrapped as a [`Translation`] answering `locale`.
    pub fn lookup(&self, key: &Key, locale: &Locale) -> Option<Translation> {
        let entry = self.get(key.as_str(), locale)?;
        let translation = match entry {
            Entry::Single(template) => Translation::Single {
                key: key.clone(),
                locale: locale.clone(),
                requested: locale.clone(),
                template: Arc::clone(template),
            },
            Entry::Plural(forms) => Translation::Plural {
                key: key.clone(),
                locale: locale.clone(),
                requested: locale.clone(),
                forms: Arc::clone(forms),
            },
        };
        Some(translation)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of (key, locale) entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every locale with at least one entry, sorted.
    pub fn locales(&self) -> Vec<Locale> {
        let set: BTreeSet<&Locale> = self.entries.values().flat_map(|m| m.keys()).collect();
        set.into_iter().cloned().collect()
    }

    /// Every key, sorted.
    pub fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Keys with no entry in `locale` or any of its coarser alternatives.
    pub fn missing_keys(&self, locale: &Locale) -> Vec<Key> {
        let alternatives = locale.alternatives();
        let mut missing: Vec<Key> = self
            .entries
            .iter()
            .filter(|(_, by_locale)| !alternatives.iter().any(|l| by_locale.contains_key(l)))
            .map(|(key, _)| key.clone())
            .collect();
        missing.sort();
        missing
    }

    /// Merge `other` into `self`; entries from `other` win.
    pub fn merge(&mut self, other: Catalog) {
        for (key, by_locale) in other.entries {
            let slot = self.entries.entry(key).or_default();
            slot.extend(by_locale);
        }
    }
}

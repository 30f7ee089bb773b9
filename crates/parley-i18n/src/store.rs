//! Shared, atomically swappable translation storage.

use std::sync::{Arc, PoisonError, RwLock};

use parley_core::{Key, Locale, ParleyError};
use tracing::info;

use crate::bundle::BundleLoader;
use crate::catalog::Catalog;
use crate::translation::Translation;

/// Read-mostly holder of the current [`Catalog`].
///
/// Readers take an `Arc` snapshot and never block each other; `replace`
/// swaps the whole catalog at once, so a reader sees either the old or the
/// new contents and never a mix.
#[derive(Debug, Default)]
pub struct TranslationStore {
    current: RwLock<Arc<Catalog>>,
}

impl TranslationStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog as of now. Later swaps do not affect the returned handle.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Install a fully built catalog, returning the previous one.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Build a catalog from `loader` and swap it in. On error the current
    /// catalog stays in place.
    pub fn reload(&self, loader: &BundleLoader) -> Result<usize, ParleyError> {
        let catalog = loader.build()?;
        let entries = catalog.len();
        let locales = catalog.locales().len();
        self.replace(catalog);
        info!("Translation store reloaded: {entries} entries across {locales} locales");
        Ok(entries)
    }

    /// Exact lookup in a single locale. Absence is [`Translation::Unknown`].
    pub fn lookup(&self, key: &Key, locale: &Locale) -> Translation {
        self.snapshot()
            .lookup(key, locale)
            .unwrap_or_else(|| Translation::unknown(key.clone(), Locale::root(), locale.clone()))
    }
}

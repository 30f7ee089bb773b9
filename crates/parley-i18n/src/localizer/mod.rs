//! Key resolution and text rendering.
//!
//! A [`Localizer`] is the explicit handle that ties a [`TranslationStore`], a
//! [`LocalePolicy`] and [`PluralRules`] together. It is cheap to clone and
//! safe to share across tasks.

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use parley_core::config::I18nConfig;
use parley_core::{Context, Key, Locale, ParleyError};
use tracing::debug;

use crate::bundle::BundleLoader;
use crate::catalog::Catalog;
use crate::error::FormatError;
use crate::format::{self, Value};
use crate::plural::{CldrPluralRules, PluralRules};
use crate::policy::{DefaultLocalePolicy, LocalePolicy};
use crate::store::TranslationStore;
use crate::text::{Arg, Text};
use crate::translation::Translation;

#[derive(Clone)]
pub struct Localizer {
    store: Arc<TranslationStore>,
    policy: Arc<dyn LocalePolicy>,
    rules: Arc<dyn PluralRules>,
}

/// Builder for [`Localizer`]. Unset parts default to an empty store,
/// [`DefaultLocalePolicy::default`] and [`CldrPluralRules`].
#[derive(Default)]
pub struct LocalizerBuilder {
    store: Option<Arc<TranslationStore>>,
    policy: Option<Arc<dyn LocalePolicy>>,
    rules: Option<Arc<dyn PluralRules>>,
}

impl LocalizerBuilder {
    pub fn store(mut self, store: Arc<TranslationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Shorthand for a fresh store holding `catalog`.
    pub fn catalog(self, catalog: Catalog) -> Self {
        self.store(Arc::new(TranslationStore::new(catalog)))
    }

    pub fn policy(mut self, policy: impl LocalePolicy + 'static) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    pub fn shared_policy(mut self, policy: Arc<dyn LocalePolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn plural_rules(mut self, rules: impl PluralRules + 'static) -> Self {
        self.rules = Some(Arc::new(rules));
        self
    }

    pub fn build(self) -> Localizer {
        Localizer {
            store: self.store.unwrap_or_default(),
            policy: self
                .policy
                .unwrap_or_else(|| Arc::new(DefaultLocalePolicy::default())),
            rules: self
                .rules
                .unwrap_or_else(|| Arc::new(CldrPluralRules::new())),
        }
    }
}

impl Localizer {
    pub fn builder() -> LocalizerBuilder {
        LocalizerBuilder::default()
    }

    /// Load bundles as configured and use the configured default/root locales.
    pub fn from_config(config: &I18nConfig) -> Result<Self, ParleyError> {
        let store = TranslationStore::default();
        store.reload(&BundleLoader::from_config(config))?;
        Ok(Self::builder()
            .store(Arc::new(store))
            .policy(DefaultLocalePolicy::from_config(config))
            .build())
    }

    pub fn store(&self) -> &Arc<TranslationStore> {
        &self.store
    }

    pub fn policy(&self) -> &Arc<dyn LocalePolicy> {
        &self.policy
    }

    pub fn plural_rules(&self) -> &Arc<dyn PluralRules> {
        &self.rules
    }

    /// The same store and rules under a different policy.
    pub fn with_policy(&self, policy: Arc<dyn LocalePolicy>) -> Self {
        Self {
            store: Arc::clone(&self.store),
            policy,
            rules: Arc::clone(&self.rules),
        }
    }

    pub fn candidates(&self, context: &Context) -> Vec<Locale> {
        self.policy.candidates(context)
    }

    /// Find the best translation of `key` for `context`.
    ///
    /// Candidates are tried in policy order, each expanded to its coarser
    /// alternatives (`fr-CA`, then `fr`). The result reports the first
    /// candidate as its requested locale. If nothing matches, the result is
    /// [`Translation::Unknown`] in the last (root) candidate.
    pub fn resolve(&self, key: &Key, context: &Context) -> Translation {
        let candidates = self.policy.candidates(context);
        let requested = candidates.first().cloned().unwrap_or_default();
        let catalog = self.store.snapshot();

        let mut tried: Vec<Locale> = Vec::with_capacity(candidates.len() + 2);
        for candidate in &candidates {
            for locale in candidate.alternatives() {
                if tried.contains(&locale) {
                    continue;
                }
                if let Some(found) = catalog.lookup(key, &locale) {
                    return found.with_requested(requested);
                }
                tried.push(locale);
            }
        }

        debug!("No translation for '{key}' (requested {requested})");
        let root = candidates.last().cloned().unwrap_or_default();
        Translation::unknown(key.clone(), root, requested)
    }

    /// Render `text` for `context`.
    ///
    /// Literals are returned unchanged. Keys with no translation anywhere are
    /// returned verbatim, without placeholder substitution.
    pub fn render(&self, text: &Text, context: &Context) -> Result<String, FormatError> {
        self.render_inner(text, context, None)
    }

    /// Render `text` with an explicit quantity, which selects the plural form
    /// and fills `{#}`. It takes precedence over a quantity stored in the text.
    pub fn render_with_quantity(
        &self,
        text: &Text,
        context: &Context,
        quantity: i64,
    ) -> Result<String, FormatError> {
        self.render_inner(text, context, Some(quantity))
    }

    fn render_inner(
        &self,
        text: &Text,
        context: &Context,
        quantity_override: Option<i64>,
    ) -> Result<String, FormatError> {
        let (key, args, quantity, kind) = match text {
            Text::Literal(value) => return Ok(value.clone()),
            Text::Single { key, args } => (key, args, None, None),
            Text::Plural {
                key,
                args,
                quantity,
                kind,
            } => (key, args, Some(*quantity), *kind),
        };
        if key.is_empty() {
            return Err(FormatError::EmptyKey);
        }

        let translation = self.resolve(key, context);
        if translation.is_unknown() {
            return Ok(key.to_string());
        }

        let quantity = quantity_override.or(quantity);
        let template = match quantity {
            Some(quantity) => translation.get_for_quantity(quantity, kind, &*self.rules),
            None => translation.get(),
        };

        let values = args
            .iter()
            .map(|arg| self.value_of(arg, context))
            .collect::<Result<Vec<_>, _>>()?;

        format::format(template, &values, quantity, translation.locale()).map_err(|source| {
            FormatError::Template {
                key: key.clone(),
                locale: translation.locale().clone(),
                source,
            }
        })
    }

    fn value_of<'a>(&self, arg: &'a Arg, context: &Context) -> Result<Value<'a>, FormatError> {
        let value = match arg {
            Arg::Str(s) => Value::Str(Cow::Borrowed(s.as_str())),
            Arg::Int(n) => Value::Int(*n),
            Arg::Float(x) => Value::Float(*x),
            Arg::Date(d) => Value::Date(*d),
            Arg::DateTime(dt) => Value::DateTime(*dt),
            Arg::Text(text) => Value::Str(Cow::Owned(self.render(text, context)?)),
        };
        Ok(value)
    }
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("entries", &self.store.snapshot().len())
            .finish_non_exhaustive()
    }
}

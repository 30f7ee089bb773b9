//! The outcome of a translation lookup.

use std::sync::Arc;

use parley_core::{Key, Locale};

use crate::plural::{PluralCategory, PluralForms, PluralRuleKind, PluralRules};

/// A resolved (or unresolved) translation.
///
/// `locale()` is the locale whose entry actually matched; `requested_locale()`
/// is the first locale the policy asked for. They differ whenever fallback
/// happened (`fr-CA` requested, `fr` served).
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Single {
        key: Key,
        locale: Locale,
        requested: Locale,
        template: Arc<str>,
    },
    Plural {
        key: Key,
        locale: Locale,
        requested: Locale,
        forms: Arc<PluralForms>,
    },
    /// No entry in any candidate locale. Renders as the key itself.
    Unknown {
        key: Key,
        locale: Locale,
        requested: Locale,
    },
}

impl Translation {
    /// An unresolved translation; `locale` is the root locale.
    pub fn unknown(key: Key, root: Locale, requested: Locale) -> Self {
        Self::Unknown {
            key,
            locale: root,
            requested,
        }
    }

    pub fn key(&self) -> &Key {
        match self {
            Self::Single { key, .. } | Self::Plural { key, .. } | Self::Unknown { key, .. } => key,
        }
    }

    pub fn locale(&self) -> &Locale {
        match self {
            Self::Single { locale, .. }
            | Self::Plural { locale, .. }
            | Self::Unknown { locale, .. } => locale,
        }
    }

    pub fn requested_locale(&self) -> &Locale {
        match self {
            Self::Single { requested, .. }
            | Self::Plural { requested, .. }
            | Self::Unknown { requested, .. } => requested,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Self::Plural { .. })
    }

    /// Same translation, reported as answering `requested`.
    pub fn with_requested(mut self, new_requested: Locale) -> Self {
        match &mut self {
            Self::Single { requested, .. }
            | Self::Plural { requested, .. }
            | Self::Unknown { requested, .. } => *requested = new_requested,
        }
        self
    }

    /// The quantity-independent template. Plural entries answer with `other`.
    pub fn get(&self) -> &str {
        match self {
            Self::Single { template, .. } => template.as_ref(),
            Self::Plural { forms, .. } => forms.other(),
            Self::Unknown { key, .. } => key.as_str(),
        }
    }

    /// Category a quantity selects, or `None` for non-plural translations.
    ///
    /// `kind` overrides the rule kind stored with the entry.
    pub fn category_for(
        &self,
        quantity: i64,
        kind: Option<PluralRuleKind>,
        rules: &dyn PluralRules,
    ) -> Option<PluralCategory> {
        match self {
            Self::Plural { forms, locale, .. } => {
                let kind = kind.unwrap_or_else(|| forms.kind());
                Some(rules.category(quantity, kind, locale))
            }
            _ => None,
        }
    }

    /// The template for `quantity`, falling back to `other` when the entry has
    /// no form for the selected category. Non-plural translations ignore the
    /// quantity.
    pub fn get_for_quantity(
        &self,
        quantity: i64,
        kind: Option<PluralRuleKind>,
        rules: &dyn PluralRules,
    ) -> &str {
        match (self, self.category_for(quantity, kind, rules)) {
            (Self::Plural { forms, .. }, Some(category)) => forms.select(category),
            _ => self.get(),
        }
    }
}

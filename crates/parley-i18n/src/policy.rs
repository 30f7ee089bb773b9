//! Locale resolution policies.
//!
//! A [`LocalePolicy`] turns a [`Context`] into an ordered list of candidate
//! locales. Resolution walks the list (each candidate expanded to its coarser
//! alternatives) until a catalog entry matches.

use parley_core::config::I18nConfig;
use parley_core::{Context, Locale};

pub trait LocalePolicy: Send + Sync {
    /// Candidates in priority order. Never empty; the last element is the
    /// root locale and no locale appears twice.
    fn candidates(&self, context: &Context) -> Vec<Locale>;
}

/// Build a candidate list: the present `preferred` locales in order, then
/// `default`, then `root`, keeping only the first occurrence of each.
pub fn candidate_chain<'a>(
    preferred: impl IntoIterator<Item = Option<&'a Locale>>,
    default: &'a Locale,
    root: &'a Locale,
) -> Vec<Locale> {
    let mut out: Vec<Locale> = Vec::new();
    let chain = preferred
        .into_iter()
        .flatten()
        .chain([default])
        .filter(|l| *l != root);
    for locale in chain {
        if !out.contains(locale) {
            out.push(locale.clone());
        }
    }
    out.push(root.clone());
    out
}

/// User override, guild override, process default, root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultLocalePolicy {
    default_locale: Locale,
    root_locale: Locale,
}

impl DefaultLocalePolicy {
    pub fn new(default_locale: Locale, root_locale: Locale) -> Self {
        Self {
            default_locale,
            root_locale,
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        Self::new(config.default_locale.clone(), config.root_locale.clone())
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn root_locale(&self) -> &Locale {
        &self.root_locale
    }
}

impl Default for DefaultLocalePolicy {
    fn default() -> Self {
        Self::from_config(&I18nConfig::default())
    }
}

impl LocalePolicy for DefaultLocalePolicy {
    fn candidates(&self, context: &Context) -> Vec<Locale> {
        candidate_chain(
            [context.user_locale(), context.guild_locale()],
            &self.default_locale,
            &self.root_locale,
        )
    }
}

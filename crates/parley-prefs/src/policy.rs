//! Locale policy that honours stored preferences.

use parley_core::{Context, Locale};
use parley_i18n::{candidate_chain, LocalePolicy};

use crate::store::StoredLocales;

/// Candidate order: stored user preference, context user locale, stored
/// channel preference, stored guild preference, context guild locale,
/// default, root.
///
/// Built per request from a [`StoredLocales`] snapshot and installed with
/// `Localizer::with_policy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencePolicy {
    stored: StoredLocales,
    default_locale: Locale,
    root_locale: Locale,
}

impl PreferencePolicy {
    pub fn new(stored: StoredLocales, default_locale: Locale, root_locale: Locale) -> Self {
        Self {
            stored,
            default_locale,
            root_locale,
        }
    }

    pub fn stored(&self) -> &StoredLocales {
        &self.stored
    }
}

impl LocalePolicy for PreferencePolicy {
    fn candidates(&self, context: &Context) -> Vec<Locale> {
        candidate_chain(
            [
                self.stored.user.as_ref(),
                context.user_locale(),
                self.stored.channel.as_ref(),
                self.stored.guild.as_ref(),
                context.guild_locale(),
            ],
            &self.default_locale,
            &self.root_locale,
        )
    }
}

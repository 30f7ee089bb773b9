//! # parley
//!
//! Context-aware localization for chat-bot frameworks.
//!
//! [`Parley`] wires the pieces together from a [`Config`]: bundles are loaded
//! into a shared [`Localizer`], and when preferences are enabled a
//! [`PreferenceStore`] supplies per-request user, channel and guild choices.
//!
//! ```no_run
//! # async fn run() -> Result<(), parley::ParleyError> {
//! use parley::{Context, Parley, Text};
//!
//! let cfg = parley::config::load("parley.toml")?;
//! let parley = Parley::from_config(&cfg).await?;
//!
//! let ctx = Context::new(1234, 5678, 0);
//! let localizer = parley.localizer_for(&ctx).await?;
//! let reply = localizer.render(&Text::single("greet.hello").arg("Sam"), &ctx);
//! # let _ = reply;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::info;

pub use parley_core::{
    config, shellexpand, Context, ContextError, ContextFlavor, Id, Key, Locale, LocaleError,
    ParleyError,
};
pub use parley_i18n::{
    candidate_chain, Arg, BundleFormat, BundleLoader, Catalog, CldrPluralRules,
    DefaultLocalePolicy, Entry, ErrorKind, FormatError, LocalePolicy, LocalizedError, Localizer,
    LocalizerBuilder, PluralCategory, PluralForms, PluralRuleKind, PluralRules, TemplateError,
    Text, Translation, TranslationStore,
};
pub use parley_prefs::{EntryKind, PreferencePolicy, PreferenceStore, StoredLocales};

use config::Config;

/// A configured localization stack: bundles, policy and optional preferences.
#[derive(Clone, Debug)]
pub struct Parley {
    localizer: Localizer,
    base_policy: DefaultLocalePolicy,
    loader: BundleLoader,
    preferences: Option<PreferenceStore>,
}

impl Parley {
    /// Load bundles and, if enabled, open the preference store.
    pub async fn from_config(cfg: &Config) -> Result<Self, ParleyError> {
        let loader = BundleLoader::from_config(&cfg.i18n);
        let store = TranslationStore::default();
        store.reload(&loader)?;

        let base_policy = DefaultLocalePolicy::from_config(&cfg.i18n);
        let localizer = Localizer::builder()
            .store(Arc::new(store))
            .policy(base_policy.clone())
            .build();

        let preferences = if cfg.preferences.enabled {
            Some(PreferenceStore::new(&cfg.preferences).await?)
        } else {
            None
        };

        info!(
            "Parley ready: default locale {}, preferences {}",
            base_policy.default_locale(),
            if preferences.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            localizer,
            base_policy,
            loader,
            preferences,
        })
    }

    /// Assemble from parts already built by the caller. `loader` is what
    /// [`Parley::reload`] re-reads into the localizer's store.
    pub fn new(
        localizer: Localizer,
        base_policy: DefaultLocalePolicy,
        loader: BundleLoader,
        preferences: Option<PreferenceStore>,
    ) -> Self {
        Self {
            localizer,
            base_policy,
            loader,
            preferences,
        }
    }

    /// The localizer using only context overrides and configured defaults.
    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn preferences(&self) -> Option<&PreferenceStore> {
        self.preferences.as_ref()
    }

    /// A localizer for one request. With preferences enabled, stored user,
    /// channel and guild locales are fetched first and ranked ahead of the
    /// platform-reported ones.
    pub async fn localizer_for(&self, context: &Context) -> Result<Localizer, ParleyError> {
        let Some(store) = &self.preferences else {
            return Ok(self.localizer.clone());
        };
        let policy = store.policy_for(context, &self.base_policy).await?;
        Ok(self.localizer.with_policy(Arc::new(policy)))
    }

    /// Re-read the configured bundles and swap them in atomically. Returns the
    /// number of entries loaded.
    pub fn reload(&self) -> Result<usize, ParleyError> {
        self.localizer.store().reload(&self.loader)
    }
}

//! # parley-prefs
//!
//! Locale preferences chosen by users, channels and guilds, persisted in
//! SQLite, and the [`PreferencePolicy`] that puts them in front of the
//! platform-reported locales.

pub mod policy;
pub mod store;

pub use policy::PreferencePolicy;
pub use store::{EntryKind, PreferenceStore, StoredLocales};

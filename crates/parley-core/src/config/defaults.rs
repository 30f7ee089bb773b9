//! Default values for serde `#[serde(default = "...")]` attributes.

use crate::locale::Locale;

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_locale() -> Locale {
    Locale::parse("en").unwrap_or_default()
}

pub(super) fn default_root_locale() -> Locale {
    Locale::root()
}

pub(super) fn default_bundle_dirs() -> Vec<String> {
    vec!["~/.parley/langs".to_string()]
}

pub(super) fn default_db_path() -> String {
    "~/.parley/data/preferences.db".to_string()
}

pub(super) fn default_max_connections() -> u32 {
    4
}

use thiserror::Error;

/// Top-level error type for Parley.
#[derive(Debug, Error)]
pub enum ParleyError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A translation bundle could not be read or parsed.
    #[error("bundle error: {0}")]
    Bundle(String),

    /// Locale preference storage error.
    #[error("preferences error: {0}")]
    Preferences(String),

    /// Malformed locale tag.
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// A locale tag that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("invalid locale tag '{tag}'")]
    Invalid { tag: String },
}

/// Mutation attempted on a context snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// Immutable contexts are snapshots; copy with `to_mutable()` before editing.
    #[error("cannot set {field} on an immutable context")]
    Immutable { field: &'static str },
}

//! # parley-core
//!
//! Core types, configuration, and error handling shared by the Parley crates:
//! translation keys, locales, and the request-scoped [`Context`].

pub mod config;
pub mod context;
pub mod error;
pub mod key;
pub mod locale;

pub use config::shellexpand;
pub use context::{Context, ContextFlavor, Id};
pub use error::{ContextError, LocaleError, ParleyError};
pub use key::Key;
pub use locale::Locale;

//! # parley-i18n
//!
//! Translation catalogs, locale fallback, CLDR plural rules, and
//! MessageFormat-style rendering.
//!
//! ```no_run
//! use parley_core::{Context, Locale};
//! use parley_i18n::{BundleLoader, Localizer, Text};
//!
//! let catalog = BundleLoader::new()
//!     .with_embedded_defaults()
//!     .build()
//!     .expect("bundles");
//! let localizer = Localizer::builder().catalog(catalog).build();
//!
//! let mut ctx = Context::builder();
//! ctx.with_user_locale(Some(Locale::parse("fr-CA").expect("tag"))).expect("mutable");
//! let message = localizer
//!     .render(&Text::single("greet.hello").arg("Sam"), &ctx)
//!     .expect("render");
//! ```

pub mod bundle;
pub mod catalog;
pub mod error;
pub mod format;
pub mod localizer;
pub mod plural;
pub mod policy;
pub mod store;
pub mod text;
pub mod translation;

pub use bundle::{BundleFormat, BundleLoader};
pub use catalog::{Catalog, Entry};
pub use error::{ErrorKind, FormatError, LocalizedError};
pub use format::TemplateError;
pub use localizer::{Localizer, LocalizerBuilder};
pub use plural::{CldrPluralRules, PluralCategory, PluralForms, PluralRuleKind, PluralRules};
pub use policy::{candidate_chain, DefaultLocalePolicy, LocalePolicy};
pub use store::TranslationStore;
pub use text::{Arg, Text};
pub use translation::Translation;

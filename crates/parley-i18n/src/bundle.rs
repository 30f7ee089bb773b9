//! Translation bundle loading.
//!
//! Bundles are TOML or JSON documents, one per locale. Nested tables flatten
//! into dotted keys; a table whose keys are all plural categories (plus an
//! optional `kind`) becomes a plural entry:
//!
//! ```toml
//! [greet]
//! hello = "Hello, {0}!"
//!
//! [cart.items]
//! one = "{0} item"
//! other = "{0} items"
//! ```
//!
//! On disk, `<dir>/<tag>.toml` loads without a prefix and
//! `<dir>/<namespace>/<tag>.toml` prefixes every key with `<namespace>.`.
//! Sources are applied in the order they were added; later sources win.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use parley_core::config::I18nConfig;
use parley_core::key::LIBRARY_NAMESPACE;
use parley_core::{Key, Locale, ParleyError};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Entry};
use crate::plural::{PluralCategory, PluralForms, PluralRuleKind};

/// Messages shipped with Parley, loaded under the library namespace.
const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.toml")),
    ("fr", include_str!("../locales/fr.toml")),
    ("de", include_str!("../locales/de.toml")),
];

const KIND_FIELD: &str = "kind";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFormat {
    Toml,
    Json,
}

impl BundleFormat {
    /// Format implied by a file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    Dir(PathBuf),
    Inline {
        locale: Locale,
        namespace: String,
        format: BundleFormat,
        text: Cow<'static, str>,
        origin: String,
    },
}

/// Collects bundle sources and builds a [`Catalog`] from them.
#[derive(Debug, Clone, Default)]
pub struct BundleLoader {
    sources: Vec<Source>,
}

impl BundleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader for the `[i18n]` config section. Configured directories that do
    /// not exist are skipped with a warning.
    pub fn from_config(config: &I18nConfig) -> Self {
        let mut loader = if config.embedded_defaults {
            Self::new().with_embedded_defaults()
        } else {
            Self::new()
        };
        for path in config.bundle_paths() {
            if path.is_dir() {
                loader.add_dir(path);
            } else {
                warn!("Bundle directory {} not found, skipping", path.display());
            }
        }
        loader
    }

    /// Put the embedded `parley.*` messages first, so every later source can
    /// override them.
    pub fn with_embedded_defaults(mut self) -> Self {
        let embedded = EMBEDDED.iter().filter_map(|(tag, text)| {
            let locale = Locale::parse(tag).ok()?;
            Some(Source::Inline {
                origin: format!("embedded {tag}"),
                locale,
                namespace: LIBRARY_NAMESPACE.to_string(),
                format: BundleFormat::Toml,
                text: Cow::Borrowed(*text),
            })
        });
        let mut sources: Vec<Source> = embedded.collect();
        sources.append(&mut self.sources);
        self.sources = sources;
        self
    }

    /// Add a bundle directory. It is read on every [`build`](Self::build).
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.sources.push(Source::Dir(path.into()));
        self
    }

    /// Add an in-memory bundle for `locale`. An empty namespace means no prefix.
    pub fn add_source(
        &mut self,
        locale: Locale,
        namespace: &str,
        format: BundleFormat,
        text: impl Into<String>,
    ) -> &mut Self {
        let origin = if namespace.is_empty() {
            format!("inline {locale}")
        } else {
            format!("inline {namespace}/{locale}")
        };
        self.sources.push(Source::Inline {
            locale,
            namespace: namespace.to_string(),
            format,
            text: Cow::Owned(text.into()),
            origin,
        });
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Read and parse every source into a fresh catalog.
    pub fn build(&self) -> Result<Catalog, ParleyError> {
        let mut catalog = Catalog::new();
        for source in &self.sources {
            match source {
                Source::Dir(path) => load_dir(&mut catalog, path)?,
                Source::Inline {
                    locale,
                    namespace,
                    format,
                    text,
                    origin,
                } => load_text(&mut catalog, locale, namespace, *format, text, origin)?,
            }
        }
        Ok(catalog)
    }
}

fn load_dir(catalog: &mut Catalog, dir: &Path) -> Result<(), ParleyError> {
    if !dir.is_dir() {
        return Err(ParleyError::Bundle(format!(
            "bundle directory {} does not exist",
            dir.display()
        )));
    }

    for path in sorted_entries(dir)? {
        if path.is_dir() {
            let Some(namespace) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            for file in sorted_entries(&path)? {
                if file.is_file() {
                    load_file(catalog, &file, namespace)?;
                }
            }
        } else {
            load_file(catalog, &path, "")?;
        }
    }
    Ok(())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, ParleyError> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| ParleyError::Bundle(format!("failed to read {}: {e}", dir.display())))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect::<Vec<_>>();
    entries.sort();
    Ok(entries)
}

fn load_file(catalog: &mut Catalog, path: &Path, namespace: &str) -> Result<(), ParleyError> {
    let Some(format) = BundleFormat::from_path(path) else {
        debug!("Skipping non-bundle file {}", path.display());
        return Ok(());
    };
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let locale = Locale::parse(stem).map_err(|e| {
        ParleyError::Bundle(format!("{}: file name is not a locale: {e}", path.display()))
    })?;
    let text = std::fs::read_to_string(path)
        .map_err(|e| ParleyError::Bundle(format!("failed to read {}: {e}", path.display())))?;

    load_text(
        catalog,
        &locale,
        namespace,
        format,
        &text,
        &path.display().to_string(),
    )
}

fn load_text(
    catalog: &mut Catalog,
    locale: &Locale,
    namespace: &str,
    format: BundleFormat,
    text: &str,
    origin: &str,
) -> Result<(), ParleyError> {
    let document = parse_document(format, text, origin)?;
    let root = unwrap_locale_root(document, locale, origin)?;

    let mut entries = Vec::new();
    flatten(namespace, &root, &mut entries, origin)?;

    let count = entries.len();
    for (key, entry) in entries {
        if catalog.insert(key.clone(), locale.clone(), entry).is_some() {
            debug!("{origin}: '{key}' for {locale} overrides an earlier entry");
        }
    }

    if namespace.is_empty() {
        info!("Loaded {count} translations for {locale} from {origin}");
    } else {
        info!("Loaded {count} translations for {locale} in namespace '{namespace}' from {origin}");
    }
    Ok(())
}

fn parse_document(format: BundleFormat, text: &str, origin: &str) -> Result<Value, ParleyError> {
    match format {
        BundleFormat::Toml => toml::from_str::<Value>(text)
            .map_err(|e| ParleyError::Bundle(format!("{origin}: invalid TOML: {e}"))),
        BundleFormat::Json => serde_json::from_str::<Value>(text)
            .map_err(|e| ParleyError::Bundle(format!("{origin}: invalid JSON: {e}"))),
    }
}

/// A document may wrap everything in a single table named after its locale
/// (`[en]` or `{"fr-CA": {...}}`). Strip that wrapper.
fn unwrap_locale_root(
    document: Value,
    locale: &Locale,
    origin: &str,
) -> Result<Map<String, Value>, ParleyError> {
    let Value::Object(mut map) = document else {
        return Err(ParleyError::Bundle(format!(
            "{origin}: top level must be a table"
        )));
    };

    let wrapper = match map.iter().next() {
        Some((name, Value::Object(_)))
            if map.len() == 1 && Locale::parse(name).ok().as_ref() == Some(locale) =>
        {
            Some(name.clone())
        }
        _ => None,
    };
    if let Some(name) = wrapper {
        if let Some(Value::Object(inner)) = map.remove(&name) {
            return Ok(inner);
        }
    }
    Ok(map)
}

fn flatten(
    prefix: &str,
    table: &Map<String, Value>,
    out: &mut Vec<(Key, Entry)>,
    origin: &str,
) -> Result<(), ParleyError> {
    for (name, value) in table {
        let key = Key::namespaced(prefix, name);
        match value {
            Value::String(template) => out.push((key, Entry::single(template.as_str()))),
            Value::Object(inner) if is_plural_table(inner) => {
                out.push((key.clone(), Entry::plural(plural_forms(&key, inner, origin)?)));
            }
            Value::Object(inner) => flatten(key.as_str(), inner, out, origin)?,
            other => {
                return Err(ParleyError::Bundle(format!(
                    "{origin}: '{key}' must be a string or a table, found {}",
                    value_kind(other)
                )))
            }
        }
    }
    Ok(())
}

fn is_plural_table(table: &Map<String, Value>) -> bool {
    let mut has_category = false;
    for name in table.keys() {
        if name == KIND_FIELD {
            continue;
        }
        if name.parse::<PluralCategory>().is_err() {
            return false;
        }
        has_category = true;
    }
    has_category
}

fn plural_forms(
    key: &Key,
    table: &Map<String, Value>,
    origin: &str,
) -> Result<PluralForms, ParleyError> {
    let other = template(table, key, PluralCategory::Other.as_str(), origin)?.ok_or_else(|| {
        ParleyError::Bundle(format!("{origin}: plural entry '{key}' has no 'other' form"))
    })?;
    let mut forms = PluralForms::new(other);
    for category in PluralCategory::ALL {
        if category == PluralCategory::Other {
            continue;
        }
        if let Some(text) = template(table, key, category.as_str(), origin)? {
            forms = forms.with(category, text);
        }
    }

    if let Some(kind) = template(table, key, KIND_FIELD, origin)? {
        let kind = kind
            .parse::<PluralRuleKind>()
            .map_err(|e| ParleyError::Bundle(format!("{origin}: '{key}': {e}")))?;
        forms = forms.with_kind(kind);
    }
    Ok(forms)
}

fn template<'a>(
    table: &'a Map<String, Value>,
    key: &Key,
    name: &str,
    origin: &str,
) -> Result<Option<&'a str>, ParleyError> {
    match table.get(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ParleyError::Bundle(format!(
            "{origin}: '{key}.{name}' must be a string, found {}",
            value_kind(other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

//! Locale identifiers.
//!
//! A [`Locale`] is a language tag (language subtag, optional script and region).
//! Equality is an exact tag match; [`Locale::alternatives`] supplies the coarser
//! matches used during fallback (`fr-CA` then `fr`), and [`Locale::root`] is the
//! final catch-all (`und`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unic_langid::LanguageIdentifier;

use crate::error::LocaleError;

/// A structured language/region identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(LanguageIdentifier);

impl Locale {
    /// Parse a BCP 47-ish tag. `_` and `-` separators are both accepted;
    /// `root` and the empty string map to [`Locale::root`].
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("root") {
            return Ok(Self::root());
        }
        trimmed
            .parse::<LanguageIdentifier>()
            .map(Self)
            .map_err(|_| LocaleError::Invalid {
                tag: tag.to_string(),
            })
    }

    /// The root locale (`und`).
    pub fn root() -> Self {
        Self(LanguageIdentifier::default())
    }

    pub fn from_langid(langid: LanguageIdentifier) -> Self {
        Self(langid)
    }

    pub fn langid(&self) -> &LanguageIdentifier {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.language.is_empty()
            && self.0.script.is_none()
            && self.0.region.is_none()
            && self.0.variants().next().is_none()
    }

    /// Primary language subtag, lowercase (`und` for root).
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }

    pub fn region(&self) -> Option<&str> {
        self.0.region.as_ref().map(|r| r.as_str())
    }

    /// The same locale reduced to its language subtag.
    pub fn language_only(&self) -> Self {
        Self(LanguageIdentifier::from_parts(
            self.0.language,
            None,
            None,
            &[],
        ))
    }

    /// This locale followed by progressively coarser forms, most specific first.
    ///
    /// `zh-Hant-TW` yields `zh-Hant-TW`, `zh-Hant`, `zh`. Root is never
    /// appended unless `self` is root.
    pub fn alternatives(&self) -> Vec<Locale> {
        let id = &self.0;
        let candidates = [
            self.clone(),
            Self(LanguageIdentifier::from_parts(
                id.language,
                id.script,
                id.region,
                &[],
            )),
            Self(LanguageIdentifier::from_parts(id.language, id.script, None, &[])),
            self.language_only(),
        ];

        let mut out: Vec<Locale> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !out.contains(&candidate) {
                out.push(candidate);
            }
        }
        out
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<LanguageIdentifier> for Locale {
    fn from(value: LanguageIdentifier) -> Self {
        Self(value)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::parse(&tag).map_err(serde::de::Error::custom)
    }
}

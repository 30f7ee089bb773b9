//! CLDR plural rules.
//!
//! [`PluralRules`] maps an integer quantity, a rule kind and a locale to a
//! [`PluralCategory`]. [`CldrPluralRules`] answers from the CLDR data bundled
//! with `icu_plurals`, for both cardinal ("5 items") and ordinal ("5th place")
//! rules. Quantities are integers; negative values use their magnitude.
//!
//! `Other` is always a valid answer, and every [`PluralForms`] carries an
//! `other` template, so a missing category never leaves a message without text.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use icu_plurals::{
    PluralCategory as IcuPluralCategory, PluralRuleType, PluralRules as IcuPluralRules,
};
use parley_core::Locale;
use tracing::debug;

/// CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Few,
        Self::Many,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown plural category '{s}'"))
    }
}

/// Which CLDR rule set applies: counting things or ranking them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PluralRuleKind {
    #[default]
    Cardinal,
    Ordinal,
}

impl fmt::Display for PluralRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cardinal => f.write_str("cardinal"),
            Self::Ordinal => f.write_str("ordinal"),
        }
    }
}

impl FromStr for PluralRuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardinal" => Ok(Self::Cardinal),
            "ordinal" => Ok(Self::Ordinal),
            other => Err(format!("unknown plural rule kind '{other}'")),
        }
    }
}

/// Templates for one plural message, keyed by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralForms {
    zero: Option<String>,
    one: Option<String>,
    two: Option<String>,
    few: Option<String>,
    many: Option<String>,
    other: String,
    kind: PluralRuleKind,
}

impl PluralForms {
    /// Forms with only the mandatory `other` template and cardinal rules.
    pub fn new(other: impl Into<String>) -> Self {
        Self {
            zero: None,
            one: None,
            two: None,
            few: None,
            many: None,
            other: other.into(),
            kind: PluralRuleKind::Cardinal,
        }
    }

    /// Set the template for `category`. Setting `Other` replaces the fallback.
    pub fn with(mut self, category: PluralCategory, template: impl Into<String>) -> Self {
        let template = template.into();
        match category {
            PluralCategory::Zero => self.zero = Some(template),
            PluralCategory::One => self.one = Some(template),
            PluralCategory::Two => self.two = Some(template),
            PluralCategory::Few => self.few = Some(template),
            PluralCategory::Many => self.many = Some(template),
            PluralCategory::Other => self.other = template,
        }
        self
    }

    pub fn with_kind(mut self, kind: PluralRuleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> PluralRuleKind {
        self.kind
    }

    pub fn other(&self) -> &str {
        &self.other
    }

    /// The template for `category`, if this message defines one.
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        match category {
            PluralCategory::Zero => self.zero.as_deref(),
            PluralCategory::One => self.one.as_deref(),
            PluralCategory::Two => self.two.as_deref(),
            PluralCategory::Few => self.few.as_deref(),
            PluralCategory::Many => self.many.as_deref(),
            PluralCategory::Other => Some(&self.other),
        }
    }

    /// The template for `category`, falling back to `other`.
    pub fn select(&self, category: PluralCategory) -> &str {
        self.get(category).unwrap_or(&self.other)
    }

    /// Categories with a template, in CLDR order.
    pub fn categories(&self) -> Vec<PluralCategory> {
        PluralCategory::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_some())
            .collect()
    }
}

/// Maps a quantity to a plural category for a locale.
pub trait PluralRules: Send + Sync {
    fn category(&self, quantity: i64, kind: PluralRuleKind, locale: &Locale) -> PluralCategory;
}

/// A rule function over the magnitude of the quantity.
pub type RuleFn = fn(u64) -> PluralCategory;

/// CLDR rules from `icu_plurals`, with optional per-language overrides.
#[derive(Debug, Clone, Default)]
pub struct CldrPluralRules {
    overrides: HashMap<(String, PluralRuleKind), RuleFn>,
}

impl CldrPluralRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rule for `language` (primary subtag, e.g. `"br"`).
    pub fn with_rule(mut self, language: &str, kind: PluralRuleKind, rule: RuleFn) -> Self {
        self.overrides
            .insert((language.to_ascii_lowercase(), kind), rule);
        self
    }

    /// The CLDR category for `quantity`, ignoring overrides. Locales without
    /// CLDR data use the root rules, which always answer `Other`.
    pub fn cldr_category(quantity: i64, kind: PluralRuleKind, locale: &Locale) -> PluralCategory {
        let tag = locale.to_string();
        let icu_locale = match tag.parse::<icu_locale_core::Locale>() {
            Ok(icu_locale) => icu_locale,
            Err(e) => {
                debug!("No CLDR locale for '{tag}': {e}");
                return PluralCategory::Other;
            }
        };
        let rule_type = match kind {
            PluralRuleKind::Cardinal => PluralRuleType::Cardinal,
            PluralRuleKind::Ordinal => PluralRuleType::Ordinal,
        };
        match IcuPluralRules::try_new(icu_locale.into(), rule_type.into()) {
            Ok(rules) => rules.category_for(quantity).into(),
            Err(e) => {
                debug!("No {kind} plural rules for '{tag}': {e}");
                PluralCategory::Other
            }
        }
    }
}

impl PluralRules for CldrPluralRules {
    fn category(&self, quantity: i64, kind: PluralRuleKind, locale: &Locale) -> PluralCategory {
        match self.overrides.get(&(locale.language().to_string(), kind)) {
            Some(rule) => rule(quantity.unsigned_abs()),
            None => Self::cldr_category(quantity, kind, locale),
        }
    }
}

impl From<IcuPluralCategory> for PluralCategory {
    fn from(category: IcuPluralCategory) -> Self {
        match category {
            IcuPluralCategory::Zero => Self::Zero,
            IcuPluralCategory::One => Self::One,
            IcuPluralCategory::Two => Self::Two,
            IcuPluralCategory::Few => Self::Few,
            IcuPluralCategory::Many => Self::Many,
            IcuPluralCategory::Other => Self::Other,
        }
    }
}

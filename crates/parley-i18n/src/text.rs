//! Localizable text values.
//!
//! A [`Text`] is a deferred message: a key plus arguments, resolved into a
//! string only when a [`crate::Localizer`] renders it for a [`Context`]. Texts
//! are plain data. They can be built anywhere, cloned freely, and nested as
//! arguments of other texts.
//!
//! [`Context`]: parley_core::Context

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use parley_core::Key;

use crate::plural::PluralRuleKind;

/// A template argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Rendered in the same context before substitution.
    Text(Box<Text>),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<NaiveDate> for Arg {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for Arg {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Text> for Arg {
    fn from(value: Text) -> Self {
        Self::Text(Box::new(value))
    }
}

/// A message that is localized at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum Text {
    /// Already final; rendered as-is in every locale.
    Literal(String),
    Single {
        key: Key,
        args: Vec<Arg>,
    },
    Plural {
        key: Key,
        args: Vec<Arg>,
        quantity: i64,
        /// Overrides the rule kind stored with the entry.
        kind: Option<PluralRuleKind>,
    },
}

impl Text {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn single(key: impl Into<Key>) -> Self {
        Self::Single {
            key: key.into(),
            args: Vec::new(),
        }
    }

    pub fn plural(key: impl Into<Key>, quantity: i64) -> Self {
        Self::Plural {
            key: key.into(),
            args: Vec::new(),
            quantity,
            kind: None,
        }
    }

    /// Append one argument. Literals ignore arguments.
    pub fn arg(mut self, value: impl Into<Arg>) -> Self {
        if let Self::Single { args, .. } | Self::Plural { args, .. } = &mut self {
            args.push(value.into());
        }
        self
    }

    /// Append several arguments of one type.
    pub fn args<A: Into<Arg>>(mut self, values: impl IntoIterator<Item = A>) -> Self {
        if let Self::Single { args, .. } | Self::Plural { args, .. } = &mut self {
            args.extend(values.into_iter().map(Into::into));
        }
        self
    }

    /// Select plural forms with `kind` rules. No effect on non-plural texts.
    pub fn with_kind(mut self, new_kind: PluralRuleKind) -> Self {
        if let Self::Plural { kind, .. } = &mut self {
            *kind = Some(new_kind);
        }
        self
    }

    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::Literal(_) => None,
            Self::Single { key, .. } | Self::Plural { key, .. } => Some(key),
        }
    }

    pub fn arguments(&self) -> &[Arg] {
        match self {
            Self::Literal(_) => &[],
            Self::Single { args, .. } | Self::Plural { args, .. } => args,
        }
    }

    pub fn quantity(&self) -> Option<i64> {
        match self {
            Self::Plural { quantity, .. } => Some(*quantity),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// Literals show their text; keyed texts show the key.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Single { key, .. } | Self::Plural { key, .. } => fmt::Display::fmt(key, f),
        }
    }
}

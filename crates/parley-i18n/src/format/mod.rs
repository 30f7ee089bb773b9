//! MessageFormat-style template interpolation.
//!
//! Supported placeholders:
//!
//! | Placeholder               | Output                                   |
//! |---------------------------|------------------------------------------|
//! | `{0}`                     | argument 0, formatted by its type        |
//! | `{0,number}`              | locale-grouped number                    |
//! | `{0,number,integer}`      | number rounded to an integer             |
//! | `{0,number,percent}`      | number scaled by 100 with a percent sign |
//! | `{0,date}` / `{0,time}`   | short date / time                        |
//! | `{0,datetime}`            | short date and time                      |
//! | `{#}`                     | the plural quantity                      |
//!
//! A single quote starts or ends literal text (`'{0}'` renders `{0}`), and two
//! quotes produce one apostrophe.

mod date;
mod number;


use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};
use parley_core::Locale;
use thiserror::Error;

pub use date::{format_date, format_datetime, format_time};
pub use number::{format_decimal, format_integer, format_percent};

/// A fully resolved template argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Str(Cow<'a, str>),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "a string",
            Self::Int(_) => "an integer",
            Self::Float(_) => "a decimal number",
            Self::Date(_) => "a date",
            Self::DateTime(_) => "a date-time",
        }
    }
}

/// A template that cannot be rendered with the given arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed '{{' at byte {position}")]
    UnclosedPlaceholder { position: usize },

    #[error("unmatched '}}' at byte {position}")]
    UnmatchedClose { position: usize },

    #[error("invalid placeholder '{{{placeholder}}}'")]
    InvalidPlaceholder { placeholder: String },

    #[error("argument {index} is referenced but only {supplied} supplied")]
    MissingArgument { index: usize, supplied: usize },

    #[error("'{{#}}' used without a quantity")]
    MissingQuantity,

    #[error("unknown format type '{format}'")]
    UnknownFormat { format: String },

    #[error("unknown {format} style '{style}'")]
    UnknownStyle { format: String, style: String },

    #[error("{placeholder} is {found}, expected {expected}")]
    TypeMismatch {
        placeholder: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Substitute `args` (and `quantity` for `{#}`) into `template`, formatting
/// numbers and dates for `locale`.
pub fn format(
    template: &str,
    args: &[Value<'_>],
    quantity: Option<i64>,
    locale: &Locale,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut quoted = false;
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '\'' => {
                if chars.peek().map(|(_, c)| *c) == Some('\'') {
                    chars.next();
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            _ if quoted => out.push(ch),
            '{' => {
                let mut end = None;
                for (p, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            end = Some(p);
                            break;
                        }
                        '{' => return Err(TemplateError::UnclosedPlaceholder { position }),
                        _ => {}
                    }
                }
                let end = end.ok_or(TemplateError::UnclosedPlaceholder { position })?;
                let placeholder = &template[position + 1..end];
                render_placeholder(placeholder, args, quantity, locale, &mut out)?;
            }
            '}' => return Err(TemplateError::UnmatchedClose { position }),
            _ => out.push(ch),
        }
    }

    Ok(out)
}

fn render_placeholder(
    placeholder: &str,
    args: &[Value<'_>],
    quantity: Option<i64>,
    locale: &Locale,
    out: &mut String,
) -> Result<(), TemplateError> {
    let mut parts = placeholder.splitn(3, ',').map(str::trim);
    let target = parts.next().unwrap_or_default();
    let format_type = parts.next();
    let style = parts.next();

    let quantity_value;
    let (value, name) = if target == "#" {
        quantity_value = Value::Int(quantity.ok_or(TemplateError::MissingQuantity)?);
        (&quantity_value, "{#}".to_string())
    } else {
        let index: usize = target
            .parse()
            .map_err(|_| TemplateError::InvalidPlaceholder {
                placeholder: placeholder.to_string(),
            })?;
        let value = args.get(index).ok_or(TemplateError::MissingArgument {
            index,
            supplied: args.len(),
        })?;
        (value, format!("argument {index}"))
    };

    let mismatch = |expected: &'static str| TemplateError::TypeMismatch {
        placeholder: name.clone(),
        expected,
        found: value.kind(),
    };

    let rendered = match (format_type, style) {
        (None, _) => match value {
            Value::Str(s) => s.to_string(),
            Value::Int(n) => format_integer(*n, locale),
            Value::Float(x) => format_decimal(*x, locale),
            Value::Date(d) => format_date(*d, locale),
            Value::DateTime(dt) => format_datetime(*dt, locale),
        },
        (Some("number"), style) => {
            let number = match value {
                Value::Int(n) => *n as f64,
                Value::Float(x) => *x,
                _ => return Err(mismatch("a number")),
            };
            match style {
                None => match value {
                    Value::Int(n) => format_integer(*n, locale),
                    _ => format_decimal(number, locale),
                },
                Some("integer") => format_integer(number.round() as i64, locale),
                Some("percent") => format_percent(number, locale),
                Some(other) => {
                    return Err(TemplateError::UnknownStyle {
                        format: "number".to_string(),
                        style: other.to_string(),
                    })
                }
            }
        }
        (Some(kind @ ("date" | "time" | "datetime")), style) => {
            if let Some(style) = style.filter(|s| *s != "short") {
                return Err(TemplateError::UnknownStyle {
                    format: kind.to_string(),
                    style: style.to_string(),
                });
            }
            match (kind, value) {
                ("date", Value::Date(d)) => format_date(*d, locale),
                ("date", Value::DateTime(dt)) => format_date(dt.date(), locale),
                ("time", Value::DateTime(dt)) => format_time(dt.time(), locale),
                ("datetime", Value::DateTime(dt)) => format_datetime(*dt, locale),
                ("date", _) => return Err(mismatch("a date")),
                _ => return Err(mismatch("a date-time")),
            }
        }
        (Some(other), _) => {
            return Err(TemplateError::UnknownFormat {
                format: other.to_string(),
            })
        }
    };

    out.push_str(&rendered);
    Ok(())
}

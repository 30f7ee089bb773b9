//! Locale-aware number formatting.

use parley_core::Locale;

const NARROW_NBSP: &str = "\u{202f}";
const NBSP: &str = "\u{a0}";

/// Digits kept after the decimal separator for non-integers.
const MAX_FRACTION_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Symbols {
    group: &'static str,
    decimal: char,
    /// Digits needed in front of the first separator before grouping kicks in.
    min_grouping: usize,
    percent_prefix: &'static str,
    percent_suffix: &'static str,
}

const ROOT: Symbols = Symbols {
    group: "",
    decimal: '.',
    min_grouping: 1,
    percent_prefix: "",
    percent_suffix: "%",
};

const COMMA_DOT: Symbols = Symbols {
    group: ",",
    ..ROOT
};

const DOT_COMMA: Symbols = Symbols {
    group: ".",
    decimal: ',',
    ..ROOT
};

const SPACE_COMMA: Symbols = Symbols {
    group: NBSP,
    decimal: ',',
    percent_suffix: "\u{a0}%",
    ..ROOT
};

fn symbols(locale: &Locale) -> Symbols {
    if locale.is_root() {
        return ROOT;
    }
    match (locale.language(), locale.region()) {
        ("es", Some("MX" | "US" | "419")) => COMMA_DOT,
        ("de", Some("CH" | "LI")) => Symbols {
            group: "\u{2019}",
            ..ROOT
        },
        ("fr", Some("CH")) => Symbols {
            group: NARROW_NBSP,
            percent_suffix: "%",
            ..ROOT
        },
        ("fr", _) => Symbols {
            group: NARROW_NBSP,
            percent_suffix: "\u{202f}%",
            ..SPACE_COMMA
        },
        ("es", _) => Symbols {
            min_grouping: 2,
            percent_suffix: "\u{a0}%",
            ..DOT_COMMA
        },
        ("pl", _) => Symbols {
            min_grouping: 2,
            percent_suffix: "%",
            ..SPACE_COMMA
        },
        ("de" | "da" | "el", _) => Symbols {
            percent_suffix: "\u{a0}%",
            ..DOT_COMMA
        },
        ("tr", _) => Symbols {
            percent_prefix: "%",
            percent_suffix: "",
            ..DOT_COMMA
        },
        ("it" | "pt" | "nl" | "id" | "ro" | "hr" | "sl" | "sr", _) => DOT_COMMA,
        ("ru" | "uk" | "be" | "cs" | "sk" | "sv" | "nb" | "no" | "nn" | "fi" | "bg" | "lt"
        | "lv" | "et", _) => SPACE_COMMA,
        ("hu", _) => Symbols {
            percent_suffix: "%",
            ..SPACE_COMMA
        },
        _ => COMMA_DOT,
    }
}

fn group_digits(digits: &str, symbols: &Symbols) -> String {
    if symbols.group.is_empty() || digits.len() < 3 + symbols.min_grouping {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * symbols.group.len());
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(symbols.group);
        }
        out.push(ch);
    }
    out
}

/// `1234567` -> `1,234,567` (en), `1.234.567` (de), `1 234 567` (fr).
pub fn format_integer(n: i64, locale: &Locale) -> String {
    let symbols = symbols(locale);
    let digits = group_digits(&n.unsigned_abs().to_string(), &symbols);
    if n < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Up to three fraction digits, trailing zeros trimmed.
pub fn format_decimal(x: f64, locale: &Locale) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        let sign = if x < 0.0 { "-" } else { "" };
        return format!("{sign}∞");
    }

    let symbols = symbols(locale);
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, x.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::new();
    let is_zero = whole.bytes().all(|b| b == b'0') && fraction.is_empty();
    if x < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(whole, &symbols));
    if !fraction.is_empty() {
        out.push(symbols.decimal);
        out.push_str(fraction);
    }
    out
}

/// `0.25` -> `25%` (en), `25 %` (fr).
pub fn format_percent(x: f64, locale: &Locale) -> String {
    let symbols = symbols(locale);
    let scaled = if x.is_finite() {
        format_integer((x * 100.0).round() as i64, locale)
    } else {
        format_decimal(x, locale)
    };
    format!(
        "{}{scaled}{}",
        symbols.percent_prefix, symbols.percent_suffix
    )
}

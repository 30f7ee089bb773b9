//! Short date and time patterns per locale.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use parley_core::Locale;

const ISO: &str = "%Y-%m-%d";
const DAY_MONTH_SLASH: &str = "%d/%m/%Y";
const DAY_MONTH_DOT: &str = "%d.%m.%Y";
const YEAR_SLASH: &str = "%Y/%m/%d";
const US: &str = "%-m/%-d/%Y";

fn date_pattern(locale: &Locale) -> &'static str {
    if locale.is_root() {
        return ISO;
    }
    match (locale.language(), locale.region()) {
        ("en", None | Some("US" | "PH" | "PR")) => US,
        ("en" | "fr", Some("CA")) => ISO,
        ("en" | "fr" | "es" | "it" | "pt" | "el" | "vi" | "id" | "ms" | "ca" | "ga" | "cy"
        | "he", _) => DAY_MONTH_SLASH,
        ("de" | "ru" | "pl" | "cs" | "sk" | "fi" | "nb" | "no" | "nn" | "da" | "tr" | "uk"
        | "ro" | "hr" | "sr" | "bg" | "et" | "lv" | "be" | "sl", _) => DAY_MONTH_DOT,
        ("nl", _) => "%d-%m-%Y",
        ("sv" | "lt", _) => ISO,
        ("hu", _) => "%Y. %m. %d.",
        ("ja" | "zh" | "ko", _) => YEAR_SLASH,
        _ => ISO,
    }
}

fn uses_twelve_hour_clock(locale: &Locale) -> bool {
    locale.language() == "en" && !matches!(locale.region(), Some("GB" | "IE"))
}

pub fn format_date(date: NaiveDate, locale: &Locale) -> String {
    date.format(date_pattern(locale)).to_string()
}

/// `15:05`, or `3:05 PM` for twelve-hour English locales.
pub fn format_time(time: NaiveTime, locale: &Locale) -> String {
    let pattern = if uses_twelve_hour_clock(locale) {
        "%-I:%M %p"
    } else {
        "%H:%M"
    };
    time.format(pattern).to_string()
}

pub fn format_datetime(datetime: NaiveDateTime, locale: &Locale) -> String {
    let date = format_date(datetime.date(), locale);
    let time = format_time(datetime.time(), locale);
    if locale.language() == "en" {
        format!("{date}, {time}")
    } else {
        format!("{date} {time}")
    }
}

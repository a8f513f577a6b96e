use crate::error::XerResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::sync::OnceLock;

/// Working hours per day assumed when a calendar does not say otherwise.
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// A date field that reads as unset instead of failing the row when its text
/// does not match the date pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LenientField {
    pub table: String,
    pub field: String,
}

impl LenientField {
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub decimal_separator: char,
    /// Stripped from numeric fields before parsing, if set.
    pub grouping_separator: Option<char>,
    pub default_day_hours: f64,
    pub lenient_date_fields: Vec<LenientField>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            decimal_separator: process_decimal_separator(),
            grouping_separator: None,
            default_day_hours: DEFAULT_HOURS_PER_DAY,
            lenient_date_fields: vec![
                LenientField::new("TASK", "external_early_start_date"),
                LenientField::new("TASK", "external_late_end_date"),
            ],
        }
    }
}

impl ParseOptions {
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    pub fn with_grouping_separator(mut self, separator: char) -> Self {
        self.grouping_separator = Some(separator);
        self
    }

    pub fn with_default_day_hours(mut self, hours: f64) -> Self {
        self.default_day_hours = hours;
        self
    }

    pub fn is_lenient_date(&self, table: &str, field: &str) -> bool {
        self.lenient_date_fields
            .iter()
            .any(|lenient| lenient.table == table && lenient.field == field)
    }

    /// The configured day length, or [`DEFAULT_HOURS_PER_DAY`] when the
    /// configured value could not be used as a divisor.
    pub fn fallback_day_hours(&self) -> f64 {
        if self.default_day_hours.is_finite() && self.default_day_hours > 0.0 {
            self.default_day_hours
        } else {
            DEFAULT_HOURS_PER_DAY
        }
    }

    pub fn from_json_str(input: &str) -> XerResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> XerResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Decimal separator of the process locale, read once from `LC_ALL`,
/// `LC_NUMERIC` and `LANG` in that order.
pub fn process_decimal_separator() -> char {
    static SEPARATOR: OnceLock<char> = OnceLock::new();
    *SEPARATOR.get_or_init(|| {
        ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .map(|locale| decimal_separator_for_locale(&locale))
            .unwrap_or('.')
    })
}

const COMMA_DECIMAL_LANGUAGES: &[&str] = &[
    "af", "bg", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fr", "gl", "hr", "hu",
    "id", "is", "it", "lt", "lv", "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl",
    "sr", "sv", "tr", "uk", "vi",
];

/// Maps a POSIX locale name such as `de_DE.UTF-8` to its decimal separator.
pub fn decimal_separator_for_locale(locale: &str) -> char {
    let language = locale
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    if COMMA_DECIMAL_LANGUAGES.contains(&language.as_str()) {
        ','
    } else {
        '.'
    }
}

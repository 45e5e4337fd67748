//! Module for handling date parsing and formatting.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 (CE day 1) and the Unix epoch
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Configuration for date format handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// Date format strings tried in order when parsing
    pub date_formats: Vec<String>,
    /// Format used when printing dates (chart labels, summary)
    pub default_format: String,
    /// Try to guess the format from the string shape after the listed formats fail
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%m/%d/%Y".to_string(), // US: 1/15/2019
                "%Y-%m-%d".to_string(), // ISO format: 2019-01-15
            ],
            default_format: "%Y-%m-%d".to_string(),
            enable_format_detection: false,
        }
    }
}

impl DateFormatConfig {
    /// Use exactly the given formats, in order
    #[must_use]
    pub fn with_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable heuristic format detection
    #[must_use]
    pub const fn with_detection(mut self, enabled: bool) -> Self {
        self.enable_format_detection = enabled;
        self
    }

    /// Format a date with the display format
    #[must_use]
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.default_format).to_string()
    }
}

/// Parse a date string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect the date format based on string patterns
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    // YYYY-MM-DD
    if s.len() == 10 && s.chars().nth(4) == Some('-') && s.chars().nth(7) == Some('-') {
        return Some("%Y-%m-%d");
    }

    for separator in ['/', '-'] {
        let parts: Vec<&str> = s.split(separator).collect();
        if parts.len() != 3 {
            continue;
        }
        if parts[0].len() == 4 {
            return Some(if separator == '/' { "%Y/%m/%d" } else { "%Y-%m-%d" });
        }
        if parts[2].len() == 4 {
            let first = parts[0].parse::<u8>().ok()?;
            // Month-first unless the first part cannot be a month
            return Some(match (separator, first > 12) {
                ('/', true) => "%d/%m/%Y",
                ('/', false) => "%m/%d/%Y",
                (_, true) => "%d-%m-%Y",
                (_, false) => "%m-%d-%Y",
            });
        }
    }

    if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return Some("%d.%m.%Y");
        }
    }

    // YYYYMMDD
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d");
    }

    None
}

/// Convert a date to Arrow's Date32 representation (days since the Unix epoch)
#[must_use]
pub fn naive_to_date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Convert an Arrow Date32 value back to a calendar date
#[must_use]
pub fn date32_to_naive(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

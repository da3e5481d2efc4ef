//! Timestamp formatting with a configurable pattern.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::{ErrorKind, LbfError};

pub const DEFAULT_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormat {
    pattern: String,
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl DateTimeFormat {
    /// Use `pattern` (strftime syntax) for formatting and parsing.
    pub fn new(pattern: impl Into<String>) -> Result<Self, LbfError> {
        let pattern = pattern.into();
        if chrono::format::StrftimeItems::new(&pattern)
            .any(|item| matches!(item, chrono::format::Item::Error))
        {
            return Err(LbfError::new(
                ErrorKind::InvalidInput,
                format!("'{pattern}' is not a valid date format"),
            ));
        }
        Ok(Self { pattern })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn format<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        at.format(&self.pattern).to_string()
    }

    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Utc::now())
    }

    /// Format a Unix timestamp in seconds, read as UTC.
    pub fn format_timestamp(&self, seconds: i64) -> Result<String, LbfError> {
        let at = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
            LbfError::new(
                ErrorKind::InvalidInput,
                format!("timestamp {seconds} is out of range"),
            )
        })?;
        Ok(self.format(&at))
    }

    /// Parse a local-less date time written in this format, read as UTC.
    pub fn parse(&self, input: &str) -> Result<DateTime<Utc>, LbfError> {
        NaiveDateTime::parse_from_str(input, &self.pattern)
            .map(|naive| naive.and_utc())
            .map_err(|e| {
                LbfError::new(
                    ErrorKind::InvalidInput,
                    format!("'{input}' does not match '{}': {e}", self.pattern),
                )
            })
    }
}

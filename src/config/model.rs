//! Configuration payload and the [`ConfigStore`] holding it.
//!
//! A payload maps top-level namespaces (`paths`, `environment`, ...) to
//! [`Section`]s of arbitrary JSON values. Loading is shallow: a section is
//! replaced or added as a whole, never merged field by field.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, LbfError};
use crate::util::datetime::DateTimeFormat;

pub const SECTION_ENVIRONMENT: &str = "environment";
pub const SECTION_PATHS: &str = "paths";
pub const FIELD_MODE: &str = "mode";
pub const FIELD_HOME: &str = "home";
pub const SECTION_DATETIME: &str = "datetime";
pub const FIELD_FORMAT: &str = "format";

pub type Section = serde_json::Map<String, Value>;
pub type Payload = BTreeMap<String, Section>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvironmentMode {
    #[default]
    Production,
    Maintenance,
    Development,
    Archive,
}

impl EnvironmentMode {
    pub const ALL: [Self; 4] = [
        Self::Production,
        Self::Maintenance,
        Self::Development,
        Self::Archive,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "PRODUCTION",
            Self::Maintenance => "MAINTENANCE",
            Self::Development => "DEVELOPMENT",
            Self::Archive => "ARCHIVE",
        }
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentMode {
    type Err = LbfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                LbfError::new(
                    ErrorKind::InvalidInput,
                    format!("unknown environment mode '{s}'"),
                )
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigStore {
    payload: Payload,
}

impl ConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn from_payload(payload: Payload) -> Self {
        Self { payload }
    }

    /// Load `data` into the store.
    ///
    /// Without `overwrite`, every section named in `data` replaces the
    /// existing section of the same name and other sections are kept.
    /// With `overwrite`, the previous payload is discarded entirely.
    pub fn load(&mut self, data: Payload, overwrite: bool) {
        if overwrite {
            self.payload = data;
            return;
        }
        for (key, section) in data {
            self.payload.insert(key, section);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Section> {
        self.payload.get(key)
    }

    /// Look up a single field inside a section.
    #[must_use]
    pub fn value(&self, section: &str, field: &str) -> Option<&Value> {
        self.get(section).and_then(|s| s.get(field))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.payload.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// `environment.mode`, defaulting to production when unset.
    pub fn environment_mode(&self) -> Result<EnvironmentMode, LbfError> {
        match self.value(SECTION_ENVIRONMENT, FIELD_MODE) {
            None | Some(Value::Null) => Ok(EnvironmentMode::default()),
            Some(Value::String(s)) => s.parse(),
            Some(other) => Err(LbfError::new(
                ErrorKind::InvalidInput,
                format!("environment.mode must be a string, got {other}"),
            )),
        }
    }

    /// `paths.home`, if configured as a non-empty string.
    #[must_use]
    pub fn home_path(&self) -> Option<PathBuf> {
        self.value(SECTION_PATHS, FIELD_HOME)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// `datetime.format`, or the default pattern when unset.
    pub fn date_format(&self) -> Result<DateTimeFormat, LbfError> {
        match self.value(SECTION_DATETIME, FIELD_FORMAT) {
            None | Some(Value::Null) => Ok(DateTimeFormat::default()),
            Some(Value::String(pattern)) => DateTimeFormat::new(pattern.as_str()),
            Some(other) => Err(LbfError::new(
                ErrorKind::InvalidInput,
                format!("datetime.format must be a string, got {other}"),
            )),
        }
    }
}

//! Configuration validation with detailed error reporting.
//!
//! [`validate`] checks a parsed [`Payload`] for the problems that would
//! otherwise surface at request time: unknown environment modes, empty or
//! relative home paths, and non-string path entries. All problems are
//! collected and returned together, each with an optional suggestion.

use std::path::Path;

use serde_json::Value;

use super::model::{
    EnvironmentMode, Payload, FIELD_FORMAT, FIELD_HOME, FIELD_MODE, SECTION_DATETIME,
    SECTION_ENVIRONMENT, SECTION_PATHS,
};
use crate::error::ValidationError;
use crate::util::datetime::{DateTimeFormat, DEFAULT_PATTERN};

/// Validate an environment mode string. Returns `Ok(())` or a human-readable error.
pub fn validate_mode(mode: &str) -> Result<(), String> {
    mode.parse::<EnvironmentMode>()
        .map(|_| ())
        .map_err(|_| format!("'{mode}' is not a known environment mode"))
}

/// Validate a configured path. Returns `Ok(())` or a human-readable error.
pub fn validate_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("path cannot be empty".into());
    }
    if !Path::new(path).is_absolute() {
        return Err(format!("path '{path}' must be absolute"));
    }
    Ok(())
}

fn modes_hint() -> String {
    let names: Vec<&str> = EnvironmentMode::ALL.iter().map(EnvironmentMode::as_str).collect();
    format!("expected one of {}", names.join(", "))
}

pub fn validate(payload: &Payload) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if payload.is_empty() {
        errors.push(ValidationError {
            section: "(root)".into(),
            field: "(sections)".into(),
            message: "at least one section must be defined".into(),
            suggestion: Some("run 'lbf init' to create a starter config".into()),
        });
        return Err(errors);
    }

    if let Some(environment) = payload.get(SECTION_ENVIRONMENT) {
        match environment.get(FIELD_MODE) {
            None | Some(Value::Null) => {}
            Some(Value::String(mode)) => {
                if let Err(msg) = validate_mode(mode) {
                    errors.push(ValidationError {
                        section: SECTION_ENVIRONMENT.into(),
                        field: FIELD_MODE.into(),
                        message: msg,
                        suggestion: Some(modes_hint()),
                    });
                }
            }
            Some(other) => errors.push(ValidationError {
                section: SECTION_ENVIRONMENT.into(),
                field: FIELD_MODE.into(),
                message: format!("must be a string, got {other}"),
                suggestion: Some(modes_hint()),
            }),
        }
    }

    if let Some(paths) = payload.get(SECTION_PATHS) {
        for (name, value) in paths {
            match value {
                Value::String(path) => {
                    if let Err(msg) = validate_path(path) {
                        errors.push(ValidationError {
                            section: SECTION_PATHS.into(),
                            field: name.clone(),
                            message: msg,
                            suggestion: if path.is_empty() {
                                None
                            } else {
                                Some(format!("did you mean '/{}'?", path.trim_start_matches("./")))
                            },
                        });
                    }
                }
                other => errors.push(ValidationError {
                    section: SECTION_PATHS.into(),
                    field: name.clone(),
                    message: format!("must be a string, got {other}"),
                    suggestion: None,
                }),
            }
        }
        if !paths.contains_key(FIELD_HOME) {
            errors.push(ValidationError {
                section: SECTION_PATHS.into(),
                field: FIELD_HOME.into(),
                message: "home path is required when a paths section is present".into(),
                suggestion: None,
            });
        }
    }

    if let Some(datetime) = payload.get(SECTION_DATETIME) {
        let problem = match datetime.get(FIELD_FORMAT) {
            None | Some(Value::Null) => None,
            Some(Value::String(pattern)) => DateTimeFormat::new(pattern.as_str())
                .err()
                .map(|e| e.to_string()),
            Some(other) => Some(format!("must be a string, got {other}")),
        };
        if let Some(message) = problem {
            errors.push(ValidationError {
                section: SECTION_DATETIME.into(),
                field: FIELD_FORMAT.into(),
                message,
                suggestion: Some(format!("try '{DEFAULT_PATTERN}'")),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, payload: &Payload) -> String {
    let mut lines = vec![format!("  {} sections\n", payload.len())];

    for (name, section) in payload {
        lines.push(format!("  {name}  -> {} fields", section.len()));
    }

    let mode = payload
        .get(SECTION_ENVIRONMENT)
        .and_then(|s| s.get(FIELD_MODE))
        .and_then(Value::as_str)
        .unwrap_or("PRODUCTION (default)");
    let home = payload
        .get(SECTION_PATHS)
        .and_then(|s| s.get(FIELD_HOME))
        .and_then(Value::as_str)
        .unwrap_or("unset");
    lines.push(format!("\n  mode: {mode}"));
    lines.push(format!("  home: {home}"));

    format!("{} is valid\n{}", path, lines.join("\n"))
}

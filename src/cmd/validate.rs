//! `lbf validate` — check a configuration file for errors.
//!
//! Parses and validates the config file, reporting results in either
//! human-readable text or machine-readable JSON format.

use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::sources::parse_config_str;
use crate::config::validation;
use crate::error::LbfError;

pub fn execute(args: &ValidateArgs) -> Result<(), LbfError> {
    let path = &args.config;

    if !path.exists() {
        return Err(LbfError::ConfigFileNotFound { path: path.clone() });
    }

    let content = std::fs::read_to_string(path)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let payload = parse_config_str(ext, &content, &path.display().to_string())?;

    if let Err(errors) = validation::validate(&payload) {
        match args.format {
            OutputFormat::Text => {
                eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                for error in &errors {
                    eprintln!("{error}");
                }
            }
            OutputFormat::Json => {
                let json_errors: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "section": e.section,
                            "field": e.field,
                            "message": e.message,
                            "suggestion": e.suggestion,
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "errors": json_errors,
                    })
                );
            }
        }
        return Err(LbfError::ConfigValidation { errors });
    }

    match args.format {
        OutputFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&path.display().to_string(), &payload)
            );
        }
        OutputFormat::Json => {
            let sections: Vec<&String> = payload.keys().collect();
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "sections": sections,
                })
            );
        }
    }

    Ok(())
}

#[cfg(all(test, feature = "yaml"))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(config: PathBuf) -> ValidateArgs {
        ValidateArgs {
            config,
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn invalid_file_reports_every_problem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lbf.yaml");
        std::fs::write(
            &path,
            "environment:\n  mode: staging\npaths:\n  home: srv/lbf\n",
        )
        .unwrap();

        match execute(&args(path)) {
            Err(LbfError::ConfigValidation { errors }) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.field == "mode"));
                assert!(errors.iter().any(|e| e.field == "home"));
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[test]
    fn valid_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lbf.yaml");
        std::fs::write(&path, "environment:\n  mode: PRODUCTION\npaths:\n  home: /srv/lbf\n").unwrap();
        assert!(execute(&args(path)).is_ok());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute(&args(dir.path().join("absent.yaml"))).unwrap_err();
        assert!(matches!(err, LbfError::ConfigFileNotFound { .. }));
    }
}

//! `lbf init` — generate a starter configuration file.
//!
//! Builds a starter [`Payload`] for the given home directory and writes it
//! as YAML, JSON, or TOML. With `--first-run` the home directory and its
//! `FIRST_RUN` marker are created too, so the first request lands on the
//! setup page.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::actions::resolver::FIRST_RUN_MARKER;
use crate::cli::{ConfigFormat, InitArgs};
use crate::config::model::{EnvironmentMode, Payload};
use crate::error::LbfError;
use crate::util::datetime::DEFAULT_PATTERN;

const YAML_HEADER: &str = "# LBF config\n#\n\
# environment.mode: PRODUCTION | MAINTENANCE | DEVELOPMENT | ARCHIVE\n\
# paths.home:       application home; a FIRST_RUN file here triggers setup\n\n";

pub fn execute(args: &InitArgs) -> Result<(), LbfError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("lbf.{}", args.format.extension())));

    if output.exists() {
        return Err(LbfError::FileExists { path: output });
    }

    let payload = starter_payload(&args.home, args.full);
    let mut content = serialize_payload(&payload, &args.format)?;
    if matches!(args.format, ConfigFormat::Yaml) {
        content.insert_str(0, YAML_HEADER);
    }

    std::fs::write(&output, content)?;
    println!("Created {}", output.display());

    if args.first_run {
        std::fs::create_dir_all(&args.home)?;
        let marker = args.home.join(FIRST_RUN_MARKER);
        std::fs::write(&marker, b"")?;
        println!("Created {}", marker.display());
    }
    Ok(())
}

#[must_use]
pub fn starter_payload(home: &Path, full: bool) -> Payload {
    let home_str = home.display().to_string();
    let mut value = json!({
        "environment": { "mode": EnvironmentMode::Development.as_str() },
        "paths": { "home": home_str },
    });
    if full {
        value["paths"]["logs"] = Value::String(home.join("logs").display().to_string());
        value["paths"]["cache"] = Value::String(home.join("cache").display().to_string());
        value["datetime"] = json!({ "format": DEFAULT_PATTERN });
    }
    // A literal object of objects always fits the payload shape.
    serde_json::from_value(value).unwrap_or_default()
}

pub fn serialize_payload(payload: &Payload, format: &ConfigFormat) -> Result<String, LbfError> {
    match format {
        #[cfg(feature = "yaml")]
        ConfigFormat::Yaml => {
            serde_yml::to_string(payload).map_err(|e| LbfError::Io(std::io::Error::other(e.to_string())))
        }

        #[cfg(not(feature = "yaml"))]
        ConfigFormat::Yaml => Err(LbfError::UnsupportedFormat("yaml".into())),

        ConfigFormat::Json => serde_json::to_string_pretty(payload)
            .map_err(|e| LbfError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(feature = "toml")]
        ConfigFormat::Toml => toml::to_string_pretty(payload)
            .map_err(|e| LbfError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(not(feature = "toml"))]
        ConfigFormat::Toml => Err(LbfError::UnsupportedFormat("toml".into())),
    }
}

//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! File-based sources (YAML, JSON, TOML) are gated by feature flags and
//! share [`FileSource`](file_source::FileSource). [`parse_config_str`]
//! performs the format-specific deserialization for one-shot loads.

pub mod file_source;

#[cfg(feature = "yaml")]
pub mod yaml;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "toml")]
pub mod toml_source;

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::model::Payload;
use crate::error::LbfError;

/// Parse a config string based on file extension.
pub fn parse_config_str(ext: &str, content: &str, path_display: &str) -> Result<Payload, LbfError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| LbfError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| LbfError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| LbfError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(LbfError::UnsupportedFormat(other.to_string())),
    }
}

/// Build the file source matching `path`'s extension.
pub fn for_path(path: &Path) -> Result<file_source::FileSource, LbfError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(yaml::new(path.to_path_buf())),

        #[cfg(feature = "json")]
        "json" => Ok(json::new(path.to_path_buf())),

        #[cfg(feature = "toml")]
        "toml" => Ok(toml_source::new(path.to_path_buf())),

        other => Err(LbfError::UnsupportedFormat(other.to_string())),
    }
}

/// File names probed in the working directory when no config is given.
pub const DEFAULT_CANDIDATES: [&str; 4] = ["lbf.yaml", "lbf.yml", "lbf.json", "lbf.toml"];

/// Use `explicit` when given, otherwise the first default candidate that exists.
pub async fn resolve_file_source(explicit: Option<&Path>) -> Result<Option<file_source::FileSource>, LbfError> {
    if let Some(path) = explicit {
        return for_path(path).map(Some);
    }

    for name in &DEFAULT_CANDIDATES {
        let path = Path::new(name);
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return for_path(path).map(Some);
        }
    }

    Ok(None)
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

//! Async file-based config source with SHA-256 change detection.
//!
//! [`FileSource`] implements [`ConfigSource`] for any file format by
//! taking a deserialization function at construction time. It reads the
//! file through Tokio, validates the payload, and hashes the raw content
//! to version it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::sha256_hex;
use crate::config::model::Payload;
use crate::config::validation::validate;
use crate::config::{ConfigSource, ConfigVersion};
use crate::error::LbfError;

pub type DeserializeFn = fn(&str) -> Result<Payload, Box<dyn std::error::Error + Send + Sync>>;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    deserialize: DeserializeFn,
}

impl FileSource {
    #[must_use]
    pub fn new(path: PathBuf, name: &'static str, deserialize: DeserializeFn) -> Self {
        Self {
            path,
            name,
            deserialize,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_content(&self) -> Result<String, LbfError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LbfError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                LbfError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<(Payload, ConfigVersion), LbfError> {
        let content = self.read_content().await?;

        let payload = (self.deserialize)(&content).map_err(|e| LbfError::ConfigParse {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if let Err(errors) = validate(&payload) {
            return Err(LbfError::ConfigValidation { errors });
        }

        let hash = sha256_hex(content.as_bytes());
        tracing::debug!(
            path = %self.path.display(),
            sections = payload.len(),
            version = &hash[..8],
            "config file loaded"
        );
        Ok((payload, ConfigVersion::Hash(hash)))
    }

    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, LbfError> {
        let content = self.read_content().await?;
        let hash = sha256_hex(content.as_bytes());
        Ok(*current != ConfigVersion::Hash(hash))
    }
}

#[cfg(all(test, feature = "yaml"))]
mod tests {
    use super::*;
    use crate::config::sources::yaml;

    #[tokio::test]
    async fn missing_file_is_config_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = yaml::new(dir.path().join("absent.yaml"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, LbfError::ConfigFileNotFound { .. }));
    }

    #[tokio::test]
    async fn invalid_payload_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lbf.yaml");
        std::fs::write(&path, "environment:\n  mode: staging\n").unwrap();
        let err = yaml::new(path).load().await.unwrap_err();
        assert!(matches!(err, LbfError::ConfigValidation { .. }));
    }

    #[tokio::test]
    async fn change_detection_follows_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lbf.yaml");
        std::fs::write(&path, "environment:\n  mode: PRODUCTION\n").unwrap();

        let source = yaml::new(path.clone());
        let (payload, version) = source.load().await.unwrap();
        assert_eq!(payload["environment"]["mode"], "PRODUCTION");
        assert!(!source.has_changed(&version).await.unwrap());

        std::fs::write(&path, "environment:\n  mode: MAINTENANCE\n").unwrap();
        assert!(source.has_changed(&version).await.unwrap());
    }
}

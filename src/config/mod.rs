//! Configuration loading, validation, and hot-reloading.
//!
//! Defines the [`ConfigSource`] trait for pluggable config backends, the
//! [`ConfigResolver`] for primary/fallback source resolution, and the
//! [`ConfigVersion`] enum for change detection. The [`model`] submodule
//! holds the [`ConfigStore`](model::ConfigStore) every collaborator reads.

pub mod model;
pub mod sources;
pub mod validation;

use async_trait::async_trait;

use crate::error::LbfError;
use model::Payload;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
}

impl ConfigVersion {
    /// First eight characters of the version, for display.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Hash(h) => h.get(..8).unwrap_or(h),
        }
    }
}

// Used as Box<dyn ConfigSource>, so native async fn in traits won't do.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(Payload, ConfigVersion), LbfError>;
    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, LbfError>;
}

pub struct ConfigResolver {
    primary: Box<dyn ConfigSource>,
    fallback: Option<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(primary: Box<dyn ConfigSource>, fallback: Option<Box<dyn ConfigSource>>) -> Self {
        Self { primary, fallback }
    }

    pub async fn load_with_fallback(&self) -> Result<(Payload, ConfigVersion), LbfError> {
        match self.primary.load().await {
            Ok(result) => Ok(result),
            Err(primary_err) => {
                if let Some(ref fallback) = self.fallback {
                    tracing::warn!(
                        primary = self.primary.name(),
                        fallback = fallback.name(),
                        error = %primary_err,
                        "primary config source failed, using fallback"
                    );
                    fallback.load().await
                } else {
                    Err(primary_err)
                }
            }
        }
    }

    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.primary.name()
    }

    #[must_use]
    pub fn primary(&self) -> &dyn ConfigSource {
        &*self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    struct Fixed(Option<Payload>, &'static str);

    #[async_trait]
    impl ConfigSource for Fixed {
        fn name(&self) -> &'static str {
            self.1
        }

        async fn load(&self) -> Result<(Payload, ConfigVersion), LbfError> {
            self.0
                .clone()
                .map(|p| (p, ConfigVersion::Hash(format!("{}-hash", self.1))))
                .ok_or_else(|| LbfError::new(ErrorKind::FileNotFound, "gone"))
        }

        async fn has_changed(&self, _current: &ConfigVersion) -> Result<bool, LbfError> {
            Ok(false)
        }
    }

    fn payload() -> Payload {
        serde_json::from_value(json!({"environment": {"mode": "PRODUCTION"}})).unwrap()
    }

    #[tokio::test]
    async fn primary_wins_when_it_loads() {
        let resolver = ConfigResolver::new(
            Box::new(Fixed(Some(payload()), "primary")),
            Some(Box::new(Fixed(None, "fallback"))),
        );
        let (_, version) = resolver.load_with_fallback().await.unwrap();
        assert_eq!(version, ConfigVersion::Hash("primary-hash".into()));
        assert_eq!(resolver.primary_name(), "primary");
    }

    #[tokio::test]
    async fn fallback_used_when_primary_fails() {
        let resolver = ConfigResolver::new(
            Box::new(Fixed(None, "primary")),
            Some(Box::new(Fixed(Some(payload()), "fallback"))),
        );
        let (payload, version) = resolver.load_with_fallback().await.unwrap();
        assert_eq!(version.short(), "fallback");
        assert!(payload.contains_key("environment"));
    }

    #[tokio::test]
    async fn primary_error_surfaces_without_fallback() {
        let resolver = ConfigResolver::new(Box::new(Fixed(None, "primary")), None);
        let err = resolver.load_with_fallback().await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::FileNotFound));
    }
}

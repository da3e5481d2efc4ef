//! Routing token resolution.
//!
//! [`ActionResolver::resolve`] turns the posted `route_token` field into a
//! page class name and a fresh per-request token. Two conditions override
//! the posted value, highest precedence first:
//!
//! 1. a `FIRST_RUN` marker file in the configured home directory forces
//!    the `first_run` page;
//! 2. `environment.mode: MAINTENANCE` forces the `maintenance` page.
//!
//! Otherwise the posted value is used with one trailing `.php` removed and
//! `home` rewritten to `index`. Resolution never fails and never checks
//! that the class exists; that is the registry's job.

use std::path::Path;

use super::contract::RequestFields;
use crate::config::model::{ConfigStore, EnvironmentMode};
use crate::util::string::{pascal_case, strip_suffix_once};

pub const ROUTE_FIELD: &str = "route_token";
pub const CLASS_NAMESPACE: &str = "Actions::Pages::";
pub const CLASS_SUFFIX: &str = "Actions";
pub const FIRST_RUN_MARKER: &str = "FIRST_RUN";

pub const INDEX_TOKEN: &str = "index";
pub const FIRST_RUN_TOKEN: &str = "first_run";
pub const MAINTENANCE_TOKEN: &str = "maintenance";

const HOME_ALIAS: &str = "home";
const SCRIPT_SUFFIX: &str = ".php";

/// Class name for a normalized token.
#[must_use]
pub fn class_name_for(token: &str) -> String {
    format!("{CLASS_NAMESPACE}{}{CLASS_SUFFIX}", pascal_case(token))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingToken(String);

impl RoutingToken {
    /// Normalize a posted value. Empty input routes to the index page.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let token = strip_suffix_once(raw, SCRIPT_SUFFIX);
        match token {
            "" | HOME_ALIAS => Self(INDEX_TOKEN.to_string()),
            other => Self(other.to_string()),
        }
    }

    #[must_use]
    pub fn first_run() -> Self {
        Self(FIRST_RUN_TOKEN.to_string())
    }

    #[must_use]
    pub fn maintenance() -> Self {
        Self(MAINTENANCE_TOKEN.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        class_name_for(&self.0)
    }
}

impl std::fmt::Display for RoutingToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOverride {
    FirstRun,
    Maintenance,
}

/// Produces the opaque per-request token stored with a resolution.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs rendered as 32 hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: RoutingToken,
    pub class_name: String,
    pub token: String,
    pub overridden_by: Option<RouteOverride>,
}

pub struct ActionResolver {
    generator: Box<dyn TokenGenerator>,
}

impl Default for ActionResolver {
    fn default() -> Self {
        Self::new(UuidTokenGenerator)
    }
}

impl ActionResolver {
    pub fn new(generator: impl TokenGenerator + 'static) -> Self {
        Self {
            generator: Box::new(generator),
        }
    }

    /// Resolve the request's route. Never fails.
    pub async fn resolve(&self, config: &ConfigStore, fields: &RequestFields) -> Resolution {
        let posted = fields.get(ROUTE_FIELD).map(String::as_str);
        let (route, overridden_by) = route_for(config, posted).await;
        let class_name = route.class_name();

        tracing::debug!(
            route = %route,
            class = %class_name,
            overridden_by = ?overridden_by,
            "route resolved"
        );

        Resolution {
            route,
            class_name,
            token: self.generator.generate(),
            overridden_by,
        }
    }
}

/// Apply the override precedence to a posted value.
pub async fn route_for(config: &ConfigStore, posted: Option<&str>) -> (RoutingToken, Option<RouteOverride>) {
    if let Some(home) = config.home_path() {
        if first_run_pending(&home).await {
            return (RoutingToken::first_run(), Some(RouteOverride::FirstRun));
        }
    }

    match config.environment_mode() {
        Ok(EnvironmentMode::Maintenance) => {
            return (RoutingToken::maintenance(), Some(RouteOverride::Maintenance));
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable environment mode while routing");
        }
    }

    (RoutingToken::normalize(posted.unwrap_or_default()), None)
}

/// Whether the first-run marker is present under `home`. Unreadable
/// directories count as no marker.
pub async fn first_run_pending(home: &Path) -> bool {
    tokio::fs::try_exists(home.join(FIRST_RUN_MARKER))
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::Payload;
    use serde_json::json;

    struct Fixed;

    impl TokenGenerator for Fixed {
        fn generate(&self) -> String {
            "fixed-token".into()
        }
    }

    fn fields(route: &str) -> RequestFields {
        RequestFields::from([(ROUTE_FIELD.to_string(), route.to_string())])
    }

    fn store(value: serde_json::Value) -> ConfigStore {
        ConfigStore::from_payload(serde_json::from_value::<Payload>(value).unwrap())
    }

    #[tokio::test]
    async fn plain_token_maps_to_pascal_class() {
        let resolver = ActionResolver::new(Fixed);
        let r = resolver.resolve(&ConfigStore::new(), &fields("user_profile")).await;
        assert_eq!(r.class_name, "Actions::Pages::UserProfileActions");
        assert_eq!(r.token, "fixed-token");
        assert_eq!(r.overridden_by, None);
    }

    #[tokio::test]
    async fn home_and_php_suffix_resolve_to_index() {
        let resolver = ActionResolver::new(Fixed);
        let config = ConfigStore::new();
        let index = resolver.resolve(&config, &fields("index")).await.class_name;
        assert_eq!(index, "Actions::Pages::IndexActions");
        assert_eq!(resolver.resolve(&config, &fields("home")).await.class_name, index);
        assert_eq!(resolver.resolve(&config, &fields("home.php")).await.class_name, index);
        assert_eq!(resolver.resolve(&config, &fields("index.php")).await.class_name, index);
    }

    #[tokio::test]
    async fn missing_field_resolves_to_index() {
        let resolver = ActionResolver::new(Fixed);
        let r = resolver.resolve(&ConfigStore::new(), &RequestFields::new()).await;
        assert_eq!(r.route.as_str(), INDEX_TOKEN);
    }

    #[tokio::test]
    async fn maintenance_mode_overrides_every_token() {
        let resolver = ActionResolver::new(Fixed);
        let config = store(json!({"environment": {"mode": "MAINTENANCE"}}));
        for t in ["index", "home", "login", "admin.php"] {
            let r = resolver.resolve(&config, &fields(t)).await;
            assert_eq!(r.class_name, "Actions::Pages::MaintenanceActions");
            assert_eq!(r.overridden_by, Some(RouteOverride::Maintenance));
        }
    }

    #[tokio::test]
    async fn first_run_marker_beats_maintenance() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(FIRST_RUN_MARKER), "").unwrap();
        let config = store(json!({
            "environment": {"mode": "MAINTENANCE"},
            "paths": {"home": home.path().to_str().unwrap()}
        }));

        let resolver = ActionResolver::new(Fixed);
        for t in ["index", "login"] {
            let r = resolver.resolve(&config, &fields(t)).await;
            assert_eq!(r.class_name, "Actions::Pages::FirstRunActions");
            assert_eq!(r.overridden_by, Some(RouteOverride::FirstRun));
        }
    }

    #[tokio::test]
    async fn absent_marker_does_not_override() {
        let home = tempfile::tempdir().unwrap();
        let config = store(json!({"paths": {"home": home.path().to_str().unwrap()}}));
        let r = ActionResolver::new(Fixed).resolve(&config, &fields("login")).await;
        assert_eq!(r.class_name, "Actions::Pages::LoginActions");
    }

    #[tokio::test]
    async fn invalid_mode_falls_through_to_posted_token() {
        let config = store(json!({"environment": {"mode": "staging"}}));
        let r = ActionResolver::new(Fixed).resolve(&config, &fields("login")).await;
        assert_eq!(r.route.as_str(), "login");
    }

    #[test]
    fn normalize_keeps_surrounding_whitespace() {
        assert_eq!(RoutingToken::normalize("").as_str(), INDEX_TOKEN);
        assert_eq!(RoutingToken::normalize(" home ").as_str(), " home ");
        assert_eq!(RoutingToken::normalize("home.php.php").as_str(), "home.php");
    }

    #[test]
    fn uuid_tokens_are_unique_hex() {
        let generator = UuidTokenGenerator;
        let a = generator.generate();
        let b = generator.generate();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}

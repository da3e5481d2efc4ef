//! Explicit class-name to action factory table.
//!
//! The registry is populated at startup. Dispatching a resolution whose
//! class name was never registered yields [`ErrorKind::ClassNotFound`]
//! instead of failing somewhere inside the action.

use std::collections::BTreeMap;

use super::contract::{Action, ActionContext};
use super::pages::{FirstRunActions, IndexActions, MaintenanceActions};
use super::resolver::{class_name_for, FIRST_RUN_TOKEN, INDEX_TOKEN, MAINTENANCE_TOKEN};
use crate::error::{ErrorKind, LbfError};

pub type ActionFactory = fn() -> Box<dyn Action>;

fn construct<A: Action + Default + 'static>() -> Box<dyn Action> {
    Box::new(A::default())
}

#[derive(Default)]
pub struct ActionRegistry {
    factories: BTreeMap<String, ActionFactory>,
}

impl ActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in index, maintenance and first-run pages.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(INDEX_TOKEN, construct::<IndexActions>);
        registry.insert(MAINTENANCE_TOKEN, construct::<MaintenanceActions>);
        registry.insert(FIRST_RUN_TOKEN, construct::<FirstRunActions>);
        registry
    }

    fn insert(&mut self, token: &str, factory: ActionFactory) {
        self.factories.insert(class_name_for(token), factory);
    }

    /// Register `A` under `token`. Tokens must be unique.
    pub fn register<A: Action + Default + 'static>(&mut self, token: &str) -> Result<(), LbfError> {
        self.register_factory(token, construct::<A>)
    }

    pub fn register_factory(&mut self, token: &str, factory: ActionFactory) -> Result<(), LbfError> {
        let class_name = class_name_for(token);
        if self.factories.contains_key(&class_name) {
            return Err(LbfError::new(
                ErrorKind::UniqueValueDuplicate,
                format!("an action is already registered as {class_name}"),
            ));
        }
        self.factories.insert(class_name, factory);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, class_name: &str) -> bool {
        self.factories.contains_key(class_name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn instantiate(&self, class_name: &str) -> Result<Box<dyn Action>, LbfError> {
        self.factories
            .get(class_name)
            .map(|factory| factory())
            .ok_or_else(|| {
                LbfError::new(
                    ErrorKind::ClassNotFound,
                    format!("no action registered as {class_name}"),
                )
            })
    }

    /// Build the action named by the context's resolution and execute it.
    pub async fn dispatch(&self, ctx: &mut ActionContext<'_>) -> Result<bool, LbfError> {
        let resolution = ctx.resolution;
        let class_name = resolution.class_name.as_str();
        let mut action = self.instantiate(class_name)?;
        let started = std::time::Instant::now();
        let outcome = action.execute(ctx).await;

        match &outcome {
            Ok(success) => tracing::info!(
                class = %class_name,
                success = *success,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "action executed"
            ),
            Err(e) => tracing::warn!(
                class = %class_name,
                error = %e,
                "action failed"
            ),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::contract::RequestFields;
    use crate::actions::resolver::{ActionResolver, ROUTE_FIELD};
    use crate::config::model::ConfigStore;
    use async_trait::async_trait;

    #[derive(Default)]
    struct Echo;

    #[async_trait]
    impl Action for Echo {
        async fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, LbfError> {
            let name = ctx.field("name").unwrap_or("nobody").to_string();
            ctx.output.set("echo", name);
            Ok(true)
        }
    }

    #[derive(Default)]
    struct Refuses;

    #[async_trait]
    impl Action for Refuses {
        async fn execute(&mut self, _ctx: &mut ActionContext<'_>) -> Result<bool, LbfError> {
            Ok(false)
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> RequestFields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_cover_builtin_pages() {
        let registry = ActionRegistry::with_defaults();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("Actions::Pages::IndexActions"));
        assert!(registry.contains("Actions::Pages::MaintenanceActions"));
        assert!(registry.contains("Actions::Pages::FirstRunActions"));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ActionRegistry::new();
        registry.register::<Echo>("echo").unwrap();
        let err = registry.register::<Refuses>("echo").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UniqueValueDuplicate));
    }

    #[test]
    fn unknown_class_is_class_not_found() {
        let registry = ActionRegistry::new();
        let err = registry.instantiate("Actions::Pages::NopeActions").err().unwrap();
        assert_eq!(err.kind(), Some(ErrorKind::ClassNotFound));
    }

    #[tokio::test]
    async fn dispatch_runs_resolved_action() {
        let mut registry = ActionRegistry::new();
        registry.register::<Echo>("echo").unwrap();

        let config = ConfigStore::new();
        let fields = fields(&[(ROUTE_FIELD, "echo.php"), ("name", "ada")]);
        let resolution = ActionResolver::default().resolve(&config, &fields).await;
        let mut ctx = ActionContext::new(&config, &fields, &resolution);

        assert!(registry.dispatch(&mut ctx).await.unwrap());
        assert_eq!(ctx.output.get("echo").unwrap(), "ada");
    }

    #[tokio::test]
    async fn handled_failure_is_false_not_error() {
        let mut registry = ActionRegistry::new();
        registry.register::<Refuses>("refuses").unwrap();

        let config = ConfigStore::new();
        let fields = fields(&[(ROUTE_FIELD, "refuses")]);
        let resolution = ActionResolver::default().resolve(&config, &fields).await;
        let mut ctx = ActionContext::new(&config, &fields, &resolution);

        assert!(!registry.dispatch(&mut ctx).await.unwrap());
    }
}

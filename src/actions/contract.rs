//! The [`Action`] contract implemented by every page action.

use std::collections::HashMap;

use async_trait::async_trait;

use super::resolver::Resolution;
use crate::config::model::ConfigStore;
use crate::error::LbfError;
use crate::util::properties::PropertyBag;

/// Raw request fields, as posted by the client.
pub type RequestFields = HashMap<String, String>;

/// Everything an action may read while executing, plus the properties it
/// hands back to the caller.
pub struct ActionContext<'a> {
    pub config: &'a ConfigStore,
    pub fields: &'a RequestFields,
    pub resolution: &'a Resolution,
    pub output: PropertyBag,
}

impl<'a> ActionContext<'a> {
    #[must_use]
    pub fn new(config: &'a ConfigStore, fields: &'a RequestFields, resolution: &'a Resolution) -> Self {
        Self {
            config,
            fields,
            resolution,
            output: PropertyBag::new(),
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A unit of request handling bound to a routing token.
///
/// Actions are built with no arguments (see
/// [`ActionRegistry::register`](super::registry::ActionRegistry::register)).
/// `Ok(true)` means the action did what it was asked, `Ok(false)` is a
/// handled failure, and `Err` is reserved for exceptional conditions.
#[async_trait]
pub trait Action: Send {
    async fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, LbfError>;
}

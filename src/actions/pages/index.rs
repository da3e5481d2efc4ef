use async_trait::async_trait;

use crate::actions::contract::{Action, ActionContext};
use crate::error::LbfError;

#[derive(Debug, Default)]
pub struct IndexActions;

#[async_trait]
impl Action for IndexActions {
    async fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, LbfError> {
        ctx.output.set("page", ctx.resolution.route.as_str());
        Ok(true)
    }
}

use async_trait::async_trait;

use crate::actions::contract::{Action, ActionContext};
use crate::config::model::EnvironmentMode;
use crate::error::LbfError;

pub const MAINTENANCE_MESSAGE: &str = "The application is down for maintenance.";

/// Reports the maintenance notice while the application is in maintenance
/// mode. Reached any other way it is a handled failure.
#[derive(Debug, Default)]
pub struct MaintenanceActions;

#[async_trait]
impl Action for MaintenanceActions {
    async fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, LbfError> {
        let mode = ctx.config.environment_mode()?;
        ctx.output.set("mode", mode.as_str());
        if mode != EnvironmentMode::Maintenance {
            return Ok(false);
        }
        ctx.output.set("message", MAINTENANCE_MESSAGE);
        Ok(true)
    }
}

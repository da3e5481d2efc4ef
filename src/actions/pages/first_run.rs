//! One-time setup page.
//!
//! Creates every directory listed in the `paths` section and then removes
//! the `FIRST_RUN` marker so later requests route normally. Without a
//! marker the page refuses and touches nothing.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::actions::contract::{Action, ActionContext};
use crate::actions::resolver::FIRST_RUN_MARKER;
use crate::config::model::{FIELD_HOME, SECTION_PATHS};
use crate::error::{ErrorKind, LbfError};

#[derive(Debug, Default)]
pub struct FirstRunActions {
    created: Vec<PathBuf>,
}

impl FirstRunActions {
    async fn ensure_dir(&mut self, path: &Path) -> Result<(), LbfError> {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Ok(());
        }
        tokio::fs::create_dir_all(path).await.map_err(|e| {
            LbfError::new(
                ErrorKind::FileNotWriteable,
                format!("cannot create {}: {e}", path.display()),
            )
        })?;
        tracing::info!(path = %path.display(), "created directory");
        self.created.push(path.to_path_buf());
        Ok(())
    }
}

#[async_trait]
impl Action for FirstRunActions {
    async fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Result<bool, LbfError> {
        let home = ctx.config.home_path().ok_or_else(|| {
            LbfError::new(
                ErrorKind::MissingComponent,
                "paths.home is not configured",
            )
        })?;
        if !tokio::fs::metadata(&home).await.is_ok_and(|m| m.is_dir()) {
            return Err(LbfError::new(
                ErrorKind::DirectoryNotFound,
                format!("home directory {} does not exist", home.display()),
            ));
        }

        let marker = home.join(FIRST_RUN_MARKER);
        if !tokio::fs::try_exists(&marker).await.unwrap_or(false) {
            tracing::warn!(home = %home.display(), "first run requested without a marker");
            ctx.output.set("created", Vec::<Value>::new());
            ctx.output.set("marker_removed", false);
            return Ok(false);
        }

        let layout: Vec<PathBuf> = ctx
            .config
            .get(SECTION_PATHS)
            .into_iter()
            .flatten()
            .filter(|(name, _)| name.as_str() != FIELD_HOME)
            .filter_map(|(_, value)| value.as_str())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .collect();
        for dir in &layout {
            self.ensure_dir(dir).await?;
        }

        let removed = match tokio::fs::remove_file(&marker).await {
            Ok(()) => true,
            Err(e) if e.kind() == IoErrorKind::NotFound => false,
            Err(e) => {
                return Err(LbfError::new(
                    ErrorKind::FileNotWriteable,
                    format!("cannot remove {}: {e}", marker.display()),
                ));
            }
        };

        let created: Vec<Value> = self
            .created
            .iter()
            .map(|p| Value::String(p.display().to_string()))
            .collect();
        ctx.output.set("created", created);
        ctx.output.set("marker_removed", removed);
        ctx.output.set("completed_at", ctx.config.date_format()?.now());

        tracing::info!(home = %home.display(), removed, "first run completed");
        Ok(removed)
    }
}

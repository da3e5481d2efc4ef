//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the build version,
//! uptime, config source metadata, the current environment mode, and
//! cumulative dispatch statistics.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::model::EnvironmentMode;
use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub commit: String,
    pub uptime_seconds: u64,
    pub config: ConfigHealth,
    pub actions: usize,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct ConfigHealth {
    pub source: String,
    pub version: String,
    pub loaded_ago_seconds: u64,
    pub sections: usize,
    pub mode: String,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub actions_succeeded: u64,
    pub actions_refused: u64,
    pub actions_errored: u64,
    pub config_reloads: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (store, source_name, version_str, loaded_ago) = {
        let loaded = state.config.read().await;
        (
            Arc::clone(&loaded.store),
            loaded.source_name.clone(),
            loaded.version.short().to_string(),
            loaded.loaded_at.elapsed().as_secs(),
        )
    };

    // An unreadable mode is reported rather than failing the probe.
    let (mode, status) = match store.environment_mode() {
        Ok(EnvironmentMode::Maintenance) => (EnvironmentMode::Maintenance.to_string(), "maintenance"),
        Ok(mode) => (mode.to_string(), "healthy"),
        Err(e) => (format!("invalid ({e})"), "degraded"),
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: env!("LBF_GIT_SHORT").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        config: ConfigHealth {
            source: source_name,
            version: version_str,
            loaded_ago_seconds: loaded_ago,
            sections: store.len(),
            mode,
        },
        actions: state.registry.len(),
        stats: StatsResponse {
            actions_succeeded: state.stats.succeeded.load(Ordering::Relaxed),
            actions_refused: state.stats.refused.load(Ordering::Relaxed),
            actions_errored: state.stats.errored.load(Ordering::Relaxed),
            config_reloads: state.stats.config_reloads.load(Ordering::Relaxed),
        },
    })
}

//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding the loaded config
//! store, action registry, resolver, stats, and uptime), [`build_router`]
//! for constructing the Axum router with middleware layers, and
//! [`shutdown_signal`] for SIGTERM / Ctrl+C handling.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::actions::{ActionRegistry, ActionResolver};
use crate::config::model::ConfigStore;
use crate::config::ConfigVersion;
use crate::dispatch;
use crate::health::health_handler;

#[derive(Debug)]
pub struct LoadedConfig {
    pub store: Arc<ConfigStore>,
    pub version: ConfigVersion,
    pub source_name: String,
    pub loaded_at: Instant,
}

#[derive(Debug)]
pub struct Stats {
    pub succeeded: AtomicU64,
    pub refused: AtomicU64,
    pub errored: AtomicU64,
    pub config_reloads: AtomicU64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            succeeded: AtomicU64::new(0),
            refused: AtomicU64::new(0),
            errored: AtomicU64::new(0),
            config_reloads: AtomicU64::new(0),
        }
    }
}

pub struct AppState {
    pub config: RwLock<LoadedConfig>,
    pub registry: ActionRegistry,
    pub resolver: ActionResolver,
    pub start_time: Instant,
    pub stats: Stats,
}

impl AppState {
    #[must_use]
    pub fn new(loaded: LoadedConfig, registry: ActionRegistry) -> Self {
        Self {
            config: RwLock::new(loaded),
            registry,
            resolver: ActionResolver::default(),
            start_time: Instant::now(),
            stats: Stats::new(),
        }
    }

    /// Current store. The lock is held only long enough to clone the `Arc`.
    pub async fn store(&self) -> Arc<ConfigStore> {
        Arc::clone(&self.config.read().await.store)
    }
}

pub fn build_router(state: Arc<AppState>, max_body: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", post(dispatch::dispatch_handler))
        .route("/{page}", post(dispatch::dispatch_page_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body)),
        )
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}

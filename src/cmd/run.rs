//! `lbf run` — start the action server.
//!
//! Loads configuration from the primary (and optional fallback) file,
//! starts the Axum HTTP server with graceful shutdown, and spawns a
//! background config refresh loop for hot-reloading.

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::actions::ActionRegistry;
use crate::cli::RunArgs;
use crate::config::model::ConfigStore;
use crate::config::sources;
use crate::config::{ConfigResolver, ConfigSource};
use crate::error::LbfError;
use crate::logging;
use crate::server::{self, AppState, LoadedConfig};

pub async fn execute(args: RunArgs) -> Result<(), LbfError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let resolver = resolve_config_sources(&args).await?;
    let (payload, version) = resolver.load_with_fallback().await?;
    let store = ConfigStore::from_payload(payload);

    let mode = store.environment_mode()?;
    let section_count = store.len();

    let state = Arc::new(AppState::new(
        LoadedConfig {
            store: Arc::new(store),
            version,
            source_name: resolver.primary_name().to_string(),
            loaded_at: Instant::now(),
        },
        ActionRegistry::with_defaults(),
    ));
    let action_count = state.registry.len();

    // Dropping shutdown_tx closes the channel and stops the refresh loop
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let refresh_state = state.clone();
    let poll_interval = args.poll_interval;
    let refresh_handle = tokio::spawn(async move {
        config_refresh_loop(refresh_state, resolver, poll_interval, shutdown_rx).await;
    });

    let router = server::build_router(state, args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        sections = section_count,
        actions = action_count,
        mode = %mode,
        "lbf started"
    );

    let graceful_shutdown = async move {
        server::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(graceful_shutdown)
        .await?;

    if let Err(e) = refresh_handle.await {
        tracing::error!(error = %e, "config refresh task failed");
    }

    tracing::info!("lbf stopped");
    Ok(())
}

async fn resolve_config_sources(args: &RunArgs) -> Result<ConfigResolver, LbfError> {
    let primary = sources::resolve_file_source(args.config.as_deref()).await?;
    let fallback = args
        .fallback_config
        .as_deref()
        .map(sources::for_path)
        .transpose()?
        .map(|source| Box::new(source) as Box<dyn ConfigSource>);

    match (primary, fallback) {
        (Some(primary), fallback) => Ok(ConfigResolver::new(Box::new(primary), fallback)),
        // Only a fallback was named: it is the sole source.
        (None, Some(fallback)) => Ok(ConfigResolver::new(fallback, None)),
        (None, None) => Err(LbfError::NoConfigSource {
            hint: "Provide --config <file> or place lbf.yaml in the working directory.\n  \
                   Run 'lbf init' to create a config file."
                .into(),
        }),
    }
}

/// Poll the primary source and swap in a new store when its content changes.
///
/// Reloads read the primary only. A primary that fails to load leaves the
/// current store in place; the fallback is a startup-only source.
pub async fn config_refresh_loop(
    state: Arc<AppState>,
    resolver: ConfigResolver,
    interval_secs: u64,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    interval.tick().await; // first tick is immediate

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = shutdown.changed() => {
                tracing::debug!("config refresh loop shutting down");
                return;
            }
        }

        let current_version = state.config.read().await.version.clone();

        match resolver.primary().has_changed(&current_version).await {
            Ok(true) => {
                tracing::info!("config change detected, reloading");
                match resolver.primary().load().await {
                    Ok((payload, version)) => {
                        let store = ConfigStore::from_payload(payload);
                        let sections = store.len();
                        let mut loaded = state.config.write().await;
                        loaded.store = Arc::new(store);
                        loaded.version = version;
                        loaded.loaded_at = Instant::now();
                        drop(loaded);
                        state.stats.config_reloads.fetch_add(1, Ordering::Relaxed);
                        tracing::info!(sections, "config reloaded");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "config reload failed, keeping current config");
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "config change check failed");
            }
        }
    }
}

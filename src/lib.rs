//! LBF is the dispatch and configuration core of LBF web applications.
//!
//! A POSTed `route_token` is resolved to a page class name, honoring the
//! first-run and maintenance overrides, and the matching action is looked
//! up in an explicit registry and executed. Configuration is held in a
//! [`ConfigStore`](config::model::ConfigStore) that is loaded from files
//! and passed to whoever needs it.
//!
//! # Architecture
//!
//! - [`actions`] -- Routing token resolution, the `Action` contract, the
//!   action registry, and the built-in pages.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, init, validate,
//!   health, resolve).
//! - [`config`] -- The config store, file sources, validation, and
//!   hot-reloading via the [`ConfigSource`](config::ConfigSource) trait.
//! - [`dispatch`] -- `POST /` and `POST /{page}` handlers.
//! - [`error`] -- [`LbfError`](error::LbfError) and its
//!   [`ErrorKind`](error::ErrorKind) discriminant.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum server setup, shared application state, and
//!   graceful shutdown.
//! - [`util`] -- Array re-indexing, string casing, date formatting, and
//!   the property bag.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Public functions are used by the binary and the integration tests.
#![allow(clippy::missing_errors_doc)]

pub mod actions;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod health;
pub mod logging;
pub mod server;
pub mod util;

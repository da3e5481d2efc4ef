//! Page action dispatch.
//!
//! A request flows through three pieces:
//!
//! - [`resolver`] -- turns the posted `route_token` into a
//!   [`Resolution`](resolver::Resolution): a class name plus an opaque
//!   per-request token, honoring the first-run and maintenance overrides.
//! - [`registry`] -- maps class names to action factories and dispatches.
//! - [`contract`] -- the [`Action`](contract::Action) trait each page implements.
//!
//! [`pages`] holds the built-in index, maintenance and first-run actions.

pub mod contract;
pub mod pages;
pub mod registry;
pub mod resolver;

pub use contract::{Action, ActionContext, RequestFields};
pub use registry::ActionRegistry;
pub use resolver::{ActionResolver, Resolution, RoutingToken};

//! Built-in pages every application gets.

mod first_run;
mod index;
mod maintenance;

pub use first_run::FirstRunActions;
pub use index::IndexActions;
pub use maintenance::MaintenanceActions;

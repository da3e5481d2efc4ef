//! Subcommand dispatch and execution.
//!
//! [`dispatch`] routes the parsed CLI to the matching handler: [`run`],
//! [`init`], [`validate`], [`health`] or [`resolve`]. Each handler lives in
//! its own submodule.

pub mod health;
pub mod init;
pub mod resolve;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::LbfError;

pub async fn dispatch(cli: Cli) -> Result<(), LbfError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        Some(Commands::Resolve(ref args)) => resolve::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  lbf v{version} \u{2014} page action dispatch server\n\n  \
         No command provided. To get started:\n\n    \
         lbf init                  Generate a starter config\n    \
         lbf run                   Start the server (auto-detects ./lbf.yaml)\n    \
         lbf run -c app.yaml       Start with a specific config file\n    \
         lbf --help                See all commands and options\n"
    );
}

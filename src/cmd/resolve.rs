//! `lbf resolve` — show which action a routing token reaches.
//!
//! Loads the config file (when one is given or auto-detected), resolves the
//! token exactly as the server would, and reports whether the resulting
//! class is registered.

use crate::actions::contract::RequestFields;
use crate::actions::resolver::ROUTE_FIELD;
use crate::actions::{ActionRegistry, ActionResolver};
use crate::cli::{OutputFormat, ResolveArgs};
use crate::config::model::ConfigStore;
use crate::config::sources;
use crate::config::ConfigSource;
use crate::error::LbfError;

pub async fn execute(args: &ResolveArgs) -> Result<(), LbfError> {
    let mut store = ConfigStore::new();
    if let Some(source) = sources::resolve_file_source(args.config.as_deref()).await? {
        let (payload, _) = source.load().await?;
        store.load(payload, true);
    }

    let fields = RequestFields::from([(ROUTE_FIELD.to_string(), args.token.clone())]);
    let resolution = ActionResolver::default().resolve(&store, &fields).await;
    let registered = ActionRegistry::with_defaults().contains(&resolution.class_name);

    match args.format {
        OutputFormat::Text => {
            println!("{} -> {}", display_token(&args.token), resolution.class_name);
            if let Some(reason) = resolution.overridden_by {
                println!("  overridden by: {reason:?}");
            }
            if !registered {
                println!("  (no built-in action is registered under this name)");
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "token": args.token,
                    "route": resolution.route.as_str(),
                    "class_name": resolution.class_name,
                    "overridden_by": resolution.overridden_by.map(|o| format!("{o:?}")),
                    "registered": registered,
                })
            );
        }
    }
    Ok(())
}

fn display_token(token: &str) -> &str {
    if token.is_empty() {
        "(empty)"
    } else {
        token
    }
}

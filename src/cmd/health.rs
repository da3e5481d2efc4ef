//! `lbf health` — check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and displays
//! the response as formatted text or raw JSON.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::LbfError;
use crate::health::HealthResponse;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn http_error(e: impl std::error::Error + Send + Sync + 'static) -> LbfError {
    LbfError::HttpRequest {
        source: Box::new(e),
    }
}

/// `GET {base}/health`, returning the status and the collected body.
async fn fetch_health(base: &str) -> Result<(hyper::StatusCode, Bytes), LbfError> {
    let url = format!("{}/health", base.trim_end_matches('/'));
    let uri: hyper::Uri = url.parse().map_err(|e: hyper::http::uri::InvalidUri| {
        LbfError::UriParse {
            source: Box::new(e),
        }
    })?;

    let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
    let req = hyper::Request::builder()
        .uri(uri)
        .body(Full::new(Bytes::new()))
        .map_err(http_error)?;

    let response = tokio::time::timeout(REQUEST_TIMEOUT, client.request(req))
        .await
        .map_err(|_| LbfError::HttpRequest {
            source: format!("health check timed out after {}s", REQUEST_TIMEOUT.as_secs()).into(),
        })?
        .map_err(http_error)?;

    let status = response.status();
    let body = response.into_body().collect().await.map_err(http_error)?.to_bytes();
    Ok((status, body))
}

pub async fn execute(args: HealthArgs) -> Result<(), LbfError> {
    let (status, body) = fetch_health(&args.url).await?;
    if !status.is_success() {
        return Err(LbfError::HealthCheckFailed(status));
    }

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    let body_str = String::from_utf8_lossy(&body);
    match serde_json::from_str::<HealthResponse>(&body_str) {
        Ok(health) => {
            let uptime = format_uptime(health.uptime_seconds);
            println!("\u{2713} lbf is {} ({})", health.status, args.url);
            println!("  build:          v{} ({})", health.version, health.commit);
            println!("  uptime:         {uptime}");
            println!("  config source:  {}", health.config.source);
            println!(
                "  config version: {} (loaded {}s ago)",
                health.config.version, health.config.loaded_ago_seconds
            );
            println!(
                "  config:         {} sections, mode {}",
                health.config.sections, health.config.mode
            );
            println!(
                "  actions:        {} registered, {} succeeded, {} refused, {} errored",
                health.actions,
                health.stats.actions_succeeded,
                health.stats.actions_refused,
                health.stats.actions_errored
            );
        }
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_uses_largest_units() {
        assert_eq!(format_uptime(5), "5s");
        assert_eq!(format_uptime(65), "1m 5s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
    }
}

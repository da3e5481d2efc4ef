//! HTTP entry point for page actions.
//!
//! [`dispatch_handler`] serves `POST /` and [`dispatch_page_handler`]
//! serves `POST /{page}`. Both read the request fields from a form or JSON
//! body, resolve them against the current config store, and run the
//! resolved action through the registry. The path segment only stands in
//! for `route_token` when the body does not carry one.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::resolver::ROUTE_FIELD;
use crate::actions::{ActionContext, RequestFields};
use crate::error::{ErrorKind, LbfError};
use crate::server::AppState;
use crate::util::properties::PropertyBag;

pub const TOKEN_HEADER: &str = "x-lbf-token";
pub const CORRELATION_HEADER: &str = "x-correlation-id";

#[derive(Debug, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub route: String,
    pub class_name: String,
    pub token: String,
    pub success: bool,
    #[serde(default)]
    pub output: PropertyBag,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: Option<String>,
}

pub async fn dispatch_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    dispatch(&state, &headers, &body, None).await
}

pub async fn dispatch_page_handler(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    dispatch(&state, &headers, &body, Some(page)).await
}

async fn dispatch(state: &AppState, headers: &HeaderMap, body: &[u8], page: Option<String>) -> Response {
    let correlation_id = headers
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    let mut fields = match parse_fields(headers, body) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!(correlation_id = %correlation_id, error = %e, "unreadable request body");
            state.stats.errored.fetch_add(1, Ordering::Relaxed);
            return error_response(&e);
        }
    };
    if let Some(page) = page {
        fields.entry(ROUTE_FIELD.to_string()).or_insert(page);
    }

    let store = state.store().await;
    let resolution = state.resolver.resolve(&store, &fields).await;

    tracing::info!(
        correlation_id = %correlation_id,
        route = %resolution.route,
        class = %resolution.class_name,
        "request received"
    );

    let mut ctx = ActionContext::new(&store, &fields, &resolution);
    match state.registry.dispatch(&mut ctx).await {
        Ok(success) => {
            let counter = if success {
                &state.stats.succeeded
            } else {
                &state.stats.refused
            };
            counter.fetch_add(1, Ordering::Relaxed);

            let output = std::mem::take(&mut ctx.output);
            let mut response = Json(DispatchResponse {
                route: resolution.route.to_string(),
                class_name: resolution.class_name.clone(),
                token: resolution.token.clone(),
                success,
                output,
            })
            .into_response();
            let response_headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&resolution.token) {
                response_headers.insert(TOKEN_HEADER, value);
            }
            if let Ok(value) = HeaderValue::from_str(&correlation_id) {
                response_headers.insert(CORRELATION_HEADER, value);
            }
            response
        }
        Err(e) => {
            tracing::error!(
                correlation_id = %correlation_id,
                class = %resolution.class_name,
                error = %e,
                "dispatch failed"
            );
            state.stats.errored.fetch_add(1, Ordering::Relaxed);
            error_response(&e)
        }
    }
}

/// Decode a JSON object or `application/x-www-form-urlencoded` body.
///
/// Non-string JSON values are kept as their JSON text.
pub fn parse_fields(headers: &HeaderMap, body: &[u8]) -> Result<RequestFields, LbfError> {
    if body.is_empty() {
        return Ok(RequestFields::new());
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    if !is_json {
        return Ok(url::form_urlencoded::parse(body).into_owned().collect());
    }

    let object: serde_json::Map<String, Value> = serde_json::from_slice(body).map_err(|e| {
        LbfError::new(
            ErrorKind::InvalidInput,
            format!("request body is not a JSON object: {e}"),
        )
    })?;
    Ok(object
        .into_iter()
        .map(|(k, v)| match v {
            Value::String(s) => (k, s),
            other => (k, other.to_string()),
        })
        .collect())
}

#[must_use]
pub fn status_for(error: &LbfError) -> StatusCode {
    match error.kind() {
        Some(ErrorKind::ClassNotFound) => StatusCode::NOT_FOUND,
        Some(kind) if kind.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: &LbfError) -> Response {
    let body = ErrorResponse {
        error: error.to_string(),
        kind: error.kind().map(|k| k.as_str().to_string()),
    };
    (status_for(error), Json(body)).into_response()
}

//! Stock actions shipped with the server
//!
//! Registered under the `builtin` module. Each returns a JSON object with
//! `status` and `message` keys so the web layer can surface feedback.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use super::catalog::ActionCatalog;
use crate::config::ActionParams;
use crate::error::{BoardError, Result};

/// Register the `builtin` module into the catalog
pub fn register(catalog: &mut ActionCatalog) {
    catalog.register("builtin", "greet", Arc::new(|p| Box::pin(greet(p))));
    catalog.register(
        "builtin",
        "current_time",
        Arc::new(|p| Box::pin(current_time(p))),
    );
    catalog.register("builtin", "sleep", Arc::new(|p| Box::pin(sleep(p))));
    catalog.register("builtin", "noop", Arc::new(|p| Box::pin(noop(p))));
}

fn string_param(params: &ActionParams, key: &str) -> Option<String> {
    params.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// Greet a user by name. Parameter: `name` (default "User").
async fn greet(params: ActionParams) -> Result<Value> {
    let name = string_param(&params, "name").unwrap_or_else(|| "User".to_string());
    let message = format!("Hello, {name}! This greeting action was successfully triggered.");
    tracing::info!(%name, "executing greet action");
    Ok(json!({"status": "success", "message": message}))
}

/// Report the current server time in ISO-8601.
async fn current_time(_params: ActionParams) -> Result<Value> {
    let now = chrono::Utc::now().to_rfc3339();
    tracing::info!(%now, "executing current_time action");
    Ok(json!({
        "status": "success",
        "timestamp": now,
        "message": format!("Current server time: {now}"),
    }))
}

/// Simulate a long-running task. Parameter: `duration_ms` (default 1000).
/// The async exemplar: callers suspend until the delay elapses.
async fn sleep(params: ActionParams) -> Result<Value> {
    let duration_ms = params
        .get("duration_ms")
        .and_then(|v| v.as_u64())
        .unwrap_or(1000);
    if duration_ms > 60_000 {
        return Err(BoardError::Action(format!(
            "sleep duration {duration_ms}ms exceeds the 60s limit"
        )));
    }
    tracing::info!(duration_ms, "executing sleep action");
    tokio::time::sleep(Duration::from_millis(duration_ms)).await;
    Ok(json!({
        "status": "success",
        "duration_ms": duration_ms,
        "message": format!("Async action completed after {duration_ms}ms."),
    }))
}

/// Placeholder action that always succeeds.
async fn noop(_params: ActionParams) -> Result<Value> {
    tracing::info!("executing noop action");
    Ok(json!({"status": "success", "message": "The 'noop' action was performed successfully!"}))
}

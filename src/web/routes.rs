//! HTTP and WebSocket endpoints
//!
//! JSON surface over the board: serve the UI description, dispatch button
//! presses, stage/apply/discard configuration, accept pushed button
//! updates, and upgrade live-update WebSocket clients.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::config::DynamicUpdateConfig;
use crate::realtime::{ButtonContentUpdate, WsChannel};

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/board", get(get_board))
        .route("/action/:button_id", post(invoke_button))
        .route("/api/v1/config/stage", post(stage_config))
        .route("/api/v1/config/apply", post(apply_config))
        .route("/api/v1/config/discard", post(discard_config))
        .route("/api/v1/buttons/update_content", post(update_button_content))
        .route("/ws/button_updates", get(ws_button_updates))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "clients": state.live().client_count(),
        "actions": state.active().registry.len(),
    }))
}

/// Current UI description plus the pending-update flag
async fn get_board(State(state): State<AppState>) -> Json<Value> {
    let active = state.active();
    Json(json!({
        "ui_config": active.ui,
        "pending_update_available": state.pending_update_available(),
    }))
}

/// Dispatch a button press to its configured action.
///
/// The result stays opaque except for the pre-agreed feedback keys; a
/// top-level `message` and `status` are derived for the client the same
/// way regardless of what the action returned.
async fn invoke_button(
    State(state): State<AppState>,
    Path(button_id): Path<String>,
) -> impl IntoResponse {
    let active = state.active();
    let Some((page, button)) = active.ui.find_button_and_page(&button_id) else {
        tracing::warn!(%button_id, "button not found in UI configuration");
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "error",
                "message": format!("Button ID '{button_id}' not found."),
            })),
        );
    };

    let action_id = button.action_id.clone();
    tracing::info!(%button_id, %action_id, page_id = %page.id, "button pressed");
    let result = active
        .registry
        .execute(&action_id, button.action_params.clone())
        .await;

    let (status, message) = feedback(&action_id, &result);
    (
        StatusCode::OK,
        Json(json!({
            "button_id": button_id,
            "action_id": action_id,
            "status": status,
            "message": message,
            "result": result,
        })),
    )
}

/// Derive user-facing feedback from an opaque action result. Only the
/// optional `status`/`error`/`message` keys are interpreted.
fn feedback(action_id: &str, result: &Value) -> (&'static str, String) {
    if let Some(obj) = result.as_object() {
        let is_error =
            obj.contains_key("error") || obj.get("status").and_then(Value::as_str) == Some("error");
        if is_error {
            let message = obj
                .get("message")
                .or_else(|| obj.get("error"))
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("Error executing action '{action_id}'."));
            return ("error", message);
        }
        if let Some(message) = obj.get("message").and_then(Value::as_str) {
            return ("success", message.to_string());
        }
    } else if let Some(text) = result.as_str() {
        if !text.is_empty() {
            return ("success", text.to_string());
        }
    }
    ("success", format!("Action '{action_id}' completed."))
}

/// Stage a full configuration replacement
async fn stage_config(
    State(state): State<AppState>,
    Json(update): Json<DynamicUpdateConfig>,
) -> impl IntoResponse {
    match state.stage(update) {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(json!({
                "message": "New configuration staged successfully.",
                "pending_update_available": true,
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to stage configuration");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": format!("Failed to stage new configuration: {e}")})),
            )
        }
    }
}

/// Apply the staged configuration
async fn apply_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.apply() {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Configuration applied successfully."})),
        ),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": e.to_string()})),
        ),
    }
}

/// Discard the staged configuration
async fn discard_config(State(state): State<AppState>) -> Json<Value> {
    let discarded = state.discard();
    Json(json!({
        "message": "Staged configuration discarded.",
        "discarded": discarded,
        "pending_update_available": false,
    }))
}

/// Accept a pushed button content update and broadcast it to all
/// connected live-update clients.
async fn update_button_content(
    State(state): State<AppState>,
    Json(update): Json<ButtonContentUpdate>,
) -> impl IntoResponse {
    tracing::info!(button_id = %update.button_id, "received button content update");
    match serde_json::to_value(&update) {
        Ok(payload) => {
            state.live().broadcast_button_update(payload).await;
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Button content update broadcasted.",
                    "button_id": update.button_id,
                })),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": e.to_string()})),
        ),
    }
}

/// WebSocket upgrade for live button updates
async fn ws_button_updates(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one WebSocket connection: register its send half with the
/// manager, drain incoming frames until the peer goes away, then
/// unregister. Clients primarily receive; inbound text is treated as
/// keep-alive.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (sink, mut receiver) = socket.split();
    let connection_id = state.live().connect(Arc::new(WsChannel::new(sink)));

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(Message::Text(text)) => {
                tracing::debug!(connection_id = %connection_id, %text, "keep-alive from client");
            }
            Ok(_) => {}
        }
    }

    state.live().disconnect(&connection_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_success_with_message() {
        let result = json!({"status": "success", "message": "done"});
        assert_eq!(feedback("a", &result), ("success", "done".to_string()));
    }

    #[test]
    fn test_feedback_error_prefers_message() {
        let result = json!({"status": "error", "error": "cause", "message": "friendly"});
        assert_eq!(feedback("a", &result), ("error", "friendly".to_string()));
    }

    #[test]
    fn test_feedback_error_key_alone_is_error() {
        let result = json!({"error": "cause"});
        assert_eq!(feedback("a", &result), ("error", "cause".to_string()));
    }

    #[test]
    fn test_feedback_plain_string_result() {
        let result = json!("all good");
        assert_eq!(feedback("a", &result), ("success", "all good".to_string()));
    }

    #[test]
    fn test_feedback_opaque_result_gets_default() {
        let result = json!({"value": 42});
        let (status, message) = feedback("tick", &result);
        assert_eq!(status, "success");
        assert!(message.contains("'tick'"));
    }
}

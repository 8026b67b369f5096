//! Live-update manager: connection registry plus fan-out broadcast
//!
//! Tracks the currently open channels and sends JSON payloads to all of
//! them, pruning any channel whose send fails.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{json, Value};
use uuid::Uuid;

use super::channel::UpdateChannel;
use super::events::MSG_BUTTON_CONTENT_UPDATE;

/// Connection ID
pub type ConnectionId = String;

/// Manages active channels and broadcasts live updates to them
#[derive(Clone, Default)]
pub struct LiveUpdateManager {
    channels: Arc<RwLock<HashMap<ConnectionId, Arc<dyn UpdateChannel>>>>,
}

impl LiveUpdateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accepted channel and return its id.
    ///
    /// The transport handshake happens before registration, so independent
    /// connects never contend on anything but the brief map insert.
    pub fn connect(&self, channel: Arc<dyn UpdateChannel>) -> ConnectionId {
        let id = Uuid::new_v4().to_string();
        self.channels.write().insert(id.clone(), channel);
        tracing::info!(connection_id = %id, total = self.client_count(), "channel connected");
        id
    }

    /// Remove a channel. Removing an unknown id is a no-op, so explicit
    /// close and error-driven cleanup can both call this safely.
    pub fn disconnect(&self, id: &str) {
        let removed = self.channels.write().remove(id).is_some();
        if removed {
            tracing::info!(connection_id = %id, total = self.client_count(), "channel disconnected");
        } else {
            tracing::warn!(connection_id = %id, "disconnect for unknown channel");
        }
    }

    /// Number of currently connected channels
    pub fn client_count(&self) -> usize {
        self.channels.read().len()
    }

    /// Send a payload to every currently connected channel.
    ///
    /// The active set is snapshotted before fan-out, so connects and
    /// disconnects during the broadcast never corrupt the iteration and no
    /// channel is delivered to twice in one call. All sends are issued
    /// concurrently; a failing channel is pruned after the fan-out
    /// completes and never affects delivery to the others.
    pub async fn broadcast(&self, payload: &Value) {
        let snapshot: Vec<(ConnectionId, Arc<dyn UpdateChannel>)> = self
            .channels
            .read()
            .iter()
            .map(|(id, ch)| (id.clone(), ch.clone()))
            .collect();

        if snapshot.is_empty() {
            tracing::debug!("no active channels to broadcast to");
            return;
        }

        tracing::debug!(channels = snapshot.len(), "broadcasting payload");
        let sends = snapshot.iter().map(|(id, channel)| async move {
            (id.clone(), channel.send_json(payload).await)
        });

        let mut dead = Vec::new();
        for (id, result) in futures::future::join_all(sends).await {
            if let Err(e) = result {
                tracing::warn!(connection_id = %id, error = %e, "send failed, pruning channel");
                dead.push(id);
            }
        }

        for id in &dead {
            self.disconnect(id);
        }
        if !dead.is_empty() {
            tracing::info!(pruned = dead.len(), "removed dead channels during broadcast");
        }
    }

    /// Broadcast a button content change, tagged with its message kind.
    /// The single entry point for pushing button updates to observers.
    pub async fn broadcast_button_update(&self, payload: Value) {
        self.broadcast(&json!({
            "type": MSG_BUTTON_CONTENT_UPDATE,
            "payload": payload,
        }))
        .await;
    }
}

//! Channel abstraction over an open real-time connection

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::SinkExt;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{BoardError, Result};

/// One open push-delivery connection.
///
/// The handshake has already completed by the time a channel reaches the
/// manager; a failed send is the only way a dead peer is detected.
#[async_trait]
pub trait UpdateChannel: Send + Sync {
    /// Deliver a JSON payload to the peer
    async fn send_json(&self, payload: &Value) -> Result<()>;
}

/// Production channel backed by the send half of an axum WebSocket
pub struct WsChannel {
    sink: Mutex<SplitSink<WebSocket, Message>>,
}

impl WsChannel {
    pub fn new(sink: SplitSink<WebSocket, Message>) -> Self {
        Self { sink: Mutex::new(sink) }
    }
}

#[async_trait]
impl UpdateChannel for WsChannel {
    async fn send_json(&self, payload: &Value) -> Result<()> {
        let text = serde_json::to_string(payload)?;
        self.sink
            .lock()
            .await
            .send(Message::Text(text))
            .await
            .map_err(|e| BoardError::Channel(e.to_string()))
    }
}

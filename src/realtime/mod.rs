//! Real-time updates via WebSocket
//!
//! Push delivery of button content changes to connected clients.

mod channel;
mod events;
mod manager;

pub use channel::{UpdateChannel, WsChannel};
pub use events::{ButtonContentUpdate, SparklineData, MSG_BUTTON_CONTENT_UPDATE};
pub use manager::{ConnectionId, LiveUpdateManager};

//! controldeck - Configuration-driven control board
//!
//! A server that renders a grid of buttons defined in YAML, dispatches each
//! button press to a named server-side action, and pushes live content
//! updates (text, icons, sparklines) to connected browsers over WebSocket.

pub mod actions;
pub mod config;
pub mod error;
pub mod realtime;
pub mod web;

pub use actions::{ActionCatalog, ActionRegistry};
pub use config::{ActionDefinition, ActionsConfig, ButtonConfig, PageConfig, UIConfig};
pub use error::{BoardError, Result};
pub use realtime::{ButtonContentUpdate, LiveUpdateManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

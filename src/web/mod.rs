//! Web layer: application state and the axum router

mod routes;
mod state;

pub use routes::router;
pub use state::{ActiveConfig, AppState, StagedConfig};

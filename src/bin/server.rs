//! controldeck server
//!
//! Run with: controldeck-server --ui-config config/ui.yaml --actions-config config/actions.yaml

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use controldeck::actions::ActionCatalog;
use controldeck::config::ConfigLoader;
use controldeck::web::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "controldeck-server")]
#[command(about = "Configuration-driven control board server")]
#[command(version)]
struct Args {
    /// UI configuration file (YAML)
    #[arg(long, env = "CONTROLDECK_UI_CONFIG", default_value = "config/ui.yaml")]
    ui_config: String,

    /// Actions configuration file (YAML)
    #[arg(
        long,
        env = "CONTROLDECK_ACTIONS_CONFIG",
        default_value = "config/actions.yaml"
    )]
    actions_config: String,

    /// Bind address
    #[arg(long, env = "CONTROLDECK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Bind port
    #[arg(long, env = "CONTROLDECK_PORT", default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Expand ~ in paths
    let ui_path = shellexpand::tilde(&args.ui_config).to_string();
    let actions_path = shellexpand::tilde(&args.actions_config).to_string();

    let loader = ConfigLoader::new(&ui_path, &actions_path);
    let (ui, actions) = loader
        .load()
        .context("failed to load board configuration")?;

    let catalog = ActionCatalog::with_builtins();
    let state = AppState::new(ui, &actions, catalog);

    let loaded = state.active().registry.len();
    if loaded < actions.actions.len() {
        tracing::warn!(
            loaded,
            defined = actions.actions.len(),
            "some configured actions did not resolve; their buttons will fail gracefully"
        );
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?;

    tracing::info!(%addr, version = controldeck::VERSION, "controldeck server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

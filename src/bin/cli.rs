//! controldeck CLI
//!
//! Validate board configuration files and drive a running server: push
//! live button updates or deploy (stage + apply) a full configuration.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use controldeck::actions::{ActionCatalog, ActionRegistry};
use controldeck::config::{ConfigLoader, DynamicUpdateConfig};
use controldeck::realtime::{ButtonContentUpdate, SparklineData};

#[derive(Parser)]
#[command(name = "controldeck")]
#[command(about = "Control board configuration and live-update tool")]
#[command(version)]
struct Cli {
    /// Server base URL for remote commands
    #[arg(
        long,
        env = "CONTROLDECK_SERVER_URL",
        default_value = "http://localhost:8000"
    )]
    server_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration files without starting a server
    Check {
        /// UI configuration file (YAML)
        #[arg(long, default_value = "config/ui.yaml")]
        ui_config: String,
        /// Actions configuration file (YAML)
        #[arg(long, default_value = "config/actions.yaml")]
        actions_config: String,
    },
    /// Push a live content update for one button
    Push {
        /// Target button id
        button_id: String,
        /// New button text
        #[arg(short, long)]
        text: Option<String>,
        /// New icon class
        #[arg(short, long)]
        icon: Option<String>,
        /// New style class
        #[arg(short, long)]
        style: Option<String>,
        /// Sparkline samples (comma-separated numbers)
        #[arg(long, value_delimiter = ',')]
        sparkline: Option<Vec<f64>>,
    },
    /// Stage and apply local configuration files on a running server
    Deploy {
        /// UI configuration file (YAML)
        #[arg(long, default_value = "config/ui.yaml")]
        ui_config: String,
        /// Actions configuration file (YAML)
        #[arg(long, default_value = "config/actions.yaml")]
        actions_config: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            ui_config,
            actions_config,
        } => check(&ui_config, &actions_config),
        Commands::Push {
            button_id,
            text,
            icon,
            style,
            sparkline,
        } => {
            let update = ButtonContentUpdate {
                button_id,
                text,
                icon_class: icon,
                style_class: style,
                sparkline: sparkline.map(|points| SparklineData {
                    points,
                    color: None,
                    stroke_width: None,
                }),
            };
            push(&cli.server_url, &update).await
        }
        Commands::Deploy {
            ui_config,
            actions_config,
        } => deploy(&cli.server_url, &ui_config, &actions_config).await,
    }
}

fn load_configs(
    ui_config: &str,
    actions_config: &str,
) -> anyhow::Result<(controldeck::UIConfig, controldeck::ActionsConfig)> {
    let ui_path = shellexpand::tilde(ui_config).to_string();
    let actions_path = shellexpand::tilde(actions_config).to_string();
    ConfigLoader::new(ui_path, actions_path)
        .load()
        .context("failed to load configuration files")
}

fn check(ui_config: &str, actions_config: &str) -> anyhow::Result<()> {
    let (ui, actions) = load_configs(ui_config, actions_config)?;

    let catalog = ActionCatalog::with_builtins();
    let mut registry = ActionRegistry::new();
    registry.load(&actions.actions, &catalog);

    let buttons: usize = ui.pages.iter().map(|p| p.buttons.len()).sum();
    println!(
        "OK: {} page(s), {} button(s), {}/{} action(s) resolve against the builtin catalog",
        ui.pages.len(),
        buttons,
        registry.len(),
        actions.actions.len()
    );

    for page in &ui.pages {
        for button in &page.buttons {
            if registry.get(&button.action_id).is_none() {
                println!(
                    "warning: button '{}' on page '{}' references unresolved action '{}'",
                    button.id, page.id, button.action_id
                );
            }
        }
    }
    Ok(())
}

async fn push(server_url: &str, update: &ButtonContentUpdate) -> anyhow::Result<()> {
    if !update.has_changes() {
        bail!("no content changes specified; pass --text, --icon, --style or --sparkline");
    }

    let url = format!("{server_url}/api/v1/buttons/update_content");
    let response = reqwest::Client::new()
        .post(&url)
        .json(update)
        .send()
        .await
        .with_context(|| format!("failed to reach {url}"))?;

    if !response.status().is_success() {
        bail!(
            "server rejected the update: {} {}",
            response.status(),
            response.text().await.unwrap_or_default()
        );
    }
    println!("Button '{}' content update sent.", update.button_id);
    Ok(())
}

async fn deploy(server_url: &str, ui_config: &str, actions_config: &str) -> anyhow::Result<()> {
    let (ui, actions) = load_configs(ui_config, actions_config)?;
    let payload = DynamicUpdateConfig {
        ui_config: ui,
        actions_config: actions,
    };

    let client = reqwest::Client::new();

    let stage_url = format!("{server_url}/api/v1/config/stage");
    let response = client
        .post(&stage_url)
        .json(&payload)
        .send()
        .await
        .with_context(|| format!("failed to reach {stage_url}"))?;
    if !response.status().is_success() {
        bail!(
            "staging failed: {} {}",
            response.status(),
            response.text().await.unwrap_or_default()
        );
    }
    println!("Configuration staged.");

    let apply_url = format!("{server_url}/api/v1/config/apply");
    let response = client
        .post(&apply_url)
        .send()
        .await
        .with_context(|| format!("failed to reach {apply_url}"))?;
    if !response.status().is_success() {
        bail!(
            "apply failed: {} {}",
            response.status(),
            response.text().await.unwrap_or_default()
        );
    }
    println!("Configuration applied.");
    Ok(())
}

//! End-to-end tests over the public API: config loading, action dispatch,
//! staged reconfiguration, and live-update broadcast.
//!
//! Run with: cargo test --test board_tests

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use controldeck::actions::{ActionCatalog, KIND_NOT_FOUND};
use controldeck::config::{ConfigLoader, DynamicUpdateConfig};
use controldeck::realtime::UpdateChannel;
use controldeck::web::AppState;
use controldeck::{ActionsConfig, BoardError, UIConfig};

/// Test channel that records everything it is sent
#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<Value>>,
    fail: bool,
}

#[async_trait]
impl UpdateChannel for RecordingChannel {
    async fn send_json(&self, payload: &Value) -> controldeck::Result<()> {
        if self.fail {
            return Err(BoardError::Channel("peer went away".to_string()));
        }
        self.sent.lock().push(payload.clone());
        Ok(())
    }
}

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

fn load_shipped_configs() -> (UIConfig, ActionsConfig) {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/config");
    ConfigLoader::new(format!("{dir}/ui.yaml"), format!("{dir}/actions.yaml"))
        .load()
        .expect("shipped default configs must load")
}

#[test]
fn shipped_configs_fully_resolve() {
    let (ui, actions) = load_shipped_configs();
    let state = AppState::new(ui.clone(), &actions, ActionCatalog::with_builtins());

    let active = state.active();
    assert_eq!(active.registry.len(), actions.actions.len());
    for page in &ui.pages {
        for button in &page.buttons {
            assert!(
                active.registry.get(&button.action_id).is_some(),
                "button '{}' references unresolved action '{}'",
                button.id,
                button.action_id
            );
        }
    }
}

#[tokio::test]
async fn button_press_executes_configured_action() {
    let (ui, actions) = load_shipped_configs();
    let state = AppState::new(ui, &actions, ActionCatalog::with_builtins());

    let active = state.active();
    let (_, button) = active.ui.find_button_and_page("greet_world").unwrap();
    let result = active
        .registry
        .execute(&button.action_id, button.action_params.clone())
        .await;

    assert_eq!(result["status"], "success");
    assert!(result["message"].as_str().unwrap().contains("World"));
}

#[tokio::test]
async fn unresolved_action_reference_fails_gracefully() {
    let ui_file = write_temp(
        r#"
pages:
  - id: main
    name: Main
    buttons:
      - id: broken
        text: Broken
        action_id: ghost
"#,
    );
    let actions_file = write_temp(
        r#"
actions:
  - id: ghost
    module: builtin
    function: does_not_exist
"#,
    );

    let (ui, actions) = ConfigLoader::new(ui_file.path(), actions_file.path())
        .load()
        .unwrap();
    // Partial load at boot is allowed; the unresolved action is simply absent
    let state = AppState::new(ui, &actions, ActionCatalog::with_builtins());
    let active = state.active();
    assert_eq!(active.registry.len(), 0);

    let (_, button) = active.ui.find_button_and_page("broken").unwrap();
    let result = active
        .registry
        .execute(&button.action_id, button.action_params.clone())
        .await;
    assert_eq!(result["kind"], KIND_NOT_FOUND);
    assert_eq!(result["status"], "error");
}

#[tokio::test]
async fn staged_config_applies_and_serves_new_actions() {
    let (ui, actions) = load_shipped_configs();
    let state = AppState::new(ui, &actions, ActionCatalog::with_builtins());

    let new_ui: UIConfig = serde_yaml::from_str(
        r#"
pages:
  - id: replaced
    name: Replaced
    buttons:
      - id: tick
        text: Tick
        action_id: tick
"#,
    )
    .unwrap();
    let new_actions: ActionsConfig = serde_yaml::from_str(
        r#"
actions:
  - id: tick
    module: builtin
    function: current_time
"#,
    )
    .unwrap();

    state
        .stage(DynamicUpdateConfig {
            ui_config: new_ui,
            actions_config: new_actions,
        })
        .unwrap();
    state.apply().unwrap();

    let active = state.active();
    assert_eq!(active.ui.pages[0].id, "replaced");
    let result = active
        .registry
        .execute("tick", Default::default())
        .await;
    assert_eq!(result["status"], "success");
    assert!(result["timestamp"].is_string());
}

#[tokio::test]
async fn live_updates_reach_connected_channels_and_prune_dead_ones() {
    let (ui, actions) = load_shipped_configs();
    let state = AppState::new(ui, &actions, ActionCatalog::with_builtins());
    let live = state.live();

    let healthy = Arc::new(RecordingChannel::default());
    let dead = Arc::new(RecordingChannel {
        sent: Mutex::new(Vec::new()),
        fail: true,
    });
    live.connect(healthy.clone());
    live.connect(dead);
    assert_eq!(live.client_count(), 2);

    live.broadcast_button_update(json!({
        "button_id": "live_metrics",
        "text": "Live: 503",
        "sparkline": {"points": [1.0, 3.0, 2.0]},
    }))
    .await;

    assert_eq!(live.client_count(), 1);
    let received = healthy.sent.lock().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["type"], "button_content_update");
    assert_eq!(received[0]["payload"]["button_id"], "live_metrics");
    assert_eq!(received[0]["payload"]["sparkline"]["points"][1], 3.0);
}

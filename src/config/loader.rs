//! YAML configuration loading and validation

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::models::{ActionsConfig, UIConfig};
use crate::error::{BoardError, Result};

/// Loads the UI and actions configuration files
pub struct ConfigLoader {
    ui_path: PathBuf,
    actions_path: PathBuf,
}

impl ConfigLoader {
    pub fn new(ui_path: impl Into<PathBuf>, actions_path: impl Into<PathBuf>) -> Self {
        Self {
            ui_path: ui_path.into(),
            actions_path: actions_path.into(),
        }
    }

    /// Load and validate both configuration files.
    pub fn load(&self) -> Result<(UIConfig, ActionsConfig)> {
        let ui = self.load_ui()?;
        let actions = self.load_actions()?;
        Ok((ui, actions))
    }

    pub fn load_ui(&self) -> Result<UIConfig> {
        let ui: UIConfig = read_yaml(&self.ui_path)?;
        validate_ui(&ui)?;
        tracing::info!(
            path = %self.ui_path.display(),
            pages = ui.pages.len(),
            "UI configuration loaded"
        );
        Ok(ui)
    }

    pub fn load_actions(&self) -> Result<ActionsConfig> {
        let actions: ActionsConfig = read_yaml(&self.actions_path)?;
        tracing::info!(
            path = %self.actions_path.display(),
            actions = actions.actions.len(),
            "Actions configuration loaded"
        );
        Ok(actions)
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(BoardError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(BoardError::Config(format!(
            "config file is empty: {}",
            path.display()
        )));
    }
    serde_yaml::from_str(&content).map_err(|e| {
        BoardError::Config(format!("failed to parse {}: {}", path.display(), e))
    })
}

/// Validate a parsed UI configuration.
///
/// Zero grid columns is rejected. Duplicate page or button ids are accepted
/// (lookups are first-match-wins) but logged so operators can fix the file.
pub fn validate_ui(ui: &UIConfig) -> Result<()> {
    let mut page_ids = HashSet::new();
    let mut button_ids = HashSet::new();

    for page in &ui.pages {
        if page.grid_columns == Some(0) {
            return Err(BoardError::Config(format!(
                "page '{}': grid_columns must be at least 1",
                page.id
            )));
        }
        if !page_ids.insert(page.id.as_str()) {
            tracing::warn!(page_id = %page.id, "duplicate page id; first match wins on lookup");
        }
        for button in &page.buttons {
            if !button_ids.insert(button.id.as_str()) {
                tracing::warn!(
                    button_id = %button.id,
                    "duplicate button id; first match wins on lookup"
                );
            }
        }
    }
    Ok(())
}

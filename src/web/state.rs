//! Shared application state
//!
//! Holds the active configuration behind an atomically swapped Arc, the
//! staged replacement awaiting apply, the action catalog, and the live
//! update manager.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::actions::{ActionCatalog, ActionRegistry};
use crate::config::{validate_ui, ActionsConfig, DynamicUpdateConfig, UIConfig};
use crate::error::{BoardError, Result};
use crate::realtime::LiveUpdateManager;

/// The currently served configuration: UI plus its matching registry.
/// Replaced as a unit on apply, never edited in place, so concurrent
/// readers only ever see a consistent pair.
pub struct ActiveConfig {
    pub ui: UIConfig,
    pub registry: ActionRegistry,
}

/// A validated replacement configuration awaiting an explicit apply
pub struct StagedConfig {
    pub ui: UIConfig,
    pub actions: ActionsConfig,
}

struct Shared {
    active: RwLock<Arc<ActiveConfig>>,
    staged: Mutex<Option<StagedConfig>>,
    catalog: ActionCatalog,
    live: LiveUpdateManager,
}

/// Cloneable handle to everything the request handlers need
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Shared>,
}

impl AppState {
    /// Build the initial state from loaded configuration.
    pub fn new(ui: UIConfig, actions: &ActionsConfig, catalog: ActionCatalog) -> Self {
        let mut registry = ActionRegistry::new();
        registry.load(&actions.actions, &catalog);

        Self {
            inner: Arc::new(Shared {
                active: RwLock::new(Arc::new(ActiveConfig { ui, registry })),
                staged: Mutex::new(None),
                catalog,
                live: LiveUpdateManager::new(),
            }),
        }
    }

    /// Snapshot of the active configuration
    pub fn active(&self) -> Arc<ActiveConfig> {
        self.inner.active.read().clone()
    }

    pub fn live(&self) -> &LiveUpdateManager {
        &self.inner.live
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.inner.catalog
    }

    /// Whether a staged configuration is waiting to be applied
    pub fn pending_update_available(&self) -> bool {
        self.inner.staged.lock().is_some()
    }

    /// Validate and stage a replacement configuration.
    ///
    /// Unlike boot-time loading, staging demands that every definition
    /// resolve; a partial registry would silently drop buttons' actions on
    /// apply.
    pub fn stage(&self, update: DynamicUpdateConfig) -> Result<()> {
        validate_ui(&update.ui_config)?;

        let mut probe = ActionRegistry::new();
        probe.load(&update.actions_config.actions, &self.inner.catalog);
        let defined = update.actions_config.actions.len();
        if probe.len() != defined {
            return Err(BoardError::Config(format!(
                "not all actions could be loaded (defined: {defined}, resolved: {})",
                probe.len()
            )));
        }

        *self.inner.staged.lock() = Some(StagedConfig {
            ui: update.ui_config,
            actions: update.actions_config,
        });
        tracing::info!(actions = defined, "new configuration staged");
        Ok(())
    }

    /// Apply the staged configuration, swapping the active pair as a unit.
    pub fn apply(&self) -> Result<()> {
        let staged = self
            .inner
            .staged
            .lock()
            .take()
            .ok_or_else(|| BoardError::Config("no staged configuration found to apply".into()))?;

        let mut registry = ActionRegistry::new();
        registry.load(&staged.actions.actions, &self.inner.catalog);

        *self.inner.active.write() = Arc::new(ActiveConfig {
            ui: staged.ui,
            registry,
        });
        tracing::info!("staged configuration applied");
        Ok(())
    }

    /// Drop the staged configuration. Returns whether one existed.
    pub fn discard(&self) -> bool {
        let discarded = self.inner.staged.lock().take().is_some();
        if discarded {
            tracing::info!("staged configuration discarded");
        }
        discarded
    }
}

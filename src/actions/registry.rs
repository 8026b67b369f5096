//! Action registry: resolves configured action ids to catalog callables
//! and executes them with uniform result handling.

use std::collections::HashMap;

use serde_json::{json, Value};

use super::catalog::{ActionCatalog, ActionFn};
use crate::config::{ActionDefinition, ActionParams};

/// Result kind for an unknown action id
pub const KIND_NOT_FOUND: &str = "not_found";
/// Result kind for an action that returned an error
pub const KIND_EXECUTION_ERROR: &str = "execution_error";

/// Build the structured failure value callers receive instead of an error.
/// Carries `message` alongside `error` so the UI can show it directly.
fn failure(kind: &str, message: String) -> Value {
    json!({
        "status": "error",
        "kind": kind,
        "error": message,
        "message": message,
    })
}

/// Maps action ids to resolved callables.
///
/// Built once per configuration load and read-only afterwards; concurrent
/// `get`/`execute` calls need no locking. Reconfiguration builds a fresh
/// registry and publishes it as a unit.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, ActionFn>,
    definitions: HashMap<String, ActionDefinition>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve each definition against the catalog and register the ones
    /// that succeed. A definition whose module or function is unknown is
    /// logged and skipped; the rest still load. Replaces any previous
    /// contents, no merge.
    pub fn load(&mut self, definitions: &[ActionDefinition], catalog: &ActionCatalog) {
        self.actions.clear();
        self.definitions.clear();

        for def in definitions {
            match catalog.resolve(&def.module, &def.function) {
                Some(action) => {
                    tracing::info!(
                        id = %def.id,
                        module = %def.module,
                        function = %def.function,
                        "registered action"
                    );
                    self.actions.insert(def.id.clone(), action);
                    self.definitions.insert(def.id.clone(), def.clone());
                }
                None if !catalog.has_module(&def.module) => {
                    tracing::error!(
                        id = %def.id,
                        module = %def.module,
                        "failed to register action: unknown module"
                    );
                }
                None => {
                    tracing::error!(
                        id = %def.id,
                        module = %def.module,
                        function = %def.function,
                        "failed to register action: unknown function"
                    );
                }
            }
        }
        tracing::info!(
            loaded = self.actions.len(),
            defined = definitions.len(),
            "action loading complete"
        );
    }

    /// Pure lookup of a loaded action
    pub fn get(&self, action_id: &str) -> Option<&ActionFn> {
        self.actions.get(action_id)
    }

    /// The definition an id was loaded from, if it resolved
    pub fn definition(&self, action_id: &str) -> Option<&ActionDefinition> {
        self.definitions.get(action_id)
    }

    /// Number of loaded actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Execute an action by id with the given parameters.
    ///
    /// Exactly one invocation per call; an unknown id or a failing action
    /// yields a structured error value, never an Err or a panic across this
    /// boundary. The caller suspends until the action completes.
    pub async fn execute(&self, action_id: &str, params: ActionParams) -> Value {
        let Some(action) = self.get(action_id) else {
            let message = format!("Action '{action_id}' not found in registry. Cannot execute.");
            tracing::error!(%action_id, "action lookup miss");
            return failure(KIND_NOT_FOUND, message);
        };

        tracing::info!(%action_id, ?params, "executing action");
        match action(params).await {
            Ok(result) => {
                tracing::debug!(%action_id, "action executed successfully");
                result
            }
            Err(e) => {
                let message = format!("Error during execution of action '{action_id}': {e}");
                tracing::error!(%action_id, error = %e, "action execution failed");
                failure(KIND_EXECUTION_ERROR, message)
            }
        }
    }
}

//! Compiled-in table of invocable action functions
//!
//! The original system resolved `module`/`function` strings by reflective
//! import. Here every action is registered explicitly at startup and the
//! configuration strings only select among registered entries.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::config::ActionParams;
use crate::error::Result;

/// The uniform shape every action conforms to: takes named parameters,
/// returns a future. Synchronous actions complete without suspending.
pub type ActionFuture = BoxFuture<'static, Result<Value>>;

/// An invocable action function
pub type ActionFn = Arc<dyn Fn(ActionParams) -> ActionFuture + Send + Sync>;

/// Registration table mapping module name -> function name -> callable.
///
/// Built once at startup and treated as immutable afterwards; registry
/// loads resolve configuration entries against it.
#[derive(Default)]
pub struct ActionCatalog {
    modules: HashMap<String, HashMap<String, ActionFn>>,
}

impl ActionCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the stock `builtin` module registered
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        super::builtin::register(&mut catalog);
        catalog
    }

    /// Register a function under `module`/`function`. A later registration
    /// with the same names replaces the earlier one.
    pub fn register(&mut self, module: &str, function: &str, action: ActionFn) {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(function.to_string(), action);
        tracing::debug!(module, function, "registered catalog action");
    }

    /// Resolve a module/function pair to its callable
    pub fn resolve(&self, module: &str, function: &str) -> Option<ActionFn> {
        self.modules.get(module)?.get(function).cloned()
    }

    /// Whether the catalog contains the named module
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }
}

//! Board configuration: data model and YAML loading

mod loader;
mod models;

pub use loader::{validate_ui, ConfigLoader};
pub use models::{
    ActionDefinition, ActionParams, ActionsConfig, ButtonConfig, DynamicUpdateConfig, PageConfig,
    UIConfig,
};

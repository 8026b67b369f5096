//! Configuration data model for controldeck
//!
//! The in-memory form of the two YAML documents the server consumes: a UI
//! description (pages of buttons) and an actions description (which catalog
//! entries the board may invoke).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Parameters passed to an action when its button is pressed
pub type ActionParams = HashMap<String, serde_json::Value>;

/// A single button on a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// Unique identifier (uniqueness is not enforced, see [`UIConfig`])
    pub id: String,
    /// Display text
    pub text: String,
    /// Icon class, e.g. "fas fa-rocket"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_class: Option<String>,
    /// Extra CSS class for styling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_class: Option<String>,
    /// References an action id from the actions config. Not validated at
    /// parse time; an unresolved id fails gracefully at invocation.
    pub action_id: String,
    /// Named arguments supplied to the action on invocation
    #[serde(default)]
    pub action_params: ActionParams,
    /// Source URL for dynamic button content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_content_url: Option<String>,
}

/// A page of buttons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub id: String,
    pub name: String,
    /// Layout kind ("grid", "flex", ...)
    #[serde(default = "default_layout")]
    pub layout: String,
    /// Column count when layout is "grid"; must be at least 1
    #[serde(default = "default_grid_columns")]
    pub grid_columns: Option<u32>,
    pub buttons: Vec<ButtonConfig>,
}

fn default_layout() -> String {
    "grid".to_string()
}

fn default_grid_columns() -> Option<u32> {
    Some(3)
}

/// The complete UI description: an ordered list of pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub pages: Vec<PageConfig>,
}

impl UIConfig {
    /// Look up a page by id. Linear scan, first match wins.
    pub fn page(&self, page_id: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// Find a button and its containing page by button id.
    ///
    /// Linear scan across pages in order; the first button with a matching
    /// id wins. Duplicate ids are legal in the model.
    pub fn find_button_and_page(&self, button_id: &str) -> Option<(&PageConfig, &ButtonConfig)> {
        for page in &self.pages {
            if let Some(button) = page.buttons.iter().find(|b| b.id == button_id) {
                return Some((page, button));
            }
        }
        None
    }
}

/// Binds an action id to an entry in the compiled-in catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Unique key used by buttons to invoke this action
    pub id: String,
    /// Catalog module name, e.g. "builtin"
    pub module: String,
    /// Function name within the module
    pub function: String,
}

/// The complete actions description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsConfig {
    pub actions: Vec<ActionDefinition>,
}

/// Request body for staging a full configuration replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicUpdateConfig {
    pub ui_config: UIConfig,
    pub actions_config: ActionsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(id: &str, action_id: &str) -> ButtonConfig {
        ButtonConfig {
            id: id.to_string(),
            text: id.to_string(),
            icon_class: None,
            style_class: None,
            action_id: action_id.to_string(),
            action_params: ActionParams::new(),
            dynamic_content_url: None,
        }
    }

    fn page(id: &str, buttons: Vec<ButtonConfig>) -> PageConfig {
        PageConfig {
            id: id.to_string(),
            name: id.to_string(),
            layout: "grid".to_string(),
            grid_columns: Some(2),
            buttons,
        }
    }

    #[test]
    fn test_find_button_and_page() {
        let ui = UIConfig {
            pages: vec![
                page("p1", vec![button("b1", "a1")]),
                page("p2", vec![button("b2", "a2")]),
            ],
        };

        let (p, b) = ui.find_button_and_page("b2").unwrap();
        assert_eq!(p.id, "p2");
        assert_eq!(b.action_id, "a2");
        assert!(ui.find_button_and_page("nope").is_none());
    }

    #[test]
    fn test_duplicate_ids_first_match_wins() {
        let ui = UIConfig {
            pages: vec![
                page("p1", vec![button("dup", "first")]),
                page("p2", vec![button("dup", "second")]),
            ],
        };

        let (p, b) = ui.find_button_and_page("dup").unwrap();
        assert_eq!(p.id, "p1");
        assert_eq!(b.action_id, "first");
    }

    #[test]
    fn test_defaults_from_yaml() {
        let yaml = r#"
pages:
  - id: main
    name: Main
    buttons:
      - id: hello
        text: Say Hello
        action_id: greet
"#;
        let ui: UIConfig = serde_yaml::from_str(yaml).unwrap();
        let p = ui.page("main").unwrap();
        assert_eq!(p.layout, "grid");
        assert_eq!(p.grid_columns, Some(3));
        assert!(p.buttons[0].action_params.is_empty());
        assert!(p.buttons[0].icon_class.is_none());
    }
}

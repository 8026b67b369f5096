//! Live-update payload types
//!
//! The shapes pushed to connected clients. The manager broadcasts these
//! verbatim; beyond being serializable their content is up to the sender.

use serde::{Deserialize, Serialize};

/// Message kind tag for button content updates
pub const MSG_BUTTON_CONTENT_UPDATE: &str = "button_content_update";

/// A small time series rendered as a sparkline on a button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparklineData {
    /// Numeric samples, oldest first
    pub points: Vec<f64>,
    /// Stroke color, e.g. "#4caf50"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
}

/// A live content change for one button.
///
/// Any subset of the optional fields may be present; None fields are
/// omitted from the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonContentUpdate {
    /// Target button id
    pub button_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparkline: Option<SparklineData>,
}

impl ButtonContentUpdate {
    /// Whether any content field is set besides the target id
    pub fn has_changes(&self) -> bool {
        self.text.is_some()
            || self.icon_class.is_some()
            || self.style_class.is_some()
            || self.sparkline.is_some()
    }
}

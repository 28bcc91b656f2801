use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names used by the tool when it annotates the points which defined the plane. None of these
/// affect the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// The display layer which holds the plane markers
    pub marker_layer: String,

    /// Markers are labelled `"{marker_label} 1"` through `"{marker_label} 3"`
    pub marker_label: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            marker_layer: "annotateLayer".to_string(),
            marker_label: "point".to_string(),
        }
    }
}

impl ToolConfig {
    /// Parse a configuration from a JSON document. Missing fields take their default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use planesnap::ToolConfig;
    /// let config = ToolConfig::from_json(r#"{ "marker_label": "V" }"#).unwrap();
    /// assert_eq!(config.marker_label, "V");
    /// assert_eq!(config.marker_layer, "annotateLayer");
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The label for the marker at the zero based `index` in the plane's point order
    pub fn label_for(&self, index: usize) -> String {
        format!("{} {}", self.marker_label, index + 1)
    }
}

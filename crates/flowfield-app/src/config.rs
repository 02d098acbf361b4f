//! Run configuration: built-in defaults, an optional JSON file, then flags.

use flowfield_core::{FlowFieldError, Result};
use flowfield_orientation::OrientationParams;
use flowfield_viz::OverlayStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a run needs besides file paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowFieldConfig {
    pub orientation: OrientationParams,
    pub overlay: OverlayStyle,
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub smooth_sigma: Option<f64>,
    pub sum_sigma: Option<f64>,
    pub stride: Option<usize>,
}

impl FlowFieldConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| FlowFieldError::Serialization(format!("{}: {e}", path.display())))
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load from `path` when given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(v) = overrides.smooth_sigma {
            self.orientation.smooth_sigma = v;
        }
        if let Some(v) = overrides.sum_sigma {
            self.orientation.sum_sigma = v;
        }
        if let Some(v) = overrides.stride {
            self.overlay.stride = v;
        }
        self
    }

    /// Validate parameters before any image is read.
    pub fn validate(&self) -> Result<()> {
        self.orientation.validate()?;
        self.overlay.validate()
    }
}

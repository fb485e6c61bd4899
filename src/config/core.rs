use serde::{Deserialize, Serialize};

use crate::call_graph::DEFAULT_SEPARATOR;

/// Cohesion threshold used when neither the config nor the CLI sets one
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// Root configuration structure for archmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ArchmapConfig {
    /// How identifiers in the call graph are split into class and member
    #[serde(default)]
    pub call_graph: Option<CallGraphConfig>,

    /// Module extraction settings
    #[serde(default)]
    pub clustering: Option<ClusteringConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CallGraphConfig {
    /// Separator between class and method name (default: ".")
    #[serde(default)]
    pub separator: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClusteringConfig {
    /// Minimum average internal coupling for a subtree to become a module
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl ArchmapConfig {
    pub fn separator(&self) -> &str {
        self.call_graph
            .as_ref()
            .and_then(|c| c.separator.as_deref())
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    pub fn threshold(&self) -> f64 {
        self.clustering
            .as_ref()
            .and_then(|c| c.threshold)
            .unwrap_or(DEFAULT_THRESHOLD)
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.default_format.as_deref())
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.use_color)
    }
}

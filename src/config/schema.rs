//! Configuration schema definitions.
//!
//! Settings for the `apigee-hcl` tool itself, not for the documents it
//! decodes. Every field has a default so an absent or empty file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the tool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ToolConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// How decoded documents are printed.
    pub output: OutputConfig,
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Output configuration for `decode`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON.
    pub pretty: bool,

    /// Include the resource map in the output.
    pub include_resources: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            include_resources: true,
        }
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate enumerated values (log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ToolConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ToolConfig;

/// Levels accepted by `observability.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

pub fn validate_config(config: &ToolConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: format!(
                "unknown level '{}', expected one of [{}]",
                config.observability.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

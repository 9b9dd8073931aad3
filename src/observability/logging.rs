//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level at runtime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level when set
//! - Events go to stderr; stdout carries command output only

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("apigee_hcl={}", level.to_ascii_lowercase())
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

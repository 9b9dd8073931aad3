//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! hcl, dsl, CLI produce:
//!     → tracing events (debug per decoded block, warn on skips)
//!     → logging.rs (EnvFilter + fmt layer on stderr)
//! ```

pub mod logging;

pub use logging::init_logging;

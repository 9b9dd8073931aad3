//! Proxy definition decoding.
//!
//! # Data Flow
//! ```text
//! .hcl file
//!     → hcl::parse (labeled tree)
//!     → config.rs (assembler: proxy, endpoints, policies)
//!     → registry.rs (policy type → decoder)
//!     → policies/*, endpoints/* (field extraction, validation)
//!     → Config (immutable) or DecodeError (every failure, positioned)
//! ```
//!
//! # Design Decisions
//! - Decoding is a pure, synchronous tree walk; nothing is shared or mutated
//!   outside the value being built
//! - Unknown policy types are skipped and reported on the `Config`
//! - Label and validation failures are collected per list; structural
//!   failures abort the enclosing decoder

pub mod common;
pub mod config;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod loader;
pub mod policies;
pub mod proxy;
pub mod registry;
pub mod watcher;

pub use config::{decode_config, decode_config_with, Config, SkippedPolicy};
pub use error::{DecodeError, ErrorCollector, ErrorKind, MultiError, PosError};
pub use loader::{load_document, load_str, LoadError};
pub use policies::{HasResource, Policy, PolicyBase, Resource};
pub use registry::PolicyRegistry;
pub use watcher::DocumentWatcher;

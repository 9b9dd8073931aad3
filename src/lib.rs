//! Apigee proxy definitions in HCL.
//!
//! Decodes a labeled configuration document describing an Apigee API proxy
//! (proxy metadata, proxy and target endpoints, policies) into a typed
//! [`dsl::Config`], reporting every positioned error in one pass.
//!
//! ```text
//! .hcl ──► hcl::parse ──► dsl::decode_config ──► Config { proxy, endpoints, policies, resources }
//! ```

pub mod config;
pub mod dsl;
pub mod hcl;
pub mod observability;

pub use dsl::{decode_config, load_document, Config, DecodeError, Policy};

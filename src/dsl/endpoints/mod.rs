//! Proxy and target endpoints.
//!
//! # Responsibilities
//! - Decode `proxy_endpoint` and `target_endpoint` blocks with their flows
//! - Decode the HTTP connection blocks, also used by `service_callout`
//!
//! # Design Decisions
//! - An endpoint fails as a unit: label errors inside its flows and route
//!   rules are gathered, then returned together for that endpoint

pub mod connection;
pub mod flow;
pub mod proxy_endpoint;
pub mod target_endpoint;

pub use connection::{
    decode_http_proxy_connection, decode_http_target_connection, HttpProxyConnection,
    HttpTargetConnection,
};
pub use flow::{Flow, Step};
pub use proxy_endpoint::{decode_proxy_endpoints, ProxyEndpoint, RouteRule};
pub use target_endpoint::{decode_target_endpoints, TargetEndpoint};

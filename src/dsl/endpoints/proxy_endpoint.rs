//! `proxy_endpoint "<name>" { ... }` blocks.

use serde::Serialize;
use tracing::debug;

use crate::dsl::decode;
use crate::dsl::endpoints::connection::{decode_http_proxy_connection, HttpProxyConnection};
use crate::dsl::endpoints::flow::{decode_flows, decode_singleton_flow, Flow};
use crate::dsl::error::{DecodeError, ErrorCollector, ErrorKind};
use crate::hcl::ObjectList;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyEndpoint {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_flow: Option<Flow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flows: Vec<Flow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_flow: Option<Flow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_client_flow: Option<Flow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy_connection: Option<HttpProxyConnection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub route_rules: Vec<RouteRule>,
}

/// Routes a request to a target endpoint or URL when `condition` holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRule {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Decode every entry of `items`, already filtered by `proxy_endpoint`.
///
/// Any failure, including a missing flow or route rule label, fails the
/// whole list.
pub fn decode_proxy_endpoints(items: &ObjectList) -> Result<Vec<ProxyEndpoint>, DecodeError> {
    let mut endpoints = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "proxy endpoint")?;
        let Some(name) = item.label(0) else {
            return Err(DecodeError::at(
                item.pos(),
                ErrorKind::MissingLabel("proxy_endpoint"),
            ));
        };

        let mut errors = ErrorCollector::new();
        let endpoint = ProxyEndpoint {
            name: name.to_string(),
            pre_flow: decode_singleton_flow(list, "pre_flow", &mut errors)?,
            flows: decode_flows(list, &mut errors)?,
            post_flow: decode_singleton_flow(list, "post_flow", &mut errors)?,
            post_client_flow: decode_singleton_flow(list, "post_client_flow", &mut errors)?,
            http_proxy_connection: decode_http_proxy_connection(list)?,
            route_rules: decode_route_rules(&list.filter("route_rule"), &mut errors)?,
        };
        let endpoint = errors.finish(endpoint)?;

        debug!(
            name = %endpoint.name,
            flows = endpoint.flows.len(),
            route_rules = endpoint.route_rules.len(),
            "decoded proxy endpoint"
        );
        endpoints.push(endpoint);
    }
    Ok(endpoints)
}

fn decode_route_rules(
    items: &ObjectList,
    errors: &mut ErrorCollector,
) -> Result<Vec<RouteRule>, DecodeError> {
    let mut rules = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "route_rule")?;
        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingLabel("route_rule")));
            continue;
        };
        rules.push(RouteRule {
            name: name.to_string(),
            condition: decode::string(list, "condition")?,
            target_endpoint: decode::string(list, "target_endpoint")?,
            url: decode::string(list, "url")?,
        });
    }
    Ok(rules)
}

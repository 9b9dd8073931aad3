//! `target_endpoint "<name>" { ... }` blocks.

use serde::Serialize;
use tracing::debug;

use crate::dsl::decode;
use crate::dsl::endpoints::connection::{decode_http_target_connection, HttpTargetConnection};
use crate::dsl::endpoints::flow::{decode_flows, decode_singleton_flow, Flow};
use crate::dsl::error::{DecodeError, ErrorCollector, ErrorKind};
use crate::hcl::ObjectList;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetEndpoint {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_flow: Option<Flow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flows: Vec<Flow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_flow: Option<Flow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_target_connection: Option<HttpTargetConnection>,
}

/// Decode every entry of `items`, already filtered by `target_endpoint`.
pub fn decode_target_endpoints(items: &ObjectList) -> Result<Vec<TargetEndpoint>, DecodeError> {
    let mut endpoints = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "target endpoint")?;
        let Some(name) = item.label(0) else {
            return Err(DecodeError::at(
                item.pos(),
                ErrorKind::MissingLabel("target_endpoint"),
            ));
        };

        let mut errors = ErrorCollector::new();
        let endpoint = TargetEndpoint {
            name: name.to_string(),
            pre_flow: decode_singleton_flow(list, "pre_flow", &mut errors)?,
            flows: decode_flows(list, &mut errors)?,
            post_flow: decode_singleton_flow(list, "post_flow", &mut errors)?,
            http_target_connection: decode_http_target_connection(list)?,
        };
        let endpoint = errors.finish(endpoint)?;

        debug!(name = %endpoint.name, flows = endpoint.flows.len(), "decoded target endpoint");
        endpoints.push(endpoint);
    }
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::parse;

    #[test]
    fn test_target_endpoint() {
        let doc = parse(
            r#"
            target_endpoint "default" {
              pre_flow {
                request { step "assign-auth" {} }
              }
              http_target_connection {
                url = "https://weather.example.com"
                properties {
                  "io.timeout.millis" = 5000
                }
              }
            }
            target_endpoint "backup" {
              http_target_connection { url = "https://backup.example.com" }
            }
            "#,
        )
        .unwrap();

        let endpoints = decode_target_endpoints(&doc.filter("target_endpoint")).unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].name, "default");
        let conn = endpoints[0].http_target_connection.as_ref().unwrap();
        assert_eq!(conn.url.as_deref(), Some("https://weather.example.com"));
        assert_eq!(conn.properties[0].value, "5000");
        assert_eq!(endpoints[1].name, "backup");
        assert!(endpoints[1].pre_flow.is_none());
    }

    #[test]
    fn test_target_endpoint_not_an_object() {
        let doc = parse("target_endpoint \"default\" = \"x\"").unwrap();
        let err = decode_target_endpoints(&doc.filter("target_endpoint")).unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::NotAnObject("target endpoint"));
    }
}

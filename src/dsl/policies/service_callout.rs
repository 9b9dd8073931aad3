//! `<ServiceCallout/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/service-callout-policy
//!
//! ```text
//! policy "service_callout" "sc" {
//!   request {
//!     variable = "myRequest"
//!     set { verb = "GET" }
//!   }
//!   response = "calloutResponse"
//!   timeout  = 30000
//!   http_target_connection { url = "https://example.com/api" }
//! }
//! ```

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::endpoints::{decode_http_target_connection, HttpTargetConnection};
use crate::dsl::error::{DecodeError, ErrorCollector};
use crate::dsl::policies::message::{decode_message_ops, MessageOps};
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::Item;

pub const KIND: &str = "service_callout";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCallout {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<CalloutRequest>,
    /// Flow variable that receives the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_target_connection: Option<HttpTargetConnection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalloutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    pub clear_payload: bool,
    pub ignore_unresolved_variables: bool,
    #[serde(flatten)]
    pub ops: MessageOps,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "service_callout policy")?;
    let mut errors = ErrorCollector::new();

    let request = match decode::block(list, "request", "request")? {
        Some(body) => Some(CalloutRequest {
            variable: decode::string(body, "variable")?,
            clear_payload: decode::flag(body, "clear_payload")?,
            ignore_unresolved_variables: decode::flag(body, "ignore_unresolved_variables")?,
            ops: decode_message_ops(body, &mut errors)?,
        }),
        None => None,
    };

    errors.finish(Policy::ServiceCallout(ServiceCallout {
        base,
        display_name: decode::string(list, "display_name")?,
        request,
        response: decode::string(list, "response")?,
        timeout: decode::unsigned(list, "timeout")?,
        http_target_connection: decode_http_target_connection(list)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::error::ErrorKind;
    use crate::hcl::parse;

    fn decode_first(src: &str) -> Result<Policy, DecodeError> {
        let doc = parse(src).unwrap();
        decode(&doc.filter("policy").items[0])
    }

    #[test]
    fn test_service_callout() {
        let policy = decode_first(
            r#"
            policy "service_callout" "sc" {
              request {
                variable      = "myRequest"
                clear_payload = true
                set {
                  verb = "GET"
                  query_param "q" { value = "{request.queryparam.q}" }
                }
              }
              response = "calloutResponse"
              timeout  = 30000
              http_target_connection {
                url = "https://example.com/api"
              }
            }
            "#,
        )
        .unwrap();

        let Policy::ServiceCallout(sc) = policy else {
            panic!("expected service callout");
        };
        let request = sc.request.unwrap();
        assert_eq!(request.variable.as_deref(), Some("myRequest"));
        assert!(request.clear_payload);
        assert_eq!(request.ops.set.unwrap().query_params[0].name, "q");
        assert_eq!(sc.response.as_deref(), Some("calloutResponse"));
        assert_eq!(sc.timeout, Some(30000));
        assert_eq!(
            sc.http_target_connection.unwrap().url.as_deref(),
            Some("https://example.com/api")
        );
    }

    #[test]
    fn test_negative_timeout() {
        let err = decode_first("policy \"service_callout\" \"sc\" { timeout = -1 }").unwrap_err();
        assert!(matches!(
            err.errors()[0].kind,
            ErrorKind::AttributeType { expected: "a non-negative integer", .. }
        ));
    }
}

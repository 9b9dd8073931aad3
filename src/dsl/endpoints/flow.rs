//! Flows shared by proxy and target endpoints.
//!
//! ```text
//! pre_flow {
//!   request  { step "verify-api-key" {} }
//!   response { step "add-cors" { condition = "request.verb != \"OPTIONS\"" } }
//! }
//! flow "get-forecast" {
//!   description = "Forecast lookups"
//!   condition   = "proxy.pathsuffix MatchesPath \"/forecast\""
//!   request { step "spike-arrest" {} }
//! }
//! ```
//!
//! `pre_flow`, `post_flow` and `post_client_flow` are singletons; `flow`
//! repeats and every entry needs a label, as does every `step`.

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorCollector, ErrorKind};
use crate::hcl::ObjectList;

/// A named conditional flow, or one of the unnamed pre/post flows.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Flow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub request: Vec<Step>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response: Vec<Step>,
}

/// A reference to a policy by name, executed when `condition` holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Decode the singleton flow block `key` of `list`, if present.
pub fn decode_singleton_flow(
    list: &ObjectList,
    key: &'static str,
    errors: &mut ErrorCollector,
) -> Result<Option<Flow>, DecodeError> {
    match decode::block(list, key, key)? {
        Some(body) => Ok(Some(decode_flow_body(body, None, errors)?)),
        None => Ok(None),
    }
}

/// Decode every `flow "<name>"` entry of `list`.
pub fn decode_flows(
    list: &ObjectList,
    errors: &mut ErrorCollector,
) -> Result<Vec<Flow>, DecodeError> {
    let items = list.filter("flow");
    let mut flows = Vec::with_capacity(items.len());
    for item in &items {
        let body = decode::object(item, "flow")?;
        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingLabel("flow")));
            continue;
        };
        flows.push(decode_flow_body(body, Some(name.to_string()), errors)?);
    }
    Ok(flows)
}

fn decode_flow_body(
    list: &ObjectList,
    name: Option<String>,
    errors: &mut ErrorCollector,
) -> Result<Flow, DecodeError> {
    let request = match decode::block(list, "request", "request")? {
        Some(body) => decode_steps(body, errors)?,
        None => Vec::new(),
    };
    let response = match decode::block(list, "response", "response")? {
        Some(body) => decode_steps(body, errors)?,
        None => Vec::new(),
    };

    Ok(Flow {
        name,
        description: decode::string(list, "description")?,
        condition: decode::string(list, "condition")?,
        request,
        response,
    })
}

fn decode_steps(list: &ObjectList, errors: &mut ErrorCollector) -> Result<Vec<Step>, DecodeError> {
    let items = list.filter("step");
    let mut steps = Vec::with_capacity(items.len());
    for item in &items {
        let body = decode::object(item, "step")?;
        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingLabel("step")));
            continue;
        };
        steps.push(Step {
            name: name.to_string(),
            condition: decode::string(body, "condition")?,
        });
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::parse;

    #[test]
    fn test_flows() {
        let doc = parse(
            r#"
            pre_flow {
              request {
                step "verify-api-key" {}
                step "quota" { condition = "client.plan = \"free\"" }
              }
            }
            flow "forecast" {
              description = "Forecast lookups"
              condition   = "proxy.pathsuffix MatchesPath \"/forecast\""
              response { step "add-cors" {} }
            }
            flow "alerts" {}
            "#,
        )
        .unwrap();

        let mut errors = ErrorCollector::new();
        let pre = decode_singleton_flow(&doc, "pre_flow", &mut errors)
            .unwrap()
            .unwrap();
        assert_eq!(pre.name, None);
        assert_eq!(pre.request.len(), 2);
        assert_eq!(pre.request[1].condition.as_deref(), Some("client.plan = \"free\""));
        assert!(pre.response.is_empty());

        assert!(decode_singleton_flow(&doc, "post_flow", &mut errors)
            .unwrap()
            .is_none());

        let flows = decode_flows(&doc, &mut errors).unwrap();
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].name.as_deref(), Some("forecast"));
        assert_eq!(flows[0].response[0].name, "add-cors");
        assert_eq!(flows[1].name.as_deref(), Some("alerts"));
        assert!(errors.finish(()).is_ok());
    }

    #[test]
    fn test_unlabeled_flows_and_steps() {
        let doc = parse(
            r#"
            flow {
              request { step "a" {} }
            }
            flow "named" {
              request { step {} }
            }
            "#,
        )
        .unwrap();

        let mut errors = ErrorCollector::new();
        let flows = decode_flows(&doc, &mut errors).unwrap();
        assert_eq!(flows.len(), 1);
        assert!(flows[0].request.is_empty());

        let err = errors.finish(()).unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::MissingLabel("flow"));
        assert_eq!(err.errors()[0].pos.line, 2);
        assert_eq!(err.errors()[1].kind, ErrorKind::MissingLabel("step"));
    }
}

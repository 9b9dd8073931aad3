//! `<ExtractVariables/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/extract-variables-policy
//!
//! ```text
//! policy "extract_variables" "ev" {
//!   source { value = "request" }
//!   uri_path { pattern { value = "/a/{id}" } }
//!   header "X-Key" { pattern { ignore_case = true  value = "{key}" } }
//!   json_payload { variable "name" { json_path = "$.name" } }
//!   xml_payload  { namespace "s" { value = "urn:s" }  variable "v" { xpath = "/s:a" } }
//! }
//! ```

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorCollector, ErrorKind};
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::{Item, ObjectList};

pub const KIND: &str = "extract_variables";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractVariables {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_prefix: Option<String>,
    pub ignore_unresolved_variables: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uri_paths: Vec<UriPath>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<NamedPatterns>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<NamedPatterns>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form_params: Vec<NamedPatterns>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<NamedPatterns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_payload: Option<JsonPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_payload: Option<XmlPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    pub clear_payload: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub ignore_case: bool,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UriPath {
    pub patterns: Vec<Pattern>,
}

/// A labeled extraction source: query param, header, form param or variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedPatterns {
    pub name: String,
    pub patterns: Vec<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonPayload {
    pub variables: Vec<JsonVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonVariable {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
    pub json_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlPayload {
    pub stop_payload_processing: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<XmlNamespace>,
    pub variables: Vec<XmlVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNamespace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlVariable {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
    pub xpath: String,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "extract variables policy")?;
    let mut errors = ErrorCollector::new();

    let source = match decode::block(list, "source", "source")? {
        Some(body) => Some(Source {
            clear_payload: decode::flag(body, "clear_payload")?,
            value: decode::string_or_default(body, "value")?,
        }),
        None => None,
    };

    let uri_paths = decode_uri_paths(&list.filter("uri_path"))?;
    let query_params = decode_named_patterns(&list.filter("query_param"), "query_param", &mut errors)?;
    let headers = decode_named_patterns(&list.filter("header"), "header", &mut errors)?;
    let form_params = decode_named_patterns(&list.filter("form_param"), "form_param", &mut errors)?;
    let variables = decode_named_patterns(&list.filter("variable"), "variable", &mut errors)?;

    let json_payload = match decode::block(list, "json_payload", "json_payload")? {
        Some(body) => Some(decode_json_payload(body, &mut errors)?),
        None => None,
    };
    let xml_payload = match decode::block(list, "xml_payload", "xml_payload")? {
        Some(body) => Some(decode_xml_payload(body, &mut errors)?),
        None => None,
    };

    errors.finish(Policy::ExtractVariables(ExtractVariables {
        base,
        display_name: decode::string(list, "display_name")?,
        source,
        variable_prefix: decode::string(list, "variable_prefix")?,
        ignore_unresolved_variables: decode::flag(list, "ignore_unresolved_variables")?,
        uri_paths,
        query_params,
        headers,
        form_params,
        variables,
        json_payload,
        xml_payload,
    }))
}

fn decode_patterns(items: &ObjectList) -> Result<Vec<Pattern>, DecodeError> {
    let mut patterns = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "pattern")?;
        patterns.push(Pattern {
            ignore_case: decode::flag(list, "ignore_case")?,
            value: decode::string_or_default(list, "value")?,
        });
    }
    Ok(patterns)
}

fn decode_uri_paths(items: &ObjectList) -> Result<Vec<UriPath>, DecodeError> {
    let mut uri_paths = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "uri_path")?;
        uri_paths.push(UriPath {
            patterns: decode_patterns(&list.filter("pattern"))?,
        });
    }
    Ok(uri_paths)
}

/// Decode labeled entries that hold patterns. Unlabeled entries are recorded
/// and skipped so their siblings are still checked.
fn decode_named_patterns(
    items: &ObjectList,
    what: &'static str,
    errors: &mut ErrorCollector,
) -> Result<Vec<NamedPatterns>, DecodeError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, what)?;
        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingLabel(what)));
            continue;
        };
        result.push(NamedPatterns {
            name: name.to_string(),
            patterns: decode_patterns(&list.filter("pattern"))?,
        });
    }
    Ok(result)
}

fn decode_json_payload(
    list: &ObjectList,
    errors: &mut ErrorCollector,
) -> Result<JsonPayload, DecodeError> {
    let items = list.filter("variable");
    let mut variables = Vec::with_capacity(items.len());
    for item in &items {
        let body = decode::object(item, "variable")?;
        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingLabel("variable")));
            continue;
        };
        variables.push(JsonVariable {
            name: name.to_string(),
            var_type: decode::string(body, "type")?,
            json_path: decode::string_or_default(body, "json_path")?,
        });
    }
    Ok(JsonPayload { variables })
}

fn decode_xml_payload(
    list: &ObjectList,
    errors: &mut ErrorCollector,
) -> Result<XmlPayload, DecodeError> {
    let namespace_items = list.filter("namespace");
    let mut namespaces = Vec::with_capacity(namespace_items.len());
    for item in &namespace_items {
        let body = decode::object(item, "namespace")?;
        namespaces.push(XmlNamespace {
            prefix: item.label(0).map(str::to_string),
            value: decode::string_or_default(body, "value")?,
        });
    }

    let variable_items = list.filter("variable");
    let mut variables = Vec::with_capacity(variable_items.len());
    for item in &variable_items {
        let body = decode::object(item, "variable")?;
        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingLabel("variable")));
            continue;
        };
        variables.push(XmlVariable {
            name: name.to_string(),
            var_type: decode::string(body, "type")?,
            xpath: decode::string_or_default(body, "xpath")?,
        });
    }

    Ok(XmlPayload {
        stop_payload_processing: decode::flag(list, "stop_payload_processing")?,
        namespaces,
        variables,
    })
}

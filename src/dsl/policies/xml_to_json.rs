//! `<XMLToJSON/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/xml-json-policy

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::DecodeError;
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::{Item, ObjectList};

pub const KIND: &str = "xml_to_json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlToJson {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_variable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Options {
    pub recognize_number: bool,
    pub recognize_boolean: bool,
    pub recognize_null: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_prefix: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub treat_as_array: Vec<ArrayPath>,
}

/// An XPath-like path whose element is always emitted as a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayPath {
    pub unwrap: bool,
    pub value: String,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "xml_to_json policy")?;

    let options = match decode::block(list, "options", "options")? {
        Some(body) => Some(decode_options(body)?),
        None => None,
    };

    Ok(Policy::XmlToJson(XmlToJson {
        base,
        display_name: decode::string(list, "display_name")?,
        source: decode::string(list, "source")?,
        output_variable: decode::string(list, "output_variable")?,
        format: decode::string(list, "format")?,
        options,
    }))
}

fn decode_options(list: &ObjectList) -> Result<Options, DecodeError> {
    let treat_as_array = match decode::block(list, "treat_as_array", "treat_as_array")? {
        Some(body) => decode_paths(&body.filter("path"))?,
        None => Vec::new(),
    };

    Ok(Options {
        recognize_number: decode::flag(list, "recognize_number")?,
        recognize_boolean: decode::flag(list, "recognize_boolean")?,
        recognize_null: decode::flag(list, "recognize_null")?,
        null_value: decode::string(list, "null_value")?,
        namespace_separator: decode::string(list, "namespace_separator")?,
        text_node_name: decode::string(list, "text_node_name")?,
        attribute_prefix: decode::string(list, "attribute_prefix")?,
        treat_as_array,
    })
}

fn decode_paths(items: &ObjectList) -> Result<Vec<ArrayPath>, DecodeError> {
    let mut paths = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "path")?;
        paths.push(ArrayPath {
            unwrap: decode::flag(list, "unwrap")?,
            value: decode::string_or_default(list, "value")?,
        });
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::parse;

    #[test]
    fn test_treat_as_array_paths() {
        let doc = parse(
            r#"
            policy "xml_to_json" "x2j" {
              source          = "response"
              output_variable = "response"
              options {
                recognize_number = true
                null_value       = "NULL"
                treat_as_array {
                  path { value = "forecast/days/day" }
                  path {
                    unwrap = true
                    value  = "forecast/days"
                  }
                }
              }
            }
            "#,
        )
        .unwrap();

        let Policy::XmlToJson(x2j) = decode(&doc.filter("policy").items[0]).unwrap() else {
            panic!("expected xml to json");
        };
        assert_eq!(x2j.source.as_deref(), Some("response"));
        let options = x2j.options.unwrap();
        assert!(options.recognize_number);
        assert!(!options.recognize_boolean);
        assert_eq!(options.null_value.as_deref(), Some("NULL"));
        assert_eq!(options.treat_as_array.len(), 2);
        assert!(!options.treat_as_array[0].unwrap);
        assert!(options.treat_as_array[1].unwrap);
        assert_eq!(options.treat_as_array[1].value, "forecast/days");
    }
}

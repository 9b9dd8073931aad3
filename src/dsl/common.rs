//! Small value types shared by policies and endpoints.

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorKind};
use crate::hcl::{ObjectList, Value};

/// One entry of a `properties { ... }` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// An element that is either a literal or a flow variable reference,
/// e.g. `rate { ref = "request.header.rate" value = "30ps" }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RefValue {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// An element that only names a flow variable, e.g. `identifier { ref = "client_id" }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Ref {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Decode the `properties` block of `list`, if any. Only the first block is
/// used. Each entry must be a scalar.
pub fn decode_properties(list: &ObjectList) -> Result<Vec<Property>, DecodeError> {
    let blocks = list.filter("properties");
    let Some(first) = blocks.items.first() else {
        return Ok(Vec::new());
    };
    let body = decode::object(first, "properties")?;

    let mut result = Vec::with_capacity(body.len());
    for entry in body {
        let Some(name) = entry.label(0) else {
            return Err(DecodeError::at(entry.pos(), ErrorKind::MissingLabel("property")));
        };
        let value = match &entry.value {
            Value::Literal { literal, .. } => literal.to_string(),
            other => {
                return Err(DecodeError::at(
                    other.pos(),
                    ErrorKind::AttributeType {
                        key: name.to_string(),
                        expected: "a scalar",
                        found: other.type_name(),
                    },
                ))
            }
        };
        result.push(Property {
            name: name.to_string(),
            value,
        });
    }
    Ok(result)
}

pub fn decode_ref_value(
    list: &ObjectList,
    key: &str,
    what: &'static str,
) -> Result<Option<RefValue>, DecodeError> {
    let Some(body) = decode::block(list, key, what)? else {
        return Ok(None);
    };
    Ok(Some(RefValue {
        reference: decode::string(body, "ref")?,
        value: decode::string(body, "value")?,
    }))
}

pub fn decode_ref(
    list: &ObjectList,
    key: &str,
    what: &'static str,
) -> Result<Option<Ref>, DecodeError> {
    let Some(body) = decode::block(list, key, what)? else {
        return Ok(None);
    };
    Ok(Some(Ref {
        reference: decode::string(body, "ref")?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::parse;

    #[test]
    fn test_properties_keep_order() {
        let doc = parse(
            r#"
            properties {
              zeta  = "last"
              alpha = 1
            }
            "#,
        )
        .unwrap();

        let props = decode_properties(&doc).unwrap();
        assert_eq!(
            props,
            vec![
                Property { name: "zeta".into(), value: "last".into() },
                Property { name: "alpha".into(), value: "1".into() },
            ]
        );
    }

    #[test]
    fn test_ref_value() {
        let doc = parse("rate { ref = \"flow.rate\" }\nidentifier = 3\n").unwrap();

        let rate = decode_ref_value(&doc, "rate", "rate").unwrap().unwrap();
        assert_eq!(rate.reference.as_deref(), Some("flow.rate"));
        assert_eq!(rate.value, None);

        assert!(decode_ref(&doc, "missing", "missing").unwrap().is_none());
        assert!(decode_ref(&doc, "identifier", "identifier").is_err());
    }
}

//! Field extraction from an object's direct attributes.
//!
//! Each helper looks an attribute up by name and converts it to the field's
//! type. Absent attributes yield `None` (or an empty/default value); present
//! attributes of the wrong shape fail with [`ErrorKind::AttributeType`].
//! Scalars convert the way the document format allows: any scalar can become
//! a string, and `"true"` / `"42"` strings can become bools / integers.

use crate::dsl::error::{DecodeError, ErrorKind};
use crate::hcl::{Item, Literal, ObjectList, Value};

fn type_error(key: &str, expected: &'static str, value: &Value) -> DecodeError {
    DecodeError::at(
        value.pos(),
        ErrorKind::AttributeType {
            key: key.to_string(),
            expected,
            found: value.type_name(),
        },
    )
}

/// The object body of `item`, or a `NotAnObject` error naming `what`.
pub fn object<'a>(item: &'a Item, what: &'static str) -> Result<&'a ObjectList, DecodeError> {
    item.as_object()
        .ok_or_else(|| DecodeError::at(item.pos(), ErrorKind::NotAnObject(what)))
}

pub fn string(list: &ObjectList, key: &str) -> Result<Option<String>, DecodeError> {
    let Some(value) = list.attribute(key) else {
        return Ok(None);
    };
    match value.as_literal() {
        Some(literal) => Ok(Some(literal.to_string())),
        None => Err(type_error(key, "a string", value)),
    }
}

/// Like [`string`], but an absent attribute is the empty string.
pub fn string_or_default(list: &ObjectList, key: &str) -> Result<String, DecodeError> {
    Ok(string(list, key)?.unwrap_or_default())
}

pub fn boolean(list: &ObjectList, key: &str) -> Result<Option<bool>, DecodeError> {
    let Some(value) = list.attribute(key) else {
        return Ok(None);
    };
    match value.as_literal() {
        Some(Literal::Bool(b)) => Ok(Some(*b)),
        Some(Literal::String(s)) => match s.as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" | "" => Ok(Some(false)),
            _ => Err(type_error(key, "a bool", value)),
        },
        _ => Err(type_error(key, "a bool", value)),
    }
}

/// Like [`boolean`], but an absent attribute is `false`.
pub fn flag(list: &ObjectList, key: &str) -> Result<bool, DecodeError> {
    Ok(boolean(list, key)?.unwrap_or(false))
}

pub fn integer(list: &ObjectList, key: &str) -> Result<Option<i64>, DecodeError> {
    let Some(value) = list.attribute(key) else {
        return Ok(None);
    };
    match value.as_literal() {
        Some(Literal::Int(i)) => Ok(Some(*i)),
        Some(Literal::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| type_error(key, "an integer", value)),
        _ => Err(type_error(key, "an integer", value)),
    }
}

/// A non-negative integer.
pub fn unsigned(list: &ObjectList, key: &str) -> Result<Option<u64>, DecodeError> {
    let Some(value) = list.attribute(key) else {
        return Ok(None);
    };
    match integer(list, key)? {
        None => Ok(None),
        Some(i) => u64::try_from(i)
            .map(Some)
            .map_err(|_| type_error(key, "a non-negative integer", value)),
    }
}

/// A list of strings. A single scalar is accepted as a one-element list.
pub fn strings(list: &ObjectList, key: &str) -> Result<Vec<String>, DecodeError> {
    match list.attribute(key) {
        None => Ok(Vec::new()),
        Some(Value::Literal { literal, .. }) => Ok(vec![literal.to_string()]),
        Some(Value::List { values, .. }) => values
            .iter()
            .map(|v| match v.as_literal() {
                Some(literal) => Ok(literal.to_string()),
                None => Err(type_error(key, "a list of strings", v)),
            })
            .collect(),
        Some(other) => Err(type_error(key, "a list of strings", other)),
    }
}

/// A singleton nested block such as `source { ... }`.
pub fn block<'a>(
    list: &'a ObjectList,
    key: &str,
    what: &'static str,
) -> Result<Option<&'a ObjectList>, DecodeError> {
    match list.attribute(key) {
        None => Ok(None),
        Some(Value::Object { list, .. }) => Ok(Some(list)),
        Some(other) => Err(DecodeError::at(other.pos(), ErrorKind::NotAnObject(what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::parse;

    #[test]
    fn test_scalars() {
        let doc = parse(
            r#"
            name    = "n"
            count   = 12
            numeric = "7"
            on      = true
            off     = "false"
            "#,
        )
        .unwrap();

        assert_eq!(string(&doc, "name").unwrap(), Some("n".to_string()));
        assert_eq!(string(&doc, "count").unwrap(), Some("12".to_string()));
        assert_eq!(string(&doc, "missing").unwrap(), None);
        assert_eq!(integer(&doc, "count").unwrap(), Some(12));
        assert_eq!(unsigned(&doc, "numeric").unwrap(), Some(7));
        assert_eq!(boolean(&doc, "on").unwrap(), Some(true));
        assert!(!flag(&doc, "off").unwrap());
        assert!(!flag(&doc, "missing").unwrap());
    }

    #[test]
    fn test_wrong_shapes() {
        let doc = parse("count = \"many\"\nblock {}\nneg = -1\n").unwrap();

        let err = integer(&doc, "count").unwrap_err();
        assert_eq!(
            err.errors()[0].kind,
            ErrorKind::AttributeType {
                key: "count".into(),
                expected: "an integer",
                found: "string",
            }
        );
        assert!(string(&doc, "block").is_err());
        assert!(unsigned(&doc, "neg").is_err());
    }

    #[test]
    fn test_strings_and_blocks() {
        let doc = parse(
            r#"
            urls   = ["a", "b"]
            single = "c"
            source { value = "request" }
            scalar = 1
            "#,
        )
        .unwrap();

        assert_eq!(strings(&doc, "urls").unwrap(), vec!["a", "b"]);
        assert_eq!(strings(&doc, "single").unwrap(), vec!["c"]);
        assert!(strings(&doc, "missing").unwrap().is_empty());

        let source = block(&doc, "source", "source").unwrap().unwrap();
        assert_eq!(string(&source, "value").unwrap().as_deref(), Some("request"));

        let err = block(&doc, "scalar", "scalar").unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::NotAnObject("scalar"));
    }
}

//! Message manipulation blocks shared by `assign_message`, `raise_fault`
//! (`fault_response`) and `service_callout` (`request`).
//!
//! ```text
//! add    { header "X-A" { value = "1" }  query_param "q" { value = "v" } }
//! copy   { source = "request"  header "X-B" {}  payload = true  verb = true }
//! remove { header "X-C" {}  payload = true }
//! set    { payload { content_type = "application/json"  value = "{}" }  status_code = 200 }
//! assign_variable "target" { ref = "source.var"  value = "fallback" }
//! ```

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorCollector, ErrorKind};
use crate::hcl::{ObjectList, Value};

/// The message operations of one block body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MessageOps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<MessageChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<MessageChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<MessageChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<MessageChange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assign_variables: Vec<AssignVariable>,
}

/// The body of an `add`, `copy`, `remove` or `set` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MessageChange {
    /// Message to copy from (`copy` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<NamedValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<NamedValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form_params: Vec<NamedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_phrase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A labeled header or parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// `payload = true` in `copy` / `remove`, or a payload body in `set` / `add`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Flag(bool),
    Content(PayloadContent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_suffix: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignVariable {
    pub name: String,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Decode the `add` / `copy` / `remove` / `set` / `assign_variable` children
/// of `list`. Unlabeled headers, params and variables go to `errors`.
pub fn decode_message_ops(
    list: &ObjectList,
    errors: &mut ErrorCollector,
) -> Result<MessageOps, DecodeError> {
    Ok(MessageOps {
        add: decode_change(list, "add", errors)?,
        copy: decode_change(list, "copy", errors)?,
        remove: decode_change(list, "remove", errors)?,
        set: decode_change(list, "set", errors)?,
        assign_variables: decode_assign_variables(&list.filter("assign_variable"), errors)?,
    })
}

fn decode_change(
    list: &ObjectList,
    key: &'static str,
    errors: &mut ErrorCollector,
) -> Result<Option<MessageChange>, DecodeError> {
    let Some(body) = decode::block(list, key, key)? else {
        return Ok(None);
    };

    Ok(Some(MessageChange {
        source: decode::string(body, "source")?,
        headers: decode_named_values(&body.filter("header"), "header", errors)?,
        query_params: decode_named_values(&body.filter("query_param"), "query_param", errors)?,
        form_params: decode_named_values(&body.filter("form_param"), "form_param", errors)?,
        payload: decode_payload(body)?,
        verb: decode::string(body, "verb")?,
        path: decode::string(body, "path")?,
        status_code: decode::string(body, "status_code")?,
        reason_phrase: decode::string(body, "reason_phrase")?,
        version: decode::string(body, "version")?,
    }))
}

fn decode_named_values(
    items: &ObjectList,
    what: &'static str,
    errors: &mut ErrorCollector,
) -> Result<Vec<NamedValue>, DecodeError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, what)?;
        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingLabel(what)));
            continue;
        };
        result.push(NamedValue {
            name: name.to_string(),
            value: decode::string(list, "value")?,
        });
    }
    Ok(result)
}

fn decode_payload(list: &ObjectList) -> Result<Option<Payload>, DecodeError> {
    match list.attribute("payload") {
        None => Ok(None),
        Some(Value::Object { list: body, .. }) => Ok(Some(Payload::Content(PayloadContent {
            content_type: decode::string(body, "content_type")?,
            variable_prefix: decode::string(body, "variable_prefix")?,
            variable_suffix: decode::string(body, "variable_suffix")?,
            value: decode::string_or_default(body, "value")?,
        }))),
        Some(_) => Ok(decode::boolean(list, "payload")?.map(Payload::Flag)),
    }
}

fn decode_assign_variables(
    items: &ObjectList,
    errors: &mut ErrorCollector,
) -> Result<Vec<AssignVariable>, DecodeError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "assign_variable")?;
        let Some(name) = item.label(0) else {
            errors.push(DecodeError::at(
                item.pos(),
                ErrorKind::MissingLabel("assign_variable"),
            ));
            continue;
        };
        result.push(AssignVariable {
            name: name.to_string(),
            reference: decode::string(list, "ref")?,
            value: decode::string(list, "value")?,
            template: decode::string(list, "template")?,
        });
    }
    Ok(result)
}

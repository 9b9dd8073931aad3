//! `<AssignMessage/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/assign-message-policy

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorCollector};
use crate::dsl::policies::message::{decode_message_ops, MessageOps};
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::Item;

pub const KIND: &str = "assign_message";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignMessage {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_to: Option<AssignTo>,
    pub ignore_unresolved_variables: bool,
    #[serde(flatten)]
    pub ops: MessageOps,
}

/// Target message; `create_new` builds a fresh message instead of
/// modifying the flow's own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignTo {
    pub create_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "assign_message policy")?;
    let mut errors = ErrorCollector::new();

    let assign_to = match decode::block(list, "assign_to", "assign_to")? {
        Some(body) => Some(AssignTo {
            create_new: decode::flag(body, "create_new")?,
            transport: decode::string(body, "transport")?,
            message_type: decode::string(body, "type")?,
            value: decode::string(body, "value")?,
        }),
        None => None,
    };
    let ops = decode_message_ops(list, &mut errors)?;

    errors.finish(Policy::AssignMessage(AssignMessage {
        base,
        display_name: decode::string(list, "display_name")?,
        assign_to,
        ignore_unresolved_variables: decode::flag(list, "ignore_unresolved_variables")?,
        ops,
    }))
}

//! `<RaiseFault/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/raise-fault-policy

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorCollector};
use crate::dsl::policies::message::{decode_message_ops, MessageOps};
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::Item;

pub const KIND: &str = "raise_fault";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaiseFault {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_response: Option<MessageOps>,
    pub ignore_unresolved_variables: bool,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "raise_fault policy")?;
    let mut errors = ErrorCollector::new();

    let fault_response = match decode::block(list, "fault_response", "fault_response")? {
        Some(body) => Some(decode_message_ops(body, &mut errors)?),
        None => None,
    };

    errors.finish(Policy::RaiseFault(RaiseFault {
        base,
        display_name: decode::string(list, "display_name")?,
        fault_response,
        ignore_unresolved_variables: decode::flag(list, "ignore_unresolved_variables")?,
    }))
}

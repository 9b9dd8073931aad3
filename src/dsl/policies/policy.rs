//! Fields shared by every policy kind.

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::{DecodeError, ErrorKind};
use crate::hcl::Item;

/// The common attributes of a `<Policy/>` element. Each policy type embeds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyBase {
    pub name: String,
    pub enabled: bool,
    pub continue_on_error: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
}

/// Decode the common attributes of a policy item labeled `[type, name]`.
///
/// `enabled` defaults to true only when the attribute is absent; an explicit
/// `enabled = false` is kept.
pub fn decode_policy_base(item: &Item) -> Result<PolicyBase, DecodeError> {
    let list = decode::object(item, "policy")?;

    let Some(name) = item.label(1) else {
        return Err(DecodeError::at(item.pos(), ErrorKind::MissingTypeAndName));
    };

    let enabled = if list.contains("enabled") {
        decode::flag(list, "enabled")?
    } else {
        true
    };

    Ok(PolicyBase {
        name: name.to_string(),
        enabled,
        continue_on_error: decode::flag(list, "continue_on_error")?,
        is_async: decode::flag(list, "async")?,
    })
}

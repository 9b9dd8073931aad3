//! `<Script/>` (Python script) policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/python-script-policy

use serde::Serialize;

use crate::dsl::decode;
use crate::dsl::error::DecodeError;
use crate::dsl::policies::{decode_policy_base, HasResource, Policy, PolicyBase};
use crate::hcl::Item;

pub const KIND: &str = "script";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Script {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub resource_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_urls: Vec<String>,
    /// Inline body; bundled as a resource rather than serialized.
    #[serde(skip)]
    pub content: String,
}

impl HasResource for Script {
    fn resource_url(&self) -> &str {
        &self.resource_url
    }

    fn resource_content(&self) -> &str {
        &self.content
    }
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "script policy")?;

    Ok(Policy::Script(Script {
        base,
        display_name: decode::string(list, "display_name")?,
        resource_url: decode::string_or_default(list, "resource_url")?,
        include_urls: decode::strings(list, "include_url")?,
        content: decode::string_or_default(list, "content")?,
    }))
}

//! `<Javascript/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/javascript-policy

use serde::Serialize;

use crate::dsl::common::{decode_properties, Property};
use crate::dsl::decode;
use crate::dsl::error::DecodeError;
use crate::dsl::policies::{decode_policy_base, HasResource, Policy, PolicyBase};
use crate::hcl::Item;

pub const KIND: &str = "javascript";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JavaScript {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub resource_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_urls: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(skip)]
    pub content: String,
}

impl HasResource for JavaScript {
    fn resource_url(&self) -> &str {
        &self.resource_url
    }

    fn resource_content(&self) -> &str {
        &self.content
    }
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "javascript policy")?;

    Ok(Policy::JavaScript(JavaScript {
        base,
        time_limit: decode::unsigned(list, "time_limit")?,
        display_name: decode::string(list, "display_name")?,
        resource_url: decode::string_or_default(list, "resource_url")?,
        include_urls: decode::strings(list, "include_url")?,
        properties: decode_properties(list)?,
        content: decode::string_or_default(list, "content")?,
    }))
}

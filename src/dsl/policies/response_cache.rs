//! `<ResponseCache/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/response-cache-policy

use serde::Serialize;

use crate::dsl::common::{decode_ref_value, RefValue};
use crate::dsl::decode;
use crate::dsl::error::DecodeError;
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::{Item, ObjectList};

pub const KIND: &str = "response_cache";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseCache {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<CacheKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_settings: Option<ExpirySettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cache_lookup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cache_population: Option<String>,
    pub exclude_error_response: bool,
    pub use_accept_header: bool,
    pub use_response_cache_headers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub key_fragments: Vec<KeyFragment>,
}

/// Either a literal fragment or a flow variable reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFragment {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpirySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_in_sec: Option<RefValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<RefValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<RefValue>,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "response_cache policy")?;

    let cache_key = match decode::block(list, "cache_key", "cache_key")? {
        Some(body) => Some(CacheKey {
            prefix: decode::string(body, "prefix")?,
            key_fragments: decode_key_fragments(&body.filter("key_fragment"))?,
        }),
        None => None,
    };

    let expiry_settings = match decode::block(list, "expiry_settings", "expiry_settings")? {
        Some(body) => Some(ExpirySettings {
            timeout_in_sec: decode_ref_value(body, "timeout_in_sec", "timeout_in_sec")?,
            time_of_day: decode_ref_value(body, "time_of_day", "time_of_day")?,
            expiry_date: decode_ref_value(body, "expiry_date", "expiry_date")?,
        }),
        None => None,
    };

    Ok(Policy::ResponseCache(ResponseCache {
        base,
        display_name: decode::string(list, "display_name")?,
        cache_resource: decode::string(list, "cache_resource")?,
        cache_key,
        scope: decode::string(list, "scope")?,
        expiry_settings,
        skip_cache_lookup: decode::string(list, "skip_cache_lookup")?,
        skip_cache_population: decode::string(list, "skip_cache_population")?,
        exclude_error_response: decode::flag(list, "exclude_error_response")?,
        use_accept_header: decode::flag(list, "use_accept_header")?,
        use_response_cache_headers: decode::flag(list, "use_response_cache_headers")?,
    }))
}

fn decode_key_fragments(items: &ObjectList) -> Result<Vec<KeyFragment>, DecodeError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "key_fragment")?;
        result.push(KeyFragment {
            reference: decode::string(list, "ref")?,
            value: decode::string(list, "value")?,
        });
    }
    Ok(result)
}

//! `<Quota/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/quota-policy
//!
//! Allow counts nest three levels deep: `allow` → `class` → class allow.
//! The innermost level may be written `allow` (as in the bundle format) or
//! `class_allow`; both keep their relative document order.

use serde::Serialize;

use crate::dsl::common::{decode_ref, decode_ref_value, Ref, RefValue};
use crate::dsl::decode;
use crate::dsl::error::DecodeError;
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::{Item, ObjectList};

pub const KIND: &str = "quota";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quota {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub allows: Vec<Allow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<RefValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<RefValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    pub distributed: bool,
    pub synchronous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asynchronous_configuration: Option<AsyncConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_weight: Option<Ref>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_ref: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<Class>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub allows: Vec<ClassAllow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassAllow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsyncConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_interval_in_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_message_count: Option<u64>,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "quota policy")?;

    let asynchronous_configuration =
        match decode::block(list, "asynchronous_configuration", "asynchronous_configuration")? {
            Some(body) => Some(AsyncConfig {
                sync_interval_in_seconds: decode::unsigned(body, "sync_interval_in_seconds")?,
                sync_message_count: decode::unsigned(body, "sync_message_count")?,
            }),
            None => None,
        };

    Ok(Policy::Quota(Quota {
        base,
        quota_type: decode::string(list, "type")?,
        display_name: decode::string(list, "display_name")?,
        allows: decode_allows(&list.filter("allow"))?,
        interval: decode_ref_value(list, "interval", "interval")?,
        time_unit: decode_ref_value(list, "time_unit", "time_unit")?,
        start_time: decode::string(list, "start_time")?,
        distributed: decode::flag(list, "distributed")?,
        synchronous: decode::flag(list, "synchronous")?,
        asynchronous_configuration,
        identifier: decode_ref(list, "identifier", "identifier")?,
        message_weight: decode_ref(list, "message_weight", "message_weight")?,
    }))
}

fn decode_allows(items: &ObjectList) -> Result<Vec<Allow>, DecodeError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "allow")?;
        result.push(Allow {
            count: decode::unsigned(list, "count")?,
            count_ref: decode::string(list, "count_ref")?,
            classes: decode_classes(&list.filter("class"))?,
        });
    }
    Ok(result)
}

fn decode_classes(items: &ObjectList) -> Result<Vec<Class>, DecodeError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "class")?;
        result.push(Class {
            reference: decode::string(list, "ref")?,
            allows: decode_class_allows(&list.filter_any(&["allow", "class_allow"]))?,
        });
    }
    Ok(result)
}

fn decode_class_allows(items: &ObjectList) -> Result<Vec<ClassAllow>, DecodeError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let list = decode::object(item, "class allow")?;
        result.push(ClassAllow {
            class: decode::string(list, "class")?,
            count: decode::unsigned(list, "count")?,
        });
    }
    Ok(result)
}

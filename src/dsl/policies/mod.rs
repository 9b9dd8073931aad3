//! Policy decoders.
//!
//! # Responsibilities
//! - One module per policy kind, each exposing `KIND` and `decode`
//! - `Policy` is the closed set of kinds, tagged by the type string
//! - `HasResource` marks kinds that carry an inline resource body
//!
//! # Design Decisions
//! - Decoders are pure functions from an item labeled `[type, name]`
//! - Structural failures return at once; label and value failures are
//!   collected per list so one pass reports all of them

pub mod assign_message;
pub mod extract_variables;
pub mod javascript;
pub mod message;
pub mod policy;
pub mod quota;
pub mod raise_fault;
pub mod response_cache;
pub mod script;
pub mod service_callout;
pub mod spike_arrest;
pub mod statistics_collector;
pub mod verify_api_key;
pub mod xml_to_json;

use serde::Serialize;

pub use assign_message::AssignMessage;
pub use extract_variables::ExtractVariables;
pub use javascript::JavaScript;
pub use policy::{decode_policy_base, PolicyBase};
pub use quota::Quota;
pub use raise_fault::RaiseFault;
pub use response_cache::ResponseCache;
pub use script::Script;
pub use service_callout::ServiceCallout;
pub use spike_arrest::SpikeArrest;
pub use statistics_collector::StatisticsCollector;
pub use verify_api_key::VerifyApiKey;
pub use xml_to_json::XmlToJson;

/// A resource body embedded in a policy, to be bundled under `url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource<'a> {
    pub url: &'a str,
    pub content: &'a str,
}

/// Implemented by policies that can carry an inline resource.
pub trait HasResource {
    fn resource_url(&self) -> &str;
    fn resource_content(&self) -> &str;

    /// The resource, when both URL and content are non-empty.
    fn resource(&self) -> Option<Resource<'_>> {
        let url = self.resource_url();
        let content = self.resource_content();
        if url.is_empty() || content.is_empty() {
            None
        } else {
            Some(Resource { url, content })
        }
    }
}

/// A decoded policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Policy {
    #[serde(rename = "assign_message")]
    AssignMessage(AssignMessage),
    #[serde(rename = "extract_variables")]
    ExtractVariables(ExtractVariables),
    #[serde(rename = "javascript")]
    JavaScript(JavaScript),
    #[serde(rename = "quota")]
    Quota(Quota),
    #[serde(rename = "raise_fault")]
    RaiseFault(RaiseFault),
    #[serde(rename = "response_cache")]
    ResponseCache(ResponseCache),
    #[serde(rename = "script")]
    Script(Script),
    #[serde(rename = "service_callout")]
    ServiceCallout(ServiceCallout),
    #[serde(rename = "spike_arrest")]
    SpikeArrest(SpikeArrest),
    #[serde(rename = "statistics_collector")]
    StatisticsCollector(StatisticsCollector),
    #[serde(rename = "verify_api_key")]
    VerifyApiKey(VerifyApiKey),
    #[serde(rename = "xml_to_json")]
    XmlToJson(XmlToJson),
}

impl Policy {
    /// The type string the policy was declared with.
    pub fn kind(&self) -> &'static str {
        match self {
            Policy::AssignMessage(_) => assign_message::KIND,
            Policy::ExtractVariables(_) => extract_variables::KIND,
            Policy::JavaScript(_) => javascript::KIND,
            Policy::Quota(_) => quota::KIND,
            Policy::RaiseFault(_) => raise_fault::KIND,
            Policy::ResponseCache(_) => response_cache::KIND,
            Policy::Script(_) => script::KIND,
            Policy::ServiceCallout(_) => service_callout::KIND,
            Policy::SpikeArrest(_) => spike_arrest::KIND,
            Policy::StatisticsCollector(_) => statistics_collector::KIND,
            Policy::VerifyApiKey(_) => verify_api_key::KIND,
            Policy::XmlToJson(_) => xml_to_json::KIND,
        }
    }

    pub fn base(&self) -> &PolicyBase {
        match self {
            Policy::AssignMessage(p) => &p.base,
            Policy::ExtractVariables(p) => &p.base,
            Policy::JavaScript(p) => &p.base,
            Policy::Quota(p) => &p.base,
            Policy::RaiseFault(p) => &p.base,
            Policy::ResponseCache(p) => &p.base,
            Policy::Script(p) => &p.base,
            Policy::ServiceCallout(p) => &p.base,
            Policy::SpikeArrest(p) => &p.base,
            Policy::StatisticsCollector(p) => &p.base,
            Policy::VerifyApiKey(p) => &p.base,
            Policy::XmlToJson(p) => &p.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    /// The inline resource carried by this policy, if any.
    pub fn resource(&self) -> Option<Resource<'_>> {
        match self {
            Policy::Script(p) => p.resource(),
            Policy::JavaScript(p) => p.resource(),
            _ => None,
        }
    }
}

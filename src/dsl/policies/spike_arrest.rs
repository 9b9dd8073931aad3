//! `<SpikeArrest/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/spike-arrest-policy

use serde::Serialize;

use crate::dsl::common::{decode_ref, decode_ref_value, Ref, RefValue};
use crate::dsl::decode;
use crate::dsl::error::DecodeError;
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::Item;

pub const KIND: &str = "spike_arrest";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpikeArrest {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_weight: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<RefValue>,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "spike_arrest policy")?;

    Ok(Policy::SpikeArrest(SpikeArrest {
        base,
        display_name: decode::string(list, "display_name")?,
        identifier: decode_ref(list, "identifier", "identifier")?,
        message_weight: decode_ref(list, "message_weight", "message_weight")?,
        rate: decode_ref_value(list, "rate", "rate")?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::parse;

    #[test]
    fn test_spike_arrest() {
        let doc = parse(
            r#"
            policy "spike_arrest" "sa" {
              identifier { ref = "client_id" }
              rate { value = "30ps" }
            }
            "#,
        )
        .unwrap();

        let Policy::SpikeArrest(sa) = decode(&doc.filter("policy").items[0]).unwrap() else {
            panic!("expected spike arrest");
        };
        assert_eq!(sa.identifier.unwrap().reference.as_deref(), Some("client_id"));
        assert_eq!(sa.rate.unwrap().value.as_deref(), Some("30ps"));
        assert!(sa.message_weight.is_none());
    }

    #[test]
    fn test_rate_must_be_object() {
        let doc = parse("policy \"spike_arrest\" \"sa\" { rate = \"30ps\" }").unwrap();
        assert!(decode(&doc.filter("policy").items[0]).is_err());
    }
}

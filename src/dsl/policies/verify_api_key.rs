//! `<VerifyAPIKey/>` policy.
//!
//! Documentation: http://docs.apigee.com/api-services/reference/verify-api-key-policy

use serde::Serialize;

use crate::dsl::common::{decode_ref_value, RefValue};
use crate::dsl::decode;
use crate::dsl::error::DecodeError;
use crate::dsl::policies::{decode_policy_base, Policy, PolicyBase};
use crate::hcl::Item;

pub const KIND: &str = "verify_api_key";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyApiKey {
    #[serde(flatten)]
    pub base: PolicyBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apikey: Option<RefValue>,
}

pub fn decode(item: &Item) -> Result<Policy, DecodeError> {
    let base = decode_policy_base(item)?;
    let list = decode::object(item, "verify_api_key policy")?;

    Ok(Policy::VerifyApiKey(VerifyApiKey {
        base,
        display_name: decode::string(list, "display_name")?,
        apikey: decode_ref_value(list, "apikey", "apikey")?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::error::ErrorKind;
    use crate::hcl::parse;

    fn decode_first(source: &str) -> Result<Policy, DecodeError> {
        let doc = parse(source).unwrap();
        decode(&doc.filter("policy").items[0])
    }

    #[test]
    fn test_apikey_reference() {
        let policy = decode_first(
            r#"
            policy "verify_api_key" "verify-api-key" {
              display_name = "Verify API Key"
              apikey { ref = "request.queryparam.apikey" }
            }
            "#,
        )
        .unwrap();

        let Policy::VerifyApiKey(vak) = policy else {
            panic!("expected verify api key");
        };
        assert_eq!(vak.base.name, "verify-api-key");
        assert_eq!(vak.display_name.as_deref(), Some("Verify API Key"));
        let apikey = vak.apikey.unwrap();
        assert_eq!(apikey.reference.as_deref(), Some("request.queryparam.apikey"));
        assert_eq!(apikey.value, None);
    }

    #[test]
    fn test_apikey_is_optional_but_must_be_a_block() {
        let Policy::VerifyApiKey(vak) =
            decode_first("policy \"verify_api_key\" \"v\" {}\n").unwrap()
        else {
            panic!("expected verify api key");
        };
        assert!(vak.apikey.is_none());

        let err = decode_first("policy \"verify_api_key\" \"v\" {\n  apikey = \"k\"\n}\n")
            .unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::NotAnObject("apikey"));
        assert_eq!(err.errors()[0].pos.line, 2);
    }
}

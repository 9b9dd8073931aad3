//! Document assembly.
//!
//! # Data Flow
//! ```text
//! ObjectList ──► proxy (first only) ──► proxy_endpoint* ──► target_endpoint* ──► policy*
//!                        │                      │                   │               │
//!                      fatal                  fatal               fatal        collected
//! ```
//!
//! Policy blocks are decoded through a [`PolicyRegistry`]. Every policy error
//! is collected so a single pass reports all of them; if any occurred the
//! partially built [`Config`] is dropped.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::dsl::endpoints::{
    decode_proxy_endpoints, decode_target_endpoints, ProxyEndpoint, TargetEndpoint,
};
use crate::dsl::error::{DecodeError, ErrorCollector, ErrorKind};
use crate::dsl::policies::Policy;
use crate::dsl::proxy::{decode_proxy, Proxy};
use crate::dsl::registry::PolicyRegistry;
use crate::hcl::{ObjectList, Pos};

/// Everything decoded from one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,
    pub proxy_endpoints: Vec<ProxyEndpoint>,
    pub target_endpoints: Vec<TargetEndpoint>,
    pub policies: Vec<Policy>,
    /// Resource URL → inline content, lifted from script policies.
    pub resources: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_policies: Vec<SkippedPolicy>,
}

/// A policy block whose type has no registered decoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedPolicy {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub pos: Pos,
}

impl Config {
    /// The first policy named `name`, whatever its type.
    pub fn policy(&self, name: &str) -> Option<&Policy> {
        self.policies.iter().find(|p| p.name() == name)
    }
}

/// Decode a document with the built-in policy registry.
pub fn decode_config(root: &ObjectList) -> Result<Config, DecodeError> {
    decode_config_with(root, PolicyRegistry::builtin())
}

/// Decode a document, resolving policy types through `registry`.
pub fn decode_config_with(
    root: &ObjectList,
    registry: &PolicyRegistry,
) -> Result<Config, DecodeError> {
    let mut config = Config::default();

    let proxies = root.filter("proxy");
    if let Some(first) = proxies.items.first() {
        if proxies.len() > 1 {
            warn!(
                count = proxies.len(),
                "multiple proxy blocks; using the first"
            );
        }
        let proxy = decode_proxy(first)?;
        debug!(name = %proxy.name, "decoded proxy");
        config.proxy = Some(proxy);
    }

    config.proxy_endpoints = decode_proxy_endpoints(&root.filter("proxy_endpoint"))?;
    config.target_endpoints = decode_target_endpoints(&root.filter("target_endpoint"))?;

    let mut errors = ErrorCollector::new();
    for item in &root.filter("policy") {
        let (Some(kind), Some(name)) = (item.label(0), item.label(1)) else {
            errors.push(DecodeError::at(item.pos(), ErrorKind::MissingTypeAndName));
            continue;
        };

        let Some(decode) = registry.get(kind) else {
            warn!(kind, name, pos = %item.pos(), "skipping policy of unknown type");
            config.skipped_policies.push(SkippedPolicy {
                kind: kind.to_string(),
                name: name.to_string(),
                pos: item.pos(),
            });
            continue;
        };

        let policy = match decode(item) {
            Ok(policy) => policy,
            Err(err) => {
                debug!(kind, name, errors = err.len(), "policy failed to decode");
                errors.push(err);
                continue;
            }
        };

        if let Some(resource) = policy.resource() {
            config
                .resources
                .insert(resource.url.to_string(), resource.content.to_string());
        }
        debug!(kind, name, "decoded policy");
        config.policies.push(policy);
    }

    errors.finish(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::parse;

    fn decode_str(src: &str) -> Result<Config, DecodeError> {
        decode_config(&parse(src).unwrap())
    }

    #[test]
    fn test_empty_document() {
        let config = decode_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_policies_keep_document_order() {
        let config = decode_str(
            r#"
            policy "quota" "b" {}
            policy "spike_arrest" "a" {}
            policy "verify_api_key" "c" {}
            "#,
        )
        .unwrap();
        let names: Vec<_> = config.policies.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(config.policy("a").unwrap().kind(), "spike_arrest");
    }

    #[test]
    fn test_one_label_policy() {
        let err = decode_str("policy \"quota\" {\n}").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.errors()[0].kind, ErrorKind::MissingTypeAndName);
        assert_eq!(
            err.to_string(),
            "1 error occurred:\n\t* At 1:16: policy requires a type and name"
        );
    }

    #[test]
    fn test_custom_registry_skips_unregistered() {
        let mut registry = PolicyRegistry::new();
        registry.register(
            crate::dsl::policies::quota::KIND,
            crate::dsl::policies::quota::decode,
        );
        let config = decode_config_with(
            &parse("policy \"quota\" \"q\" {}\npolicy \"script\" \"s\" {}").unwrap(),
            &registry,
        )
        .unwrap();
        assert_eq!(config.policies.len(), 1);
        assert_eq!(config.skipped_policies[0].kind, "script");
        assert_eq!(config.skipped_policies[0].pos.line, 2);
    }
}

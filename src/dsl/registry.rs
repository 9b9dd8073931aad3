//! Policy type string → decoder lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::dsl::error::DecodeError;
use crate::dsl::policies::{
    assign_message, extract_variables, javascript, quota, raise_fault, response_cache, script,
    service_callout, spike_arrest, statistics_collector, verify_api_key, xml_to_json, Policy,
};
use crate::hcl::Item;

/// Decodes one policy item labeled `[type, name]`.
pub type DecodeFn = fn(&Item) -> Result<Policy, DecodeError>;

/// Maps a policy type string to its decoder. Read-only once built.
#[derive(Clone, Default)]
pub struct PolicyRegistry {
    decoders: BTreeMap<&'static str, DecodeFn>,
}

impl fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}

impl PolicyRegistry {
    /// An empty registry. Every policy type is skipped until registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in policy kind.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register(assign_message::KIND, assign_message::decode)
            .register(extract_variables::KIND, extract_variables::decode)
            .register(javascript::KIND, javascript::decode)
            .register(quota::KIND, quota::decode)
            .register(raise_fault::KIND, raise_fault::decode)
            .register(response_cache::KIND, response_cache::decode)
            .register(script::KIND, script::decode)
            .register(service_callout::KIND, service_callout::decode)
            .register(spike_arrest::KIND, spike_arrest::decode)
            .register(statistics_collector::KIND, statistics_collector::decode)
            .register(verify_api_key::KIND, verify_api_key::decode)
            .register(xml_to_json::KIND, xml_to_json::decode);
        registry
    }

    /// The process-wide standard registry.
    pub fn builtin() -> &'static PolicyRegistry {
        static BUILTIN: OnceLock<PolicyRegistry> = OnceLock::new();
        BUILTIN.get_or_init(PolicyRegistry::standard)
    }

    /// Add or replace the decoder for `kind`.
    pub fn register(&mut self, kind: &'static str, decode: DecodeFn) -> &mut Self {
        self.decoders.insert(kind, decode);
        self
    }

    pub fn get(&self, kind: &str) -> Option<DecodeFn> {
        self.decoders.get(kind).copied()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decoders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_kinds() {
        let registry = PolicyRegistry::builtin();
        assert_eq!(registry.len(), 12);
        let kinds: Vec<_> = registry.kinds().collect();
        assert_eq!(kinds.first(), Some(&"assign_message"));
        assert_eq!(kinds.last(), Some(&"xml_to_json"));
        assert!(registry.get("statistics_collector").is_some());
        assert!(registry.get("oauth_v2").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = PolicyRegistry::new();
        assert!(registry.is_empty());
        registry.register("quota", script::decode);
        registry.register("quota", quota::decode);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("quota").is_some());
    }
}

//! Operation → required role mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use roleproxy_core::{selector_of, RoleMask, Selector};

/// Required role per operation selector.
///
/// An operation with no entry is *unconfigured* and no caller may invoke it.
/// Storing `RoleMask::NONE` clears the entry, so "configured to zero" and
/// "never configured" cannot be told apart. Entries are otherwise only ever
/// overwritten.
///
/// The registry is plain data; who may change it is decided by the
/// [`AdapterInstance`](crate::AdapterInstance) that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationRegistry {
    requirements: BTreeMap<Selector, RoleMask>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role required for `selector`; returns the previous requirement.
    pub fn set_requirement(&mut self, selector: Selector, required: RoleMask) -> Option<RoleMask> {
        if required.is_empty() {
            self.requirements.remove(&selector)
        } else {
            self.requirements.insert(selector, required)
        }
    }

    /// Same as [`set_requirement`](Self::set_requirement) keyed by the selector
    /// of `signature`, e.g. `"transferOwnership(address)"`. Returns the
    /// selector the entry was stored under.
    pub fn set_requirement_by_signature(&mut self, signature: &str, required: RoleMask) -> Selector {
        let selector = selector_of(signature);
        self.set_requirement(selector, required);
        selector
    }

    /// Configured requirement, or `None` while unconfigured.
    pub fn requirement(&self, selector: Selector) -> Option<RoleMask> {
        self.requirements.get(&selector).copied()
    }

    /// Requirement as a plain mask; `RoleMask::NONE` while unconfigured.
    pub fn get_requirement(&self, selector: Selector) -> RoleMask {
        self.requirement(selector).unwrap_or(RoleMask::NONE)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Configured entries in selector order.
    pub fn iter(&self) -> impl Iterator<Item = (Selector, RoleMask)> + '_ {
        self.requirements.iter().map(|(s, r)| (*s, *r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roleproxy_core::FALLBACK_SELECTOR;

    #[test]
    fn unconfigured_reads_as_none() {
        let registry = OperationRegistry::new();
        let selector = selector_of("transferOwnership(address)");

        assert_eq!(registry.requirement(selector), None);
        assert_eq!(registry.get_requirement(selector), RoleMask::NONE);
    }

    #[test]
    fn signature_and_selector_share_an_entry() {
        let mut registry = OperationRegistry::new();

        let selector = registry.set_requirement_by_signature("1234", RoleMask::bit(16));

        assert_eq!(selector.to_string(), "0x387a8233");
        assert_eq!(registry.get_requirement(selector), RoleMask::bit(16));

        registry.set_requirement(selector, RoleMask::bit(3));
        assert_eq!(registry.get_requirement(selector_of("1234")), RoleMask::bit(3));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn storing_zero_returns_to_unconfigured() {
        let mut registry = OperationRegistry::new();
        registry.set_requirement(FALLBACK_SELECTOR, RoleMask::bit(0));

        let previous = registry.set_requirement(FALLBACK_SELECTOR, RoleMask::NONE);

        assert_eq!(previous, Some(RoleMask::bit(0)));
        assert_eq!(registry.requirement(FALLBACK_SELECTOR), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn serializes_as_selector_keyed_map() {
        let mut registry = OperationRegistry::new();
        registry.set_requirement_by_signature("owner()", RoleMask::bit(1));

        let json = serde_json::to_value(&registry).unwrap();

        assert_eq!(json["0x8da5cb5b"], "0x2");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use roleproxy_core::U256;

        proptest! {
            #[test]
            fn by_signature_reads_back_by_selector(
                signature in "[a-zA-Z_][a-zA-Z0-9_]{0,24}\\((address|uint256|bytes4)?\\)",
                limbs in any::<[u64; 4]>().prop_filter("non-zero", |l| l.iter().any(|w| *w != 0))
            ) {
                let required = RoleMask::new(U256::from_limbs(limbs));
                let mut registry = OperationRegistry::new();
                registry.set_requirement_by_signature(&signature, required);

                prop_assert_eq!(registry.get_requirement(selector_of(&signature)), required);
            }
        }
    }
}

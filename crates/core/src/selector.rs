//! Operation selectors and payload routing.

use alloy_primitives::{keccak256, Selector};

/// Reserved selector for an invocation that carries no data at all (a plain
/// value transfer).
pub const FALLBACK_SELECTOR: Selector = Selector::ZERO;

/// Selector of a human-readable signature: the first four bytes of its
/// Keccak-256 hash, e.g. `transferOwnership(address)` → `0xf2fde38b`.
///
/// Any string hashes; `"1234"` is as valid a key as a real signature.
pub fn selector_of(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    Selector::from_slice(&hash[..4])
}

/// Leading selector of a call payload.
///
/// Returns `None` when the payload is too short to carry one; an empty
/// payload is not special-cased here.
pub fn selector_from_payload(payload: &[u8]) -> Option<Selector> {
    payload.first_chunk::<4>().map(|head| Selector::new(*head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::{sol, SolCall, SolError};

    sol! {
        function transferOwnership(address newOwner) external;
    }

    #[test]
    fn matches_known_signatures() {
        assert_eq!(selector_of("transferOwnership(address)").to_string(), "0xf2fde38b");
        assert_eq!(selector_of("owner()").to_string(), "0x8da5cb5b");
        assert_eq!(selector_of("1234").to_string(), "0x387a8233");
    }

    #[test]
    fn agrees_with_generated_bindings() {
        assert_eq!(
            selector_of(transferOwnershipCall::SIGNATURE),
            Selector::from(transferOwnershipCall::SELECTOR)
        );
        assert_eq!(
            selector_of("Error(string)"),
            Selector::from(alloy_sol_types::Revert::SELECTOR)
        );
    }

    #[test]
    fn payload_needs_four_bytes() {
        assert_eq!(selector_from_payload(&[0x11, 0x22, 0x33]), None);
        assert_eq!(selector_from_payload(&[]), None);
        assert_eq!(
            selector_from_payload(&[0xf2, 0xfd, 0xe3, 0x8b, 0x00]),
            Some(Selector::new([0xf2, 0xfd, 0xe3, 0x8b]))
        );
    }

    #[test]
    fn selectors_serialize_as_hex_strings() {
        let selector = selector_of("owner()");
        let json = serde_json::to_string(&selector).unwrap();
        assert_eq!(json, "\"0x8da5cb5b\"");
        let back: Selector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selector);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The selector routed from a payload is the one hashed from the
            /// signature that built it, whatever follows the first four bytes.
            #[test]
            fn payload_routes_to_signature_selector(
                name in "[a-zA-Z_][a-zA-Z0-9_]{0,30}",
                arg in "(address|uint256|string|bytes)?",
                args in prop::collection::vec(any::<u8>(), 0..96)
            ) {
                let selector = selector_of(&format!("{name}({arg})"));
                let mut payload = selector.to_vec();
                payload.extend_from_slice(&args);

                prop_assert_eq!(selector_from_payload(&payload), Some(selector));
            }
        }
    }
}

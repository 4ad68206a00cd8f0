//! `roleproxy-core`: value primitives shared by every roleproxy crate.
//!
//! Addresses, selectors, hashing and ABI coding come from alloy. This crate
//! adds the role bitmask, raw revert data and selector routing on top.
//! No authorization policy, no IO.

pub mod error;
pub mod mask;
pub mod revert;
pub mod selector;

pub use alloy_primitives::{keccak256, Address, Bytes, Selector, U256};
pub use error::CoreError;
pub use mask::RoleMask;
pub use revert::Revert;
pub use selector::{selector_from_payload, selector_of, FALLBACK_SELECTOR};

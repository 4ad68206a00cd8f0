//! Reference components used to exercise adapters against an [`InMemoryHost`].
//!
//! [`InMemoryHost`]: crate::host::InMemoryHost

pub mod error_helper;
pub mod ownable;

pub use error_helper::{throwErrorCall, ErrorHelper};
pub use ownable::{owner_of, ownerCall, totalReceivedCall, transferOwnershipCall, LegacyOwnable};

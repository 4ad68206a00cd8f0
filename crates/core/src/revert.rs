//! Failure information relayed from a called component.

use alloy_primitives::Bytes;
use alloy_sol_types::{Revert as ErrorString, SolError};
use serde::{Deserialize, Serialize};

/// Raw revert data returned by a component that rejected a call.
///
/// The bytes are carried as-is; `Display` decodes them for humans but the data
/// itself is never rewritten, so callers further up see exactly what the
/// component produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Revert {
    data: Bytes,
}

impl Revert {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// A revert with no data (e.g. value sent to a component that does not
    /// accept it).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard `Error(string)` revert carrying `message`.
    pub fn with_message(message: impl Into<String>) -> Self {
        let error = ErrorString {
            reason: message.into(),
        };
        Self::new(error.abi_encode())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Message of an `Error(string)` revert, if the data is one.
    pub fn reason(&self) -> Option<String> {
        ErrorString::abi_decode(&self.data, true)
            .ok()
            .map(|error| error.reason)
    }
}

impl core::fmt::Display for Revert {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(reason) = self.reason() {
            return f.write_str(&reason);
        }
        if self.data.is_empty() {
            return f.write_str("execution failed");
        }
        write!(f, "custom error {}", self.data)
    }
}

impl std::error::Error for Revert {}

//! Permission bitmasks.

use core::ops::{BitAnd, BitOr, Not};

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Unsigned 256-bit permission bitmask; each bit is an independently grantable
/// capability.
///
/// `RoleMask::NONE` is not a valid requirement: it can never be satisfied.
///
/// Serializes as a `0x`-prefixed hex string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RoleMask(U256);

impl RoleMask {
    pub const NONE: RoleMask = RoleMask(U256::ZERO);
    pub const FULL: RoleMask = RoleMask(U256::MAX);

    pub const fn new(bits: U256) -> Self {
        Self(bits)
    }

    /// Mask with only bit `index` set; bit 255 is the most significant.
    pub const fn bit(index: u8) -> Self {
        let mut limbs = [0u64; 4];
        limbs[(index / 64) as usize] = 1u64 << (index % 64);
        Self(U256::from_limbs(limbs))
    }

    pub const fn bits(self) -> U256 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0.is_zero()
    }

    /// True when at least one bit is shared with `other`.
    pub fn intersects(self, other: RoleMask) -> bool {
        !(self.0 & other.0).is_zero()
    }

    /// True when every bit of `other` is also set here.
    pub fn contains(self, other: RoleMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl From<U256> for RoleMask {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u128> for RoleMask {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<RoleMask> for U256 {
    fn from(value: RoleMask) -> Self {
        value.0
    }
}

impl BitAnd for RoleMask {
    type Output = RoleMask;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for RoleMask {
    type Output = RoleMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl Not for RoleMask {
    type Output = RoleMask;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl core::fmt::Display for RoleMask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl core::str::FromStr for RoleMask {
    type Err = CoreError;

    /// Accepts `0x`-prefixed hex or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("0x") {
            Some(digits) => U256::from_str_radix(digits, 16),
            None => U256::from_str_radix(s, 10),
        };
        parsed
            .map(Self)
            .map_err(|e| CoreError::InvalidNumber(format!("RoleMask: {e}")))
    }
}

impl Serialize for RoleMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoleMask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

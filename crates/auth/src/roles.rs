//! Reserved role bits.
//!
//! Bits are allocated from the top of the 256-bit mask down so that low bits
//! stay free for operation-level roles configured per adapter. Bit 254 is left
//! unassigned.

use roleproxy_core::RoleMask;

/// May update other accounts' role assignments.
pub const ROLE_ACCESS_MANAGER: RoleMask = RoleMask::bit(255);

/// May update the operation → role registry of an adapter.
pub const ROLE_ACCESS_ROLES_MANAGER: RoleMask = RoleMask::bit(253);

/// Every bit, including both manager bits. Granted to the deployer.
pub const SUPER_ADMIN: RoleMask = RoleMask::FULL;

/// Complement of `role`: every bit except the ones in `role`.
pub fn not(role: RoleMask) -> RoleMask {
    !role
}

/// Human-readable name of a reserved bit, for audit output.
pub fn reserved_role_name(role: RoleMask) -> Option<&'static str> {
    if role == ROLE_ACCESS_MANAGER {
        Some("ROLE_ACCESS_MANAGER")
    } else if role == ROLE_ACCESS_ROLES_MANAGER {
        Some("ROLE_ACCESS_ROLES_MANAGER")
    } else {
        None
    }
}

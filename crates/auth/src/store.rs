//! Role storage: account → permission bitmask.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use roleproxy_core::{Address, RoleMask};

use crate::authorize::AuthzError;
use crate::roles::{ROLE_ACCESS_MANAGER, SUPER_ADMIN};

/// Read side of an RBAC engine: the one predicate the adapter consumes.
pub trait RoleStore {
    /// Bitmask currently assigned to `account` (`RoleMask::NONE` if unknown).
    fn role_of(&self, account: Address) -> RoleMask;

    /// True when `account` holds at least one bit of `required`.
    ///
    /// An empty requirement is never satisfied, whatever the account holds.
    fn has_role(&self, account: Address, required: RoleMask) -> bool {
        self.role_of(account).intersects(required)
    }
}

/// Write side of an RBAC engine that enforces its own assignment policy.
pub trait RoleAdmin: RoleStore {
    /// Assign `desired` to `operator` on behalf of `by`; returns the mask that
    /// was actually stored.
    fn update_role(
        &mut self,
        by: Address,
        operator: Address,
        desired: RoleMask,
    ) -> Result<RoleMask, AuthzError>;
}

/// Mask an operator ends up with when `manager` asks for `desired`.
///
/// A manager can only set or clear the bits it holds itself; every other bit
/// keeps the operator's current value. This blocks privilege escalation
/// without forcing managers to know the full assignment.
pub fn evaluate_by(manager: RoleMask, current: RoleMask, desired: RoleMask) -> RoleMask {
    let granted = manager & desired;
    let revoked = manager & !desired;
    (current | granted) & !revoked
}

/// Bitmask RBAC held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryRoleStore {
    roles: HashMap<Address, RoleMask>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `super_admin` holding every bit.
    pub fn with_super_admin(super_admin: Address) -> Self {
        let mut store = Self::new();
        store.grant(super_admin, SUPER_ADMIN);
        store
    }

    /// Overwrite an assignment without any policy check. Setup/test use only;
    /// runtime changes go through [`RoleAdmin::update_role`].
    pub fn grant(&mut self, account: Address, role: RoleMask) {
        if role.is_empty() {
            self.roles.remove(&account);
        } else {
            self.roles.insert(account, role);
        }
    }

    /// Drop every bit held by `account`. Setup/test use only.
    pub fn revoke(&mut self, account: Address) {
        self.roles.remove(&account);
    }

    /// Accounts holding a non-empty mask.
    pub fn accounts(&self) -> impl Iterator<Item = (Address, RoleMask)> + '_ {
        self.roles.iter().map(|(a, r)| (*a, *r))
    }
}

impl RoleStore for InMemoryRoleStore {
    fn role_of(&self, account: Address) -> RoleMask {
        self.roles.get(&account).copied().unwrap_or(RoleMask::NONE)
    }
}

impl RoleAdmin for InMemoryRoleStore {
    fn update_role(
        &mut self,
        by: Address,
        operator: Address,
        desired: RoleMask,
    ) -> Result<RoleMask, AuthzError> {
        crate::authorize(&*self, by, ROLE_ACCESS_MANAGER)?;

        let assigned = evaluate_by(self.role_of(by), self.role_of(operator), desired);
        self.grant(operator, assigned);

        tracing::info!(
            by = %by,
            operator = %operator,
            requested = %desired,
            assigned = %assigned,
            "role updated"
        );

        Ok(assigned)
    }
}

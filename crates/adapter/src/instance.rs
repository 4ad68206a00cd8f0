//! A deployed adapter: target binding, operation registry, role store and the
//! dispatcher that ties them together.
//!
//! ## Lifecycle
//!
//! `Constructed → Operational`. Construction validates the target once; the
//! target's owner then hands ownership to [`AdapterInstance::address`] outside
//! of this crate. Nothing here checks that the handover happened: until it
//! does, forwarded administrative calls simply fail at the target.

use std::sync::Arc;

use roleproxy_auth::{
    explain_authorization, InMemoryRoleStore, RoleAdmin, RoleStore, ROLE_ACCESS_ROLES_MANAGER,
};
use roleproxy_core::{selector_of, Address, RoleMask, Selector};
use roleproxy_events::EventLog;

use crate::dispatcher::Dispatcher;
use crate::error::{AdapterError, AdapterResult, NOT_A_CONTRACT, ZERO_ADDRESS};
use crate::events::{AdapterEvent, RequirementUpdated, RoleUpdated};
use crate::host::Host;
use crate::registry::OperationRegistry;

/// Reject null handles and addresses without code.
pub(crate) fn validate_target<H>(host: &H, target: Address) -> AdapterResult<()>
where
    H: Host + ?Sized,
{
    if target.is_zero() {
        return Err(AdapterError::InvalidTarget(ZERO_ADDRESS));
    }
    if !host.has_code(target) {
        return Err(AdapterError::InvalidTarget(NOT_A_CONTRACT));
    }
    Ok(())
}

#[derive(Debug)]
pub struct AdapterInstance<R = InMemoryRoleStore> {
    address: Address,
    target: Address,
    registry: OperationRegistry,
    roles: R,
    log: Arc<EventLog<AdapterEvent>>,
}

impl AdapterInstance<InMemoryRoleStore> {
    /// Adapter at `address` wrapping `target`, with `admin` as super admin of a
    /// fresh in-memory role store.
    pub fn new<H>(
        host: &H,
        address: Address,
        target: Address,
        admin: Address,
        log: Arc<EventLog<AdapterEvent>>,
    ) -> AdapterResult<Self>
    where
        H: Host + ?Sized,
    {
        Self::with_role_store(host, address, target, InMemoryRoleStore::with_super_admin(admin), log)
    }
}

impl<R: RoleStore> AdapterInstance<R> {
    /// Adapter backed by an injected role store.
    pub fn with_role_store<H>(
        host: &H,
        address: Address,
        target: Address,
        roles: R,
        log: Arc<EventLog<AdapterEvent>>,
    ) -> AdapterResult<Self>
    where
        H: Host + ?Sized,
    {
        validate_target(host, target)?;

        Ok(Self {
            address,
            target,
            registry: OperationRegistry::new(),
            roles,
            log,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn target(&self) -> Address {
        self.target
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn roles(&self) -> &R {
        &self.roles
    }

    pub fn log(&self) -> &Arc<EventLog<AdapterEvent>> {
        &self.log
    }

    /// Role required for `selector`; `RoleMask::NONE` while unconfigured.
    pub fn access_role(&self, selector: Selector) -> RoleMask {
        self.registry.get_requirement(selector)
    }

    fn dispatcher(&self) -> Dispatcher<'_, R> {
        Dispatcher::new(self.address, self.target, &self.registry, &self.roles, &self.log)
    }

    /// Route an incoming invocation to the target if `caller` is allowed to
    /// make it.
    pub fn dispatch<H>(
        &self,
        host: &mut H,
        caller: Address,
        payload: &[u8],
        value: u128,
    ) -> AdapterResult<Vec<u8>>
    where
        H: Host + ?Sized,
    {
        self.dispatcher().dispatch(host, caller, payload, value)
    }

    /// Explicit `execute(bytes)` entry point; identical to [`dispatch`](Self::dispatch).
    pub fn execute<H>(
        &self,
        host: &mut H,
        caller: Address,
        payload: &[u8],
        value: u128,
    ) -> AdapterResult<Vec<u8>>
    where
        H: Host + ?Sized,
    {
        self.dispatch(host, caller, payload, value)
    }

    /// Set the role required for `selector`. `by` must hold
    /// `ROLE_ACCESS_ROLES_MANAGER`; a denied update changes nothing.
    pub fn update_access_role(
        &mut self,
        by: Address,
        selector: Selector,
        required: RoleMask,
    ) -> AdapterResult<()> {
        let explanation = explain_authorization(&self.roles, by, ROLE_ACCESS_ROLES_MANAGER);
        if !explanation.granted {
            tracing::warn!(
                adapter = %self.address,
                by = %by,
                selector = %selector,
                held = %explanation.held,
                reason = %explanation.reason,
                "access role update rejected"
            );
            return Err(AdapterError::AccessDenied {
                account: by,
                required: ROLE_ACCESS_ROLES_MANAGER,
            });
        }

        let previous = self.registry.set_requirement(selector, required);

        tracing::info!(
            adapter = %self.address,
            by = %by,
            selector = %selector,
            required = %required,
            previous = %previous.unwrap_or(RoleMask::NONE),
            "access role updated"
        );

        self.log.append(
            self.address,
            AdapterEvent::RequirementUpdated(RequirementUpdated {
                by,
                selector,
                role: required,
            }),
        );
        Ok(())
    }

    /// [`update_access_role`](Self::update_access_role) keyed by a signature
    /// such as `"transferOwnership(address)"`.
    pub fn update_access_role_by_signature(
        &mut self,
        by: Address,
        signature: &str,
        required: RoleMask,
    ) -> AdapterResult<Selector> {
        let selector = selector_of(signature);
        self.update_access_role(by, selector, required)?;
        Ok(selector)
    }
}

impl<R: RoleAdmin> AdapterInstance<R> {
    /// Assign `role` to `operator` on behalf of `by`, as evaluated by the role
    /// store. Returns the mask actually stored.
    pub fn update_role(
        &mut self,
        by: Address,
        operator: Address,
        role: RoleMask,
    ) -> AdapterResult<RoleMask> {
        let assigned = self.roles.update_role(by, operator, role).inspect_err(|err| {
            tracing::warn!(adapter = %self.address, by = %by, operator = %operator, error = %err, "role update rejected");
        })?;

        self.log.append(
            self.address,
            AdapterEvent::RoleUpdated(RoleUpdated {
                by,
                operator,
                requested: role,
                assigned,
            }),
        );
        Ok(assigned)
    }
}

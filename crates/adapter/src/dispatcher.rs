//! Authorize-then-forward pipeline.
//!
//! ```text
//! payload
//!   ↓
//! 1. Route: leading selector; empty payload → fallback selector; 1–3 bytes → bad selector
//!   ↓
//! 2. Look up the requirement (unconfigured → reject, no bypass)
//!   ↓
//! 3. Check the caller's role (no shared bit → reject)
//!   ↓
//! 4. Forward payload + value to the target from the adapter's address
//!   ↓
//! 5. Relay the result and record ExecutionComplete, or relay the revert as-is
//! ```
//!
//! Steps 1–3 have no side effects. The dispatcher only holds shared borrows of
//! the registry and role store, so it cannot change either.

use roleproxy_auth::{explain_authorization, RoleStore};
use roleproxy_core::{selector_from_payload, Address, Bytes, RoleMask, Selector, FALLBACK_SELECTOR};
use roleproxy_events::EventLog;

use crate::error::{AdapterError, AdapterResult};
use crate::events::{AdapterEvent, ExecutionComplete};
use crate::host::Host;
use crate::registry::OperationRegistry;

/// Operation a payload routes to.
///
/// An empty payload is a plain value transfer and routes to
/// [`FALLBACK_SELECTOR`]; a payload too short to carry a selector is rejected.
pub fn route(payload: &[u8]) -> AdapterResult<Selector> {
    if payload.is_empty() {
        return Ok(FALLBACK_SELECTOR);
    }
    selector_from_payload(payload).ok_or(AdapterError::MalformedInvocation { len: payload.len() })
}

/// Borrowed view over one adapter's policy, target and log.
#[derive(Debug)]
pub struct Dispatcher<'a, R: ?Sized> {
    adapter: Address,
    target: Address,
    registry: &'a OperationRegistry,
    roles: &'a R,
    log: &'a EventLog<AdapterEvent>,
}

impl<'a, R> Dispatcher<'a, R>
where
    R: RoleStore + ?Sized,
{
    pub fn new(
        adapter: Address,
        target: Address,
        registry: &'a OperationRegistry,
        roles: &'a R,
        log: &'a EventLog<AdapterEvent>,
    ) -> Self {
        Self {
            adapter,
            target,
            registry,
            roles,
            log,
        }
    }

    /// Decide whether `caller` may send `payload`, without forwarding it.
    ///
    /// Returns the routed selector and the requirement that was satisfied.
    pub fn authorize(&self, caller: Address, payload: &[u8]) -> AdapterResult<(Selector, RoleMask)> {
        let selector = route(payload)?;

        let required = self
            .registry
            .requirement(selector)
            .ok_or(AdapterError::RequirementUnset { selector })?;

        if !self.roles.has_role(caller, required) {
            return Err(AdapterError::AccessDenied {
                account: caller,
                required,
            });
        }

        Ok((selector, required))
    }

    /// Authorize and forward one invocation.
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
        let (selector, required) = match self.authorize(caller, payload) {
            Ok(decision) => decision,
            Err(err) => {
                self.log_rejection(caller, payload.len(), &err);
                return Err(err);
            }
        };

        tracing::debug!(
            adapter = %self.adapter,
            caller = %caller,
            selector = %selector,
            required = %required,
            value,
            "forwarding invocation"
        );

        let result = host
            .call(self.adapter, self.target, payload, value)
            .inspect_err(|revert| {
                tracing::warn!(
                    adapter = %self.adapter,
                    target = %self.target,
                    selector = %selector,
                    revert = %revert,
                    "target rejected forwarded call"
                );
            })?;

        self.log.append(
            self.adapter,
            AdapterEvent::ExecutionComplete(ExecutionComplete {
                selector,
                role_required: required,
                data: Bytes::copy_from_slice(payload),
                result: Bytes::copy_from_slice(&result),
            }),
        );

        Ok(result)
    }

    fn log_rejection(&self, caller: Address, payload_len: usize, err: &AdapterError) {
        match err {
            AdapterError::AccessDenied { required, .. } => {
                let explanation = explain_authorization(self.roles, caller, *required);
                tracing::warn!(
                    adapter = %self.adapter,
                    caller = %caller,
                    required = %explanation.required,
                    held = %explanation.held,
                    denial = ?explanation.denial,
                    reason = %explanation.reason,
                    "invocation rejected"
                );
            }
            _ => {
                tracing::warn!(
                    adapter = %self.adapter,
                    caller = %caller,
                    payload_len,
                    error = %err,
                    "invocation rejected"
                );
            }
        }
    }
}

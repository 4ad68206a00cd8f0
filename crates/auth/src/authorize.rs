use serde::Serialize;
use thiserror::Error;

use roleproxy_core::{Address, RoleMask};

use crate::roles::reserved_role_name;
use crate::RoleStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The account holds none of the required bits (or nothing is required,
    /// which nobody can satisfy).
    #[error("AccessDenied()")]
    AccessDenied { account: Address, required: RoleMask },
}

/// Check `account` against `required` in `store`.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize<S>(store: &S, account: Address, required: RoleMask) -> Result<(), AuthzError>
where
    S: RoleStore + ?Sized,
{
    if store.has_role(account, required) {
        Ok(())
    } else {
        Err(AuthzError::AccessDenied { account, required })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Answers "why was this caller allowed/denied?" for operators and audit logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationExplanation {
    pub account: Address,
    pub required: RoleMask,
    pub held: RoleMask,
    pub granted: bool,

    /// Bits the account holds that satisfied the requirement.
    pub matching: RoleMask,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// If denied, this explains what was missing.
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// Nothing is required, which fails closed.
    EmptyRequirement,
    /// The account holds none of the required bits.
    NoMatchingBit,
}

/// Explain the decision [`authorize`] would make for `account`.
pub fn explain_authorization<S>(
    store: &S,
    account: Address,
    required: RoleMask,
) -> AuthorizationExplanation
where
    S: RoleStore + ?Sized,
{
    let held = store.role_of(account);
    let matching = held & required;

    let (granted, reason, denial) = if required.is_empty() {
        (
            false,
            "no role is configured; empty requirements deny every caller".to_string(),
            Some(DenialKind::EmptyRequirement),
        )
    } else if matching.is_empty() {
        (
            false,
            format!("account {account} holds {held}, none of the required bits {required}"),
            Some(DenialKind::NoMatchingBit),
        )
    } else {
        let reason = match reserved_role_name(matching) {
            Some(name) => format!("account {account} holds {name}"),
            None => format!("account {account} holds required bits {matching}"),
        };
        (true, reason, None)
    };

    AuthorizationExplanation {
        account,
        required,
        held,
        granted,
        matching,
        reason,
        denial,
    }
}

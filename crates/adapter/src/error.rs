//! Adapter error model.

use thiserror::Error;

use roleproxy_auth::AuthzError;
use roleproxy_core::{Address, Revert, RoleMask, Selector};

/// Result type used across the adapter.
pub type AdapterResult<T> = Result<T, AdapterError>;

pub const ZERO_ADDRESS: &str = "zero address";
pub const NOT_A_CONTRACT: &str = "EOA";

/// Every way an adapter or factory operation can be rejected.
///
/// Authorization failures are raised before anything is forwarded and leave
/// no trace. `ForwardedFailure` carries the target's revert data untouched;
/// its `Display` is the target's own message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The target handle is null or has no code.
    #[error("{0}")]
    InvalidTarget(&'static str),

    /// Only the target's current owner may wrap it.
    #[error("not an owner")]
    NotTargetOwner { deployer: Address, owner: Option<Address> },

    /// Payload is non-empty but shorter than a selector.
    #[error("bad selector")]
    MalformedInvocation { len: usize },

    /// No role is configured for the operation; fails closed.
    #[error("access role not set")]
    RequirementUnset { selector: Selector },

    /// The caller holds none of the required bits.
    #[error("AccessDenied()")]
    AccessDenied { account: Address, required: RoleMask },

    /// The target rejected the forwarded call.
    #[error(transparent)]
    ForwardedFailure(#[from] Revert),
}

impl From<AuthzError> for AdapterError {
    fn from(value: AuthzError) -> Self {
        match value {
            AuthzError::AccessDenied { account, required } => {
                AdapterError::AccessDenied { account, required }
            }
        }
    }
}

impl AdapterError {
    /// Target revert data, when the failure came from the target.
    pub fn revert(&self) -> Option<&Revert> {
        match self {
            AdapterError::ForwardedFailure(revert) => Some(revert),
            _ => None,
        }
    }

    /// True for rejections decided by the adapter's own policy (nothing was
    /// forwarded).
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            AdapterError::MalformedInvocation { .. }
                | AdapterError::RequirementUnset { .. }
                | AdapterError::AccessDenied { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roleproxy_core::FALLBACK_SELECTOR;

    #[test]
    fn messages_match_the_wire_reasons() {
        assert_eq!(AdapterError::InvalidTarget(ZERO_ADDRESS).to_string(), "zero address");
        assert_eq!(AdapterError::InvalidTarget(NOT_A_CONTRACT).to_string(), "EOA");
        assert_eq!(AdapterError::MalformedInvocation { len: 3 }.to_string(), "bad selector");
        assert_eq!(
            AdapterError::RequirementUnset {
                selector: FALLBACK_SELECTOR
            }
            .to_string(),
            "access role not set"
        );
    }

    #[test]
    fn forwarded_failure_displays_target_message() {
        let err = AdapterError::from(Revert::with_message("Hello, World!"));
        assert_eq!(err.to_string(), "Hello, World!");
        assert!(!err.is_authorization_failure());
        assert_eq!(err.revert().and_then(Revert::reason).as_deref(), Some("Hello, World!"));
    }

    #[test]
    fn authz_denial_converts() {
        let account = Address::with_last_byte(1);
        let err = AdapterError::from(AuthzError::AccessDenied {
            account,
            required: RoleMask::bit(3),
        });
        assert!(matches!(err, AdapterError::AccessDenied { account: a, .. } if a == account));
        assert!(err.is_authorization_failure());
    }
}

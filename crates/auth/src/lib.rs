//! `roleproxy-auth`: bitmask RBAC boundary consumed by the adapter.
//!
//! Decoupled from transport and storage: the adapter only needs
//! [`RoleStore::has_role`]; [`InMemoryRoleStore`] is the reference engine.

pub mod authorize;
pub mod roles;
pub mod store;

pub use authorize::{authorize, explain_authorization, AuthorizationExplanation, AuthzError, DenialKind};
pub use roles::{not, ROLE_ACCESS_MANAGER, ROLE_ACCESS_ROLES_MANAGER, SUPER_ADMIN};
pub use store::{evaluate_by, InMemoryRoleStore, RoleAdmin, RoleStore};

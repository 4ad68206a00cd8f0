//! `roleproxy-adapter`: per-operation RBAC in front of a single-owner target.
//!
//! An [`AdapterInstance`] becomes the owner of a legacy Ownable component and
//! forwards calls to it only when the caller holds a role configured for the
//! called operation. Unconfigured operations are closed to everyone.
//! [`AdapterFactory`] validates targets and announces new adapters.

pub mod dispatcher;
pub mod error;
pub mod events;
pub mod factory;
pub mod host;
pub mod instance;
pub mod registry;
pub mod targets;

pub use dispatcher::{route, Dispatcher};
pub use error::{AdapterError, AdapterResult};
pub use events::{AdapterDeployed, AdapterEvent, ExecutionComplete, RequirementUpdated, RoleUpdated};
pub use factory::AdapterFactory;
pub use host::{CallContext, Component, Host, InMemoryHost};
pub use instance::AdapterInstance;
pub use registry::OperationRegistry;

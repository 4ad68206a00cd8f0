//! Observable records produced by adapters and factories.

use serde::{Deserialize, Serialize};

use roleproxy_core::{Address, Bytes, RoleMask, Selector};
use roleproxy_events::Event;

/// Event: the role required for an operation changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementUpdated {
    pub by: Address,
    pub selector: Selector,
    pub role: RoleMask,
}

/// Event: a forwarded call succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionComplete {
    pub selector: Selector,
    pub role_required: RoleMask,
    pub data: Bytes,
    pub result: Bytes,
}

/// Event: a factory deployed a new adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterDeployed {
    pub adapter: Address,
    pub target: Address,
}

/// Event: an account's role assignment changed through the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUpdated {
    pub by: Address,
    pub operator: Address,
    pub requested: RoleMask,
    pub assigned: RoleMask,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdapterEvent {
    RequirementUpdated(RequirementUpdated),
    ExecutionComplete(ExecutionComplete),
    AdapterDeployed(AdapterDeployed),
    RoleUpdated(RoleUpdated),
}

impl Event for AdapterEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AdapterEvent::RequirementUpdated(_) => "adapter.requirement.updated",
            AdapterEvent::ExecutionComplete(_) => "adapter.execution.completed",
            AdapterEvent::AdapterDeployed(_) => "factory.adapter.deployed",
            AdapterEvent::RoleUpdated(_) => "adapter.role.updated",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roleproxy_core::selector_of;
    use roleproxy_events::EventRecord;

    #[test]
    fn execution_record_exports_hex_payloads() {
        let record = EventRecord::new(
            Address::with_last_byte(9),
            1,
            AdapterEvent::ExecutionComplete(ExecutionComplete {
                selector: selector_of("owner()"),
                role_required: RoleMask::bit(0),
                data: Bytes::from(vec![0x8d, 0xa5, 0xcb, 0x5b]),
                result: Bytes::new(),
            }),
        );

        let json = record.to_json().unwrap();

        assert_eq!(json["event_type"], "adapter.execution.completed");
        assert_eq!(json["event_version"], 1);
        assert_eq!(json["payload"]["type"], "execution_complete");
        assert_eq!(json["payload"]["selector"], "0x8da5cb5b");
        assert_eq!(json["payload"]["data"], "0x8da5cb5b");
        assert_eq!(json["payload"]["result"], "0x");
        assert_eq!(json["payload"]["role_required"], "0x1");
    }
}

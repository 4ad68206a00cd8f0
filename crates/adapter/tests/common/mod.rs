#![allow(dead_code)]

use std::sync::Arc;

use alloy_sol_types::SolCall;
use roleproxy_adapter::targets::{transferOwnershipCall, LegacyOwnable};
use roleproxy_adapter::{AdapterFactory, AdapterInstance, Host, InMemoryHost};
use roleproxy_core::Address;
use roleproxy_events::EventLog;

pub fn admin() -> Address {
    Address::with_last_byte(0xa0)
}

pub fn stranger() -> Address {
    Address::with_last_byte(0x05)
}

/// Install the workspace subscriber once; later calls are no-ops.
pub fn init_tracing() {
    roleproxy_observability::init();
}

/// An Ownable owned by `admin()`, wrapped by a factory-deployed adapter that
/// already holds the target's ownership.
pub struct Deployment {
    pub host: InMemoryHost,
    pub factory: AdapterFactory,
    pub target: Address,
    pub adapter: AdapterInstance,
}

pub fn deploy(target: LegacyOwnable) -> anyhow::Result<Deployment> {
    init_tracing();

    let mut host = InMemoryHost::new();
    let target = host.deploy(admin(), target);
    let mut factory = AdapterFactory::new(Address::with_last_byte(0xfa), Arc::new(EventLog::new()));
    let adapter = factory.deploy(&mut host, admin(), target)?;

    host.call(admin(), target, &transfer_ownership(adapter.address()), 0)?;

    Ok(Deployment {
        host,
        factory,
        target,
        adapter,
    })
}

pub fn transfer_ownership(to: Address) -> Vec<u8> {
    transferOwnershipCall { newOwner: to }.abi_encode()
}

pub fn owner_of(host: &mut InMemoryHost, target: Address) -> anyhow::Result<Address> {
    Ok(roleproxy_adapter::targets::owner_of(host, target)?)
}

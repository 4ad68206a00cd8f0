//! Deploys adapters over Ownable targets.

use std::sync::Arc;

use roleproxy_core::Address;
use roleproxy_events::EventLog;

use crate::error::{AdapterError, AdapterResult};
use crate::events::{AdapterDeployed, AdapterEvent};
use crate::host::Host;
use crate::instance::{validate_target, AdapterInstance};
use crate::targets::owner_of;

/// Creates [`AdapterInstance`]s and announces each one.
///
/// Adapter addresses follow CREATE derivation from the factory's own address
/// and a per-factory nonce, so they are unique per factory and predictable.
/// Deployment does not move ownership of the target; its owner does that
/// afterwards by transferring ownership to the announced adapter address.
#[derive(Debug)]
pub struct AdapterFactory {
    address: Address,
    nonce: u64,
    log: Arc<EventLog<AdapterEvent>>,
}

impl AdapterFactory {
    pub fn new(address: Address, log: Arc<EventLog<AdapterEvent>>) -> Self {
        Self {
            address,
            nonce: 0,
            log,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn log(&self) -> &Arc<EventLog<AdapterEvent>> {
        &self.log
    }

    /// Wrap `target` in a new adapter administered by `deployer`.
    ///
    /// Only the target's current owner may wrap it.
    pub fn deploy<H>(
        &mut self,
        host: &mut H,
        deployer: Address,
        target: Address,
    ) -> AdapterResult<AdapterInstance>
    where
        H: Host + ?Sized,
    {
        validate_target(&*host, target).inspect_err(|err| {
            tracing::warn!(deployer = %deployer, target = %target, error = %err, "deployment rejected");
        })?;

        let owner = owner_of(host, target)?;
        if owner != deployer {
            tracing::warn!(deployer = %deployer, target = %target, owner = %owner, "deployer does not own target");
            return Err(AdapterError::NotTargetOwner {
                deployer,
                owner: Some(owner),
            });
        }

        let address = self.address.create(self.nonce);
        let instance = AdapterInstance::new(&*host, address, target, deployer, Arc::clone(&self.log))?;
        self.nonce += 1;

        self.log.append(
            self.address,
            AdapterEvent::AdapterDeployed(AdapterDeployed {
                adapter: address,
                target,
            }),
        );

        tracing::info!(
            factory = %self.address,
            adapter = %address,
            target = %target,
            deployer = %deployer,
            "adapter deployed"
        );

        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryHost;
    use crate::targets::{ErrorHelper, LegacyOwnable};

    fn factory() -> AdapterFactory {
        AdapterFactory::new(Address::with_last_byte(0xfa), Arc::new(EventLog::new()))
    }

    #[test]
    fn successive_deployments_get_distinct_addresses() {
        let mut host = InMemoryHost::new();
        let owner = Address::with_last_byte(1);
        let first_target = host.deploy(owner, LegacyOwnable::new(owner));
        let second_target = host.deploy(owner, LegacyOwnable::new(owner));
        let mut factory = factory();

        let first = factory.deploy(&mut host, owner, first_target).unwrap();
        let second = factory.deploy(&mut host, owner, second_target).unwrap();

        assert_ne!(first.address(), second.address());
        assert_eq!(first.address(), factory.address().create(0));
        assert_eq!(factory.log().len(), 2);
    }

    #[test]
    fn target_without_owner_function_surfaces_its_revert() {
        let mut host = InMemoryHost::new();
        let deployer = Address::with_last_byte(1);
        let target = host.deploy(deployer, ErrorHelper);
        let mut factory = factory();

        let err = factory.deploy(&mut host, deployer, target).unwrap_err();

        assert!(matches!(err, AdapterError::ForwardedFailure(ref revert) if revert.is_empty()));
        assert!(factory.log().is_empty());
    }

    #[test]
    fn rejected_deployment_does_not_consume_a_nonce() {
        let mut host = InMemoryHost::new();
        let owner = Address::with_last_byte(1);
        let target = host.deploy(owner, LegacyOwnable::new(owner));
        let mut factory = factory();

        assert!(factory.deploy(&mut host, Address::with_last_byte(2), target).is_err());
        let instance = factory.deploy(&mut host, owner, target).unwrap();

        assert_eq!(instance.address(), factory.address().create(0));
    }
}

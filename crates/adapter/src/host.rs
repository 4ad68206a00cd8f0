//! Binding to the environment the wrapped target lives in.
//!
//! The adapter needs exactly two things from its host: whether an address has
//! code, and a way to forward a raw call and get back either the result bytes
//! or the callee's revert data. [`InMemoryHost`] implements both over a map of
//! in-process components.

use std::collections::HashMap;

use roleproxy_core::{Address, Revert};

/// Call mechanism of the host environment.
pub trait Host {
    /// True when `address` refers to a component that can receive calls.
    fn has_code(&self, address: Address) -> bool;

    /// Invoke `to` with `payload`, attaching `value`, on behalf of `from`.
    ///
    /// The call is all-or-nothing: on `Err` the callee's state and the value
    /// transfer are left untouched.
    fn call(
        &mut self,
        from: Address,
        to: Address,
        payload: &[u8],
        value: u128,
    ) -> Result<Vec<u8>, Revert>;
}

impl<H: Host + ?Sized> Host for &mut H {
    fn has_code(&self, address: Address) -> bool {
        (**self).has_code(address)
    }

    fn call(
        &mut self,
        from: Address,
        to: Address,
        payload: &[u8],
        value: u128,
    ) -> Result<Vec<u8>, Revert> {
        (**self).call(from, to, payload, value)
    }
}

/// What a component sees about the call it is handling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub value: u128,
}

/// An in-process component with code.
///
/// Implementations must validate before mutating: returning `Err` after a
/// partial state change would break the host's all-or-nothing guarantee.
pub trait Component: core::fmt::Debug + Send {
    fn call(&mut self, ctx: CallContext, payload: &[u8]) -> Result<Vec<u8>, Revert>;
}

/// Host over in-memory components and balances.
///
/// Value attached to a successful call is credited to the callee. Funding of
/// the caller side is settled by whoever submitted the outer invocation, so it
/// is not debited here.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    components: HashMap<Address, Box<dyn Component>>,
    balances: HashMap<Address, u128>,
    nonces: HashMap<Address, u64>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `component` at the next contract-creation address of
    /// `deployer`.
    pub fn deploy(&mut self, deployer: Address, component: impl Component + 'static) -> Address {
        let nonce = self.nonces.entry(deployer).or_insert(0);
        let address = deployer.create(*nonce);
        *nonce += 1;

        self.components.insert(address, Box::new(component));
        tracing::debug!(deployer = %deployer, address = %address, "component deployed");
        address
    }

    pub fn balance_of(&self, address: Address) -> u128 {
        self.balances.get(&address).copied().unwrap_or(0)
    }
}

impl Host for InMemoryHost {
    fn has_code(&self, address: Address) -> bool {
        self.components.contains_key(&address)
    }

    fn call(
        &mut self,
        from: Address,
        to: Address,
        payload: &[u8],
        value: u128,
    ) -> Result<Vec<u8>, Revert> {
        let balance = self
            .balance_of(to)
            .checked_add(value)
            .ok_or_else(|| Revert::with_message("balance overflow"))?;

        let output = match self.components.get_mut(&to) {
            Some(component) => component.call(CallContext { caller: from, value }, payload)?,
            // Plain accounts accept anything and return nothing.
            None => Vec::new(),
        };

        if value > 0 {
            self.balances.insert(to, balance);
        }
        Ok(output)
    }
}

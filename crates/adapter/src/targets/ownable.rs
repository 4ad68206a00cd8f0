//! A single-owner component: the shape of legacy target an adapter wraps.

use alloy_sol_types::{sol, SolCall, SolInterface, SolValue};

use roleproxy_core::{Address, Revert, U256};

use crate::host::{CallContext, Component, Host};

sol! {
    interface IOwnable {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
        function totalReceived() external view returns (uint256);
    }
}

pub use IOwnable::{ownerCall, totalReceivedCall, transferOwnershipCall, IOwnableCalls};

/// Ownable component implementing [`IOwnable`].
///
/// Every named function is non-payable. A data-less call is accepted only when
/// the component was built with [`LegacyOwnable::payable`]; otherwise it
/// reverts with no data, as does any unknown selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyOwnable {
    owner: Address,
    accepts_value: bool,
    total_received: u128,
}

impl LegacyOwnable {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            accepts_value: false,
            total_received: 0,
        }
    }

    /// Variant that accepts plain value transfers.
    pub fn payable(owner: Address) -> Self {
        Self {
            accepts_value: true,
            ..Self::new(owner)
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    fn transfer_ownership(&mut self, ctx: CallContext, new_owner: Address) -> Result<Vec<u8>, Revert> {
        if ctx.caller != self.owner {
            return Err(Revert::with_message("Ownable: caller is not the owner"));
        }
        if new_owner.is_zero() {
            return Err(Revert::with_message("Ownable: new owner is the zero address"));
        }

        tracing::debug!(from = %self.owner, to = %new_owner, "ownership transferred");
        self.owner = new_owner;
        Ok(Vec::new())
    }
}

impl Component for LegacyOwnable {
    fn call(&mut self, ctx: CallContext, payload: &[u8]) -> Result<Vec<u8>, Revert> {
        if payload.is_empty() {
            if !self.accepts_value {
                return Err(Revert::empty());
            }
            self.total_received = self
                .total_received
                .checked_add(ctx.value)
                .ok_or_else(Revert::empty)?;
            return Ok(Vec::new());
        }

        let call = IOwnableCalls::abi_decode(payload, true).map_err(|_| Revert::empty())?;
        // Named functions are non-payable.
        if ctx.value > 0 {
            return Err(Revert::empty());
        }

        match call {
            IOwnableCalls::owner(_) => Ok(self.owner.abi_encode()),
            IOwnableCalls::transferOwnership(call) => self.transfer_ownership(ctx, call.newOwner),
            IOwnableCalls::totalReceived(_) => Ok(U256::from(self.total_received).abi_encode()),
        }
    }
}

/// Read the current owner of the Ownable at `target`.
pub fn owner_of<H>(host: &mut H, target: Address) -> Result<Address, Revert>
where
    H: Host + ?Sized,
{
    let output = host.call(Address::ZERO, target, &ownerCall {}.abi_encode(), 0)?;
    Address::abi_decode(&output, true)
        .map_err(|e| Revert::with_message(format!("malformed owner() result: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(caller: Address, value: u128) -> CallContext {
        CallContext { caller, value }
    }

    fn transfer_to(new_owner: Address) -> Vec<u8> {
        transferOwnershipCall { newOwner: new_owner }.abi_encode()
    }

    #[test]
    fn only_owner_can_transfer() {
        let owner = Address::with_last_byte(1);
        let stranger = Address::with_last_byte(2);
        let mut ownable = LegacyOwnable::new(owner);

        let err = ownable.call(ctx(stranger, 0), &transfer_to(stranger)).unwrap_err();
        assert_eq!(err.to_string(), "Ownable: caller is not the owner");
        assert_eq!(ownable.owner(), owner);

        assert!(ownable.call(ctx(owner, 0), &transfer_to(stranger)).unwrap().is_empty());
        assert_eq!(ownable.owner(), stranger);
    }

    #[test]
    fn owner_is_returned_as_an_abi_word() {
        let owner = Address::with_last_byte(1);
        let mut ownable = LegacyOwnable::new(owner);

        let out = ownable.call(ctx(owner, 0), &ownerCall {}.abi_encode()).unwrap();

        assert_eq!(out.len(), 32);
        assert_eq!(Address::abi_decode(&out, true).unwrap(), owner);
    }

    #[test]
    fn named_functions_reject_value() {
        let owner = Address::with_last_byte(1);
        let mut ownable = LegacyOwnable::payable(owner);

        let err = ownable
            .call(ctx(owner, 1), &transfer_to(Address::with_last_byte(2)))
            .unwrap_err();

        assert!(err.is_empty());
        assert_eq!(ownable.owner(), owner);
    }

    #[test]
    fn plain_transfers_need_a_payable_target() {
        let owner = Address::with_last_byte(1);

        assert!(LegacyOwnable::new(owner).call(ctx(owner, 5), &[]).is_err());

        let mut payable = LegacyOwnable::payable(owner);
        payable.call(ctx(owner, 5), &[]).unwrap();
        let out = payable
            .call(ctx(owner, 0), &totalReceivedCall {}.abi_encode())
            .unwrap();
        assert_eq!(U256::abi_decode(&out, true).unwrap(), U256::from(5u8));
    }

    #[test]
    fn zero_address_cannot_become_owner() {
        let owner = Address::with_last_byte(1);
        let mut ownable = LegacyOwnable::new(owner);

        let err = ownable.call(ctx(owner, 0), &transfer_to(Address::ZERO)).unwrap_err();

        assert_eq!(err.to_string(), "Ownable: new owner is the zero address");
    }

    #[test]
    fn unknown_and_short_payloads_revert_without_data() {
        let owner = Address::with_last_byte(1);
        let mut ownable = LegacyOwnable::new(owner);

        assert!(ownable.call(ctx(owner, 0), &[1, 2, 3, 4]).unwrap_err().is_empty());
        assert!(ownable.call(ctx(owner, 0), &[0x11, 0x22, 0x33]).unwrap_err().is_empty());
    }
}

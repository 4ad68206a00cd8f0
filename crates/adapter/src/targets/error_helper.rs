//! Component that reverts with whatever message it is given.

use alloy_sol_types::{sol, SolCall};

use roleproxy_core::Revert;

use crate::host::{CallContext, Component};

sol! {
    interface IErrorHelper {
        function throwError(string message) external;
    }
}

pub use IErrorHelper::throwErrorCall;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorHelper;

impl Component for ErrorHelper {
    fn call(&mut self, ctx: CallContext, payload: &[u8]) -> Result<Vec<u8>, Revert> {
        if ctx.value > 0 {
            return Err(Revert::empty());
        }
        let call = throwErrorCall::abi_decode(payload, true).map_err(|_| Revert::empty())?;
        Err(Revert::with_message(call.message))
    }
}

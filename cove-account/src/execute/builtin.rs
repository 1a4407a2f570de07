//! Built-in account entry points and call routing.
//!
//! Four selectors are recognized by the account itself; everything else
//! goes to the module dispatcher.

use cove_core::serialization::deserialize;
use cove_core::{CallRequest, PasskeyPublicKey, Selector, U256};
use serde::{Deserialize, Serialize};

use crate::error::{AccountError, AccountResult};
use crate::host::Host;
use crate::modules::{dispatch_call, install_module, uninstall_module, ModuleCatalog};
use crate::state::AccountState;

use super::{transfer_ownership, CallContext};

/// Selector of the passthrough `execute` entry point.
pub fn execute_selector() -> Selector {
    Selector::from_name("execute")
}

/// Selector of the module-install entry point.
pub fn add_module_selector() -> Selector {
    Selector::from_name("add-module")
}

/// Selector of the module-removal entry point.
pub fn remove_module_selector() -> Selector {
    Selector::from_name("remove-module")
}

/// Selector of the ownership-transfer entry point.
pub fn transfer_ownership_selector() -> Selector {
    Selector::from_name("transfer-ownership")
}

/// Arguments of the passthrough `execute` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteArgs {
    /// Call target.
    pub target: [u8; 20],
    /// Native value to attach.
    pub value: U256,
    /// Opaque call data.
    pub data: Vec<u8>,
}

/// Arguments of the module-install call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddModuleArgs {
    /// The module to install.
    pub module: [u8; 20],
    /// Module-specific configuration.
    pub init_payload: Vec<u8>,
}

/// Arguments of the module-removal call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveModuleArgs {
    /// The module to uninstall.
    pub module: [u8; 20],
}

/// Arguments of the ownership-transfer call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOwnershipArgs {
    /// The replacement credential.
    pub new_key: PasskeyPublicKey,
}

/// Route a call payload to a built-in entry point or the dispatcher.
pub(crate) fn apply_call(
    state: &mut AccountState,
    catalog: &ModuleCatalog,
    host: &mut dyn Host,
    ctx: &CallContext,
    call: &CallRequest,
) -> AccountResult<Vec<u8>> {
    let selector = call.selector;

    if selector == execute_selector() {
        let args: ExecuteArgs = decode_args(&call.args)?;
        host.call(&state.address(), &args.target, args.value, &args.data)?;
        Ok(Vec::new())
    } else if selector == add_module_selector() {
        let args: AddModuleArgs = decode_args(&call.args)?;
        install_module(state, catalog, host, ctx, args.module, &args.init_payload)?;
        Ok(Vec::new())
    } else if selector == remove_module_selector() {
        let args: RemoveModuleArgs = decode_args(&call.args)?;
        uninstall_module(state, catalog, host, ctx, args.module)?;
        Ok(Vec::new())
    } else if selector == transfer_ownership_selector() {
        let args: TransferOwnershipArgs = decode_args(&call.args)?;
        transfer_ownership(state, ctx, &args.new_key)?;
        Ok(Vec::new())
    } else {
        dispatch_call(state, catalog, host, ctx, selector, &call.args)
    }
}

fn decode_args<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> AccountResult<T> {
    deserialize(bytes).map_err(|e| AccountError::MalformedCallArgs(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use cove_core::crypto::actor_id;
    use cove_core::serialization::serialize;
    use cove_core::KeyPair;

    fn setup() -> (AccountState, ModuleCatalog, MemoryHost, CallContext) {
        let state =
            AccountState::new(actor_id("executor"), KeyPair::generate().public_key()).unwrap();
        let ctx = CallContext::new(actor_id("executor"), 1_700_000_000);
        (state, ModuleCatalog::new(), MemoryHost::new(), ctx)
    }

    #[test]
    fn test_builtin_selectors_are_distinct() {
        let selectors = [
            execute_selector(),
            add_module_selector(),
            remove_module_selector(),
            transfer_ownership_selector(),
        ];
        for (i, a) in selectors.iter().enumerate() {
            for b in &selectors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_execute_passthrough() {
        let (mut state, catalog, mut host, ctx) = setup();
        host.fund_native(&state.address(), U256::from(10u64));

        let args = ExecuteArgs {
            target: actor_id("target"),
            value: U256::from(3u64),
            data: vec![0xCA, 0xFE],
        };
        let call = CallRequest::new(execute_selector(), serialize(&args).unwrap());

        apply_call(&mut state, &catalog, &mut host, &ctx, &call).unwrap();

        assert_eq!(host.native_balance(&actor_id("target")), U256::from(3u64));
        assert_eq!(host.calls().len(), 1);
        assert_eq!(host.calls()[0].data, vec![0xCA, 0xFE]);
    }

    #[test]
    fn test_malformed_args_hard_fail() {
        let (mut state, catalog, mut host, ctx) = setup();
        let call = CallRequest::new(execute_selector(), vec![0xFF; 3]);

        let result = apply_call(&mut state, &catalog, &mut host, &ctx, &call);
        assert!(matches!(result, Err(AccountError::MalformedCallArgs(_))));
    }

    #[test]
    fn test_unmatched_selector_goes_to_dispatcher() {
        let (mut state, catalog, mut host, ctx) = setup();
        let selector = Selector::from_name("no-such-module");
        let call = CallRequest::new(selector, Vec::new());

        let result = apply_call(&mut state, &catalog, &mut host, &ctx, &call);
        assert_eq!(result, Err(AccountError::UnknownSelector { selector }));
    }
}

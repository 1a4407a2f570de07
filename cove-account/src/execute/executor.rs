//! Operation execution - main entry point for executor-submitted work.

use cove_core::{Operation, U256};

use crate::error::{AccountError, AccountResult};
use crate::host::Host;
use crate::modules::ModuleCatalog;
use crate::state::AccountState;

use super::builtin::apply_call;
use super::validate::{validate_operation, ValidationCode};
use super::CallContext;

/// What became of a submitted operation.
///
/// Only the `Executed` arm commits call-payload writes. The nonce is
/// consumed in every arm that reaches validation, including `CallFailed`:
/// a validated operation is spent whether or not its call succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Credential or timing check failed; nothing executed.
    Rejected,
    /// Validated and the call payload ran, returning its output.
    Executed(Vec<u8>),
    /// Validated, but the call payload failed; its writes were discarded.
    CallFailed(AccountError),
}

/// Validate and execute one operation. Executor-only.
///
/// The nonce is checked against the account's counter exactly and
/// consumed before validation, so even a rejected or failed operation can
/// never be resubmitted. The call payload runs against a working copy of
/// the state and commits only on success.
pub fn execute_operation(
    state: &mut AccountState,
    catalog: &ModuleCatalog,
    host: &mut dyn Host,
    ctx: &CallContext,
    op: &Operation,
    required_prefund: U256,
) -> AccountResult<OperationOutcome> {
    if ctx.caller != state.executor {
        return Err(AccountError::UnauthorizedCaller {
            expected: state.executor,
            actual: ctx.caller,
        });
    }

    if op.nonce != state.nonce {
        return Err(AccountError::NonceMismatch {
            expected: state.nonce,
            got: op.nonce,
        });
    }
    state.nonce += 1;

    let operation_hash = op.operation_hash();
    let code = validate_operation(state, host, ctx, op, &operation_hash, required_prefund)?;
    if !code.is_approved() {
        tracing::debug!(nonce = op.nonce, "operation rejected by validation");
        return Ok(OperationOutcome::Rejected);
    }

    if op.call_payload.is_empty() {
        return Ok(OperationOutcome::Executed(Vec::new()));
    }

    let mut working = state.clone();
    match apply_call(&mut working, catalog, host, ctx, &op.call_payload) {
        Ok(output) => {
            *state = working;
            tracing::debug!(nonce = op.nonce, "operation executed");
            Ok(OperationOutcome::Executed(output))
        }
        Err(e) => {
            tracing::debug!(nonce = op.nonce, error = %e, "operation call payload failed");
            Ok(OperationOutcome::CallFailed(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execute::{execute_selector, ExecuteArgs};
    use crate::host::{Host as _, MemoryHost};
    use cove_core::crypto::actor_id;
    use cove_core::serialization::serialize;
    use cove_core::webauthn::PasskeySignature;
    use cove_core::{CallRequest, KeyPair, Selector};

    fn setup() -> (KeyPair, AccountState, ModuleCatalog, MemoryHost, CallContext) {
        let kp = KeyPair::generate();
        let state = AccountState::new(actor_id("executor"), kp.public_key()).unwrap();
        let ctx = CallContext::new(actor_id("executor"), 1_700_000_000);
        (kp, state, ModuleCatalog::new(), MemoryHost::new(), ctx)
    }

    fn signed_op(kp: &KeyPair, state: &AccountState, call: CallRequest) -> Operation {
        let mut op = Operation {
            sender: state.address(),
            nonce: state.nonce(),
            init_payload: Vec::new(),
            call_payload: call,
            verification_gas_limit: 500_000,
            call_gas_limit: 200_000,
            pre_verification_gas: 50_000,
            max_fee_per_gas: 100_000_000_000,
            max_priority_fee_per_gas: 5_000_000_000,
            sponsor_data: Vec::new(),
            signature: Vec::new(),
        };
        let sig = PasskeySignature::create(kp, op.operation_hash(), 0).unwrap();
        op.signature = sig.encode().unwrap();
        op
    }

    #[test]
    fn test_validate_only_operation_consumes_nonce() {
        let (kp, mut state, catalog, mut host, ctx) = setup();
        let op = signed_op(&kp, &state, CallRequest::empty());

        let outcome =
            execute_operation(&mut state, &catalog, &mut host, &ctx, &op, U256::zero()).unwrap();
        assert_eq!(outcome, OperationOutcome::Executed(Vec::new()));
        assert_eq!(state.nonce(), 1);
    }

    #[test]
    fn test_replay_hard_fails() {
        let (kp, mut state, catalog, mut host, ctx) = setup();
        let op = signed_op(&kp, &state, CallRequest::empty());

        execute_operation(&mut state, &catalog, &mut host, &ctx, &op, U256::zero()).unwrap();

        let result = execute_operation(&mut state, &catalog, &mut host, &ctx, &op, U256::zero());
        assert_eq!(result, Err(AccountError::NonceMismatch { expected: 1, got: 0 }));
    }

    #[test]
    fn test_future_nonce_hard_fails() {
        let (kp, mut state, catalog, mut host, ctx) = setup();
        let mut op = signed_op(&kp, &state, CallRequest::empty());
        op.nonce = 5;

        let result = execute_operation(&mut state, &catalog, &mut host, &ctx, &op, U256::zero());
        assert_eq!(result, Err(AccountError::NonceMismatch { expected: 0, got: 5 }));
        assert_eq!(state.nonce(), 0);
    }

    #[test]
    fn test_rejected_operation_still_consumes_nonce() {
        let (_, mut state, catalog, mut host, ctx) = setup();
        let other = KeyPair::generate();
        let op = signed_op(&other, &state, CallRequest::empty());

        let outcome =
            execute_operation(&mut state, &catalog, &mut host, &ctx, &op, U256::zero()).unwrap();
        assert_eq!(outcome, OperationOutcome::Rejected);
        assert_eq!(state.nonce(), 1);
    }

    #[test]
    fn test_failed_call_consumes_nonce_and_discards_writes() {
        let (kp, mut state, catalog, mut host, ctx) = setup();
        let call = CallRequest::new(Selector::from_name("nobody-owns-this"), Vec::new());
        let op = signed_op(&kp, &state, call);

        let outcome =
            execute_operation(&mut state, &catalog, &mut host, &ctx, &op, U256::zero()).unwrap();
        assert!(matches!(
            outcome,
            OperationOutcome::CallFailed(AccountError::UnknownSelector { .. })
        ));
        assert_eq!(state.nonce(), 1);
    }

    #[test]
    fn test_execute_passthrough_moves_value() {
        let (kp, mut state, catalog, mut host, ctx) = setup();
        host.fund_native(&state.address(), U256::from(100u64));

        let args = ExecuteArgs {
            target: actor_id("recipient"),
            value: U256::from(25u64),
            data: Vec::new(),
        };
        let call = CallRequest::new(execute_selector(), serialize(&args).unwrap());
        let op = signed_op(&kp, &state, call);

        let outcome =
            execute_operation(&mut state, &catalog, &mut host, &ctx, &op, U256::zero()).unwrap();
        assert_eq!(outcome, OperationOutcome::Executed(Vec::new()));
        assert_eq!(host.native_balance(&actor_id("recipient")), U256::from(25u64));
        assert_eq!(host.native_balance(&state.address()), U256::from(75u64));
    }

    #[test]
    fn test_non_executor_hard_fails_without_nonce_consumption() {
        let (kp, mut state, catalog, mut host, _) = setup();
        let op = signed_op(&kp, &state, CallRequest::empty());
        let stranger = CallContext::new(actor_id("stranger"), 1_700_000_000);

        let result =
            execute_operation(&mut state, &catalog, &mut host, &stranger, &op, U256::zero());
        assert!(matches!(result, Err(AccountError::UnauthorizedCaller { .. })));
        assert_eq!(state.nonce(), 0);
    }
}

//! Passkey validation of submitted operations.

use cove_core::webauthn::{Challenge, PasskeySignature};
use cove_core::{Operation, U256};

use crate::error::{AccountError, AccountResult};
use crate::host::Host;
use crate::state::AccountState;

use super::CallContext;

/// Soft outcome of a credential and timing check.
///
/// This is deliberately not an error: the executor reads the code and
/// applies its own penalty or bookkeeping policy. Structural problems
/// (a signature that does not decode, a caller that is not the executor)
/// are hard failures instead, never folded into this code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationCode {
    /// Credential and timing checks passed.
    Approved,
    /// Wrong credential or expired assertion.
    Rejected,
}

impl ValidationCode {
    /// The wire value: 0 for approved, 1 for rejected.
    pub fn as_u8(&self) -> u8 {
        match self {
            ValidationCode::Approved => 0,
            ValidationCode::Rejected => 1,
        }
    }

    /// Whether the operation may proceed to execution.
    pub fn is_approved(&self) -> bool {
        matches!(self, ValidationCode::Approved)
    }
}

/// Validate an operation's passkey assertion. Executor-only.
///
/// Decodes the signature envelope (malformed bytes are a hard failure),
/// confirms the signed challenge commits to `operation_hash`, verifies the
/// WebAuthn claims and the ECDSA signature against the account's key, and
/// applies the expiration. On the valid path, pays `required_prefund` from
/// the account to the executor.
pub fn validate_operation(
    state: &AccountState,
    host: &mut dyn Host,
    ctx: &CallContext,
    op: &Operation,
    operation_hash: &[u8; 32],
    required_prefund: U256,
) -> AccountResult<ValidationCode> {
    if ctx.caller != state.executor {
        return Err(AccountError::UnauthorizedCaller {
            expected: state.executor,
            actual: ctx.caller,
        });
    }

    let signature = PasskeySignature::decode(&op.signature)
        .map_err(|e| AccountError::MalformedSignature(e.to_string()))?;

    // Wrong length or version is structural; only the hash binding is a
    // credential question.
    let challenge = Challenge::decode(&signature.challenge)
        .map_err(|e| AccountError::MalformedSignature(e.to_string()))?;

    if challenge.operation_hash != *operation_hash {
        tracing::debug!("validation rejected: challenge does not commit to operation hash");
        return Ok(ValidationCode::Rejected);
    }

    if let Err(reason) = signature.verify(state.public_key()) {
        tracing::debug!(%reason, "validation rejected: assertion failed");
        return Ok(ValidationCode::Rejected);
    }

    if challenge.valid_until != 0 && ctx.timestamp > challenge.valid_until {
        tracing::debug!(
            valid_until = challenge.valid_until,
            now = ctx.timestamp,
            "validation rejected: assertion expired"
        );
        return Ok(ValidationCode::Rejected);
    }

    if !required_prefund.is_zero() {
        host.pay(&state.address(), &ctx.caller, required_prefund)?;
    }

    Ok(ValidationCode::Approved)
}

//! Credential replacement.

use cove_core::PasskeyPublicKey;

use crate::error::{AccountError, AccountResult};
use crate::state::{AccountEvent, AccountState};

use super::CallContext;

/// Replace the account's passkey credential. Executor-only.
///
/// The swap is atomic: there is no transitional state, and the old key
/// fails every validation from this call onward. The account's address
/// does not change.
pub fn transfer_ownership(
    state: &mut AccountState,
    ctx: &CallContext,
    new_key: &PasskeyPublicKey,
) -> AccountResult<()> {
    if ctx.caller != state.executor {
        return Err(AccountError::UnauthorizedCaller {
            expected: state.executor,
            actual: ctx.caller,
        });
    }
    if new_key.is_zero() || new_key.verifying_key().is_err() {
        return Err(AccountError::InvalidPublicKey);
    }

    let previous = state.public_key;
    state.public_key = *new_key;
    state.record(AccountEvent::OwnershipTransferred {
        previous,
        current: *new_key,
    });

    tracing::info!(account = %hex::encode(state.address()), "ownership transferred");
    Ok(())
}

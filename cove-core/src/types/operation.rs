//! Executor-submitted operations.

use serde::{Deserialize, Serialize};

use crate::crypto::sha256;
use crate::serialization::serialize;
use crate::types::Selector;

/// The call an operation asks the account to perform.
///
/// `args` is the deterministic encoding of the entry point's argument
/// struct. The empty request (zero selector, no args) means validate-only:
/// the operation authenticates but executes nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    /// The entry point to invoke.
    pub selector: Selector,

    /// Encoded arguments for the entry point.
    pub args: Vec<u8>,
}

impl CallRequest {
    /// Build a call request from a selector and encoded arguments.
    pub fn new(selector: Selector, args: Vec<u8>) -> Self {
        CallRequest { selector, args }
    }

    /// The validate-only request.
    pub fn empty() -> Self {
        CallRequest {
            selector: Selector::ZERO,
            args: Vec::new(),
        }
    }

    /// Whether this is the validate-only request.
    pub fn is_empty(&self) -> bool {
        self.selector.is_zero() && self.args.is_empty()
    }
}

/// An off-system-constructed, signed intent submitted by the executor.
///
/// Constructed and signed outside the kernel, submitted once, and consumed:
/// the account's nonce advances whether or not the call payload succeeds,
/// so a validated-but-failed operation can never be replayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The account the operation targets.
    pub sender: [u8; 20],

    /// Must equal the account's current nonce exactly.
    pub nonce: u64,

    /// Account-creation payload, empty for an existing account.
    pub init_payload: Vec<u8>,

    /// The call to perform once the operation validates.
    pub call_payload: CallRequest,

    /// Gas budget for signature validation.
    pub verification_gas_limit: u64,

    /// Gas budget for the call payload.
    pub call_gas_limit: u64,

    /// Gas consumed before validation starts.
    pub pre_verification_gas: u64,

    /// Fee ceiling per gas unit.
    pub max_fee_per_gas: u128,

    /// Priority fee per gas unit.
    pub max_priority_fee_per_gas: u128,

    /// Fee-sponsor payload, empty when the account pays its own way.
    pub sponsor_data: Vec<u8>,

    /// Encoded passkey assertion over the operation hash.
    pub signature: Vec<u8>,
}

/// Borrowed view of every operation field except the signature.
///
/// The signature signs the operation hash, so the hash cannot cover the
/// signature itself.
#[derive(Serialize)]
struct UnsignedOperation<'a> {
    sender: &'a [u8; 20],
    nonce: u64,
    init_payload: &'a [u8],
    call_payload: &'a CallRequest,
    verification_gas_limit: u64,
    call_gas_limit: u64,
    pre_verification_gas: u64,
    max_fee_per_gas: u128,
    max_priority_fee_per_gas: u128,
    sponsor_data: &'a [u8],
}

impl Operation {
    /// Compute the operation hash: SHA-256 of the deterministic encoding of
    /// every field except the signature.
    pub fn operation_hash(&self) -> [u8; 32] {
        let unsigned = UnsignedOperation {
            sender: &self.sender,
            nonce: self.nonce,
            init_payload: &self.init_payload,
            call_payload: &self.call_payload,
            verification_gas_limit: self.verification_gas_limit,
            call_gas_limit: self.call_gas_limit,
            pre_verification_gas: self.pre_verification_gas,
            max_fee_per_gas: self.max_fee_per_gas,
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            sponsor_data: &self.sponsor_data,
        };
        let bytes = serialize(&unsigned).expect("operation serialization should not fail");
        sha256(&bytes)
    }
}

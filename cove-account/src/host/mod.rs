//! The hosting ledger and venue boundary.
//!
//! Everything the account kernel cannot do by itself (moving balances,
//! approving spenders, swapping through a venue, issuing arbitrary calls)
//! goes through the [`Host`] trait. The embedding ledger supplies the real
//! implementation; [`MemoryHost`] is the in-memory one for development and
//! tests.

mod memory;

use cove_core::U256;
use thiserror::Error;

pub use memory::{MemoryHost, RecordedCall};

/// Errors raised at the host boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Holder's asset balance cannot cover the amount.
    #[error("insufficient balance of asset {asset}: need {needed}, have {available}")]
    InsufficientBalance {
        /// Asset identity, hex.
        asset: String,
        /// Amount the operation required.
        needed: U256,
        /// Amount actually available.
        available: U256,
    },

    /// Spender's allowance cannot cover the amount.
    #[error("insufficient allowance for spender {spender}: need {needed}, have {available}")]
    InsufficientAllowance {
        /// Spender identity, hex.
        spender: String,
        /// Amount the operation required.
        needed: U256,
        /// Allowance actually granted.
        available: U256,
    },

    /// No venue registered under this identity.
    #[error("unknown venue {0}")]
    UnknownVenue(String),

    /// An outbound call was rejected by its target.
    #[error("call to {target} failed: {reason}")]
    CallFailed {
        /// Call target, hex.
        target: String,
        /// Target-reported failure.
        reason: String,
    },
}

/// Ledger and venue operations available to the account.
///
/// Asset amounts are denominated per asset; native value (used for prefund
/// payment and passthrough calls) is tracked separately.
pub trait Host {
    /// A holder's balance of an asset.
    fn balance_of(&self, asset: &[u8; 20], holder: &[u8; 20]) -> U256;

    /// Move an asset amount between holders.
    fn transfer(
        &mut self,
        asset: &[u8; 20],
        from: &[u8; 20],
        to: &[u8; 20],
        amount: U256,
    ) -> Result<(), HostError>;

    /// Set a spender's allowance over an owner's asset.
    ///
    /// [`U256::MAX`] means unlimited: the allowance is never decremented
    /// by spending.
    fn approve(
        &mut self,
        asset: &[u8; 20],
        owner: &[u8; 20],
        spender: &[u8; 20],
        amount: U256,
    ) -> Result<(), HostError>;

    /// A spender's current allowance over an owner's asset.
    fn allowance(&self, asset: &[u8; 20], owner: &[u8; 20], spender: &[u8; 20]) -> U256;

    /// Swap `amount_in` of the input asset for the output asset through a
    /// venue, on behalf of `account`. Returns the output amount.
    ///
    /// The venue spends the account's input balance against the allowance
    /// the account granted it.
    fn swap(
        &mut self,
        venue: &[u8; 20],
        account: &[u8; 20],
        input_asset: &[u8; 20],
        output_asset: &[u8; 20],
        amount_in: U256,
    ) -> Result<U256, HostError>;

    /// A holder's native-value balance.
    fn native_balance(&self, holder: &[u8; 20]) -> U256;

    /// Move native value between holders. Used for prefund payment.
    fn pay(&mut self, from: &[u8; 20], to: &[u8; 20], amount: U256) -> Result<(), HostError>;

    /// Issue a passthrough call from `from` to `target`, attaching native
    /// value and opaque call data.
    fn call(
        &mut self,
        from: &[u8; 20],
        target: &[u8; 20],
        value: U256,
        data: &[u8],
    ) -> Result<(), HostError>;
}

//! In-memory host backed by HashMaps.

use std::collections::HashMap;

use cove_core::U256;

use super::{Host, HostError};

/// Exchange rate a venue quotes for any asset pair: out = in * num / den.
#[derive(Clone, Copy, Debug)]
struct VenueRate {
    numerator: u64,
    denominator: u64,
}

/// A passthrough call the host received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    /// The identity that issued the call.
    pub from: [u8; 20],
    /// The call target.
    pub target: [u8; 20],
    /// Native value attached.
    pub value: U256,
    /// Opaque call data.
    pub data: Vec<u8>,
}

/// In-memory ledger for development and tests.
///
/// Tracks asset balances, allowances, native value, registered venues with
/// fixed rates, and a log of passthrough calls.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    /// Asset balances keyed by (asset, holder).
    balances: HashMap<([u8; 20], [u8; 20]), U256>,

    /// Allowances keyed by (asset, owner, spender).
    allowances: HashMap<([u8; 20], [u8; 20], [u8; 20]), U256>,

    /// Native-value balances.
    native: HashMap<[u8; 20], U256>,

    /// Registered venues and their fixed rates.
    venues: HashMap<[u8; 20], VenueRate>,

    /// Passthrough calls received, in order.
    calls: Vec<RecordedCall>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a holder with an asset amount.
    pub fn mint(&mut self, asset: &[u8; 20], holder: &[u8; 20], amount: U256) {
        let entry = self.balances.entry((*asset, *holder)).or_insert_with(U256::zero);
        *entry = *entry + amount;
    }

    /// Credit a holder with native value.
    pub fn fund_native(&mut self, holder: &[u8; 20], amount: U256) {
        let entry = self.native.entry(*holder).or_insert_with(U256::zero);
        *entry = *entry + amount;
    }

    /// Register a venue quoting `numerator / denominator` for every pair.
    pub fn register_venue(&mut self, venue: &[u8; 20], numerator: u64, denominator: u64) {
        assert!(denominator != 0, "venue rate denominator must be non-zero");
        self.venues.insert(
            *venue,
            VenueRate {
                numerator,
                denominator,
            },
        );
    }

    /// The passthrough calls received so far.
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    fn debit(
        &mut self,
        asset: &[u8; 20],
        holder: &[u8; 20],
        amount: U256,
    ) -> Result<(), HostError> {
        let balance = self.balance_of(asset, holder);
        if balance < amount {
            return Err(HostError::InsufficientBalance {
                asset: hex::encode(asset),
                needed: amount,
                available: balance,
            });
        }
        self.balances.insert((*asset, *holder), balance - amount);
        Ok(())
    }
}

impl Host for MemoryHost {
    fn balance_of(&self, asset: &[u8; 20], holder: &[u8; 20]) -> U256 {
        self.balances
            .get(&(*asset, *holder))
            .copied()
            .unwrap_or_else(U256::zero)
    }

    fn transfer(
        &mut self,
        asset: &[u8; 20],
        from: &[u8; 20],
        to: &[u8; 20],
        amount: U256,
    ) -> Result<(), HostError> {
        self.debit(asset, from, amount)?;
        let entry = self.balances.entry((*asset, *to)).or_insert_with(U256::zero);
        *entry = *entry + amount;
        Ok(())
    }

    fn approve(
        &mut self,
        asset: &[u8; 20],
        owner: &[u8; 20],
        spender: &[u8; 20],
        amount: U256,
    ) -> Result<(), HostError> {
        self.allowances.insert((*asset, *owner, *spender), amount);
        Ok(())
    }

    fn allowance(&self, asset: &[u8; 20], owner: &[u8; 20], spender: &[u8; 20]) -> U256 {
        self.allowances
            .get(&(*asset, *owner, *spender))
            .copied()
            .unwrap_or_else(U256::zero)
    }

    fn swap(
        &mut self,
        venue: &[u8; 20],
        account: &[u8; 20],
        input_asset: &[u8; 20],
        output_asset: &[u8; 20],
        amount_in: U256,
    ) -> Result<U256, HostError> {
        let rate = *self
            .venues
            .get(venue)
            .ok_or_else(|| HostError::UnknownVenue(hex::encode(venue)))?;

        let granted = self.allowance(input_asset, account, venue);
        if granted < amount_in {
            return Err(HostError::InsufficientAllowance {
                spender: hex::encode(venue),
                needed: amount_in,
                available: granted,
            });
        }
        // MAX is the unlimited sentinel and is never consumed.
        if granted != U256::MAX {
            self.allowances
                .insert((*input_asset, *account, *venue), granted - amount_in);
        }

        self.transfer(input_asset, account, venue, amount_in)?;

        let amount_out = amount_in * U256::from(rate.numerator) / U256::from(rate.denominator);
        let entry = self
            .balances
            .entry((*output_asset, *account))
            .or_insert_with(U256::zero);
        *entry = *entry + amount_out;

        Ok(amount_out)
    }

    fn native_balance(&self, holder: &[u8; 20]) -> U256 {
        self.native.get(holder).copied().unwrap_or_else(U256::zero)
    }

    fn pay(&mut self, from: &[u8; 20], to: &[u8; 20], amount: U256) -> Result<(), HostError> {
        let balance = self.native_balance(from);
        if balance < amount {
            return Err(HostError::InsufficientBalance {
                asset: "native".to_string(),
                needed: amount,
                available: balance,
            });
        }
        self.native.insert(*from, balance - amount);
        let entry = self.native.entry(*to).or_insert_with(U256::zero);
        *entry = *entry + amount;
        Ok(())
    }

    fn call(
        &mut self,
        from: &[u8; 20],
        target: &[u8; 20],
        value: U256,
        data: &[u8],
    ) -> Result<(), HostError> {
        if !value.is_zero() {
            self.pay(from, target, value)?;
        }
        self.calls.push(RecordedCall {
            from: *from,
            target: *target,
            value,
            data: data.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSET: [u8; 20] = [1u8; 20];
    const ALICE: [u8; 20] = [2u8; 20];
    const BOB: [u8; 20] = [3u8; 20];
    const VENUE: [u8; 20] = [4u8; 20];
    const OUT: [u8; 20] = [5u8; 20];

    #[test]
    fn test_mint_and_transfer() {
        let mut host = MemoryHost::new();
        host.mint(&ASSET, &ALICE, U256::from(100u64));

        host.transfer(&ASSET, &ALICE, &BOB, U256::from(40u64)).unwrap();

        assert_eq!(host.balance_of(&ASSET, &ALICE), U256::from(60u64));
        assert_eq!(host.balance_of(&ASSET, &BOB), U256::from(40u64));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut host = MemoryHost::new();
        host.mint(&ASSET, &ALICE, U256::from(10u64));

        let result = host.transfer(&ASSET, &ALICE, &BOB, U256::from(11u64));
        assert!(matches!(result, Err(HostError::InsufficientBalance { .. })));
        assert_eq!(host.balance_of(&ASSET, &ALICE), U256::from(10u64));
    }

    #[test]
    fn test_swap_at_fixed_rate() {
        let mut host = MemoryHost::new();
        host.register_venue(&VENUE, 2, 1);
        host.mint(&ASSET, &ALICE, U256::from(100u64));
        host.approve(&ASSET, &ALICE, &VENUE, U256::from(100u64)).unwrap();

        let out = host.swap(&VENUE, &ALICE, &ASSET, &OUT, U256::from(30u64)).unwrap();

        assert_eq!(out, U256::from(60u64));
        assert_eq!(host.balance_of(&ASSET, &ALICE), U256::from(70u64));
        assert_eq!(host.balance_of(&OUT, &ALICE), U256::from(60u64));
        assert_eq!(host.allowance(&ASSET, &ALICE, &VENUE), U256::from(70u64));
    }

    #[test]
    fn test_swap_unknown_venue() {
        let mut host = MemoryHost::new();
        let result = host.swap(&VENUE, &ALICE, &ASSET, &OUT, U256::from(1u64));
        assert!(matches!(result, Err(HostError::UnknownVenue(_))));
    }

    #[test]
    fn test_swap_requires_allowance() {
        let mut host = MemoryHost::new();
        host.register_venue(&VENUE, 1, 1);
        host.mint(&ASSET, &ALICE, U256::from(100u64));

        let result = host.swap(&VENUE, &ALICE, &ASSET, &OUT, U256::from(1u64));
        assert!(matches!(result, Err(HostError::InsufficientAllowance { .. })));
    }

    #[test]
    fn test_unlimited_allowance_is_not_consumed() {
        let mut host = MemoryHost::new();
        host.register_venue(&VENUE, 1, 1);
        host.mint(&ASSET, &ALICE, U256::from(100u64));
        host.approve(&ASSET, &ALICE, &VENUE, U256::MAX).unwrap();

        host.swap(&VENUE, &ALICE, &ASSET, &OUT, U256::from(100u64)).unwrap();

        assert_eq!(host.allowance(&ASSET, &ALICE, &VENUE), U256::MAX);
    }

    #[test]
    fn test_pay_moves_native_value() {
        let mut host = MemoryHost::new();
        host.fund_native(&ALICE, U256::from(50u64));

        host.pay(&ALICE, &BOB, U256::from(20u64)).unwrap();

        assert_eq!(host.native_balance(&ALICE), U256::from(30u64));
        assert_eq!(host.native_balance(&BOB), U256::from(20u64));

        let result = host.pay(&ALICE, &BOB, U256::from(31u64));
        assert!(matches!(result, Err(HostError::InsufficientBalance { .. })));
    }

    #[test]
    fn test_call_records_and_transfers_value() {
        let mut host = MemoryHost::new();
        host.fund_native(&ALICE, U256::from(10u64));

        host.call(&ALICE, &BOB, U256::from(10u64), &[0xAB]).unwrap();

        assert_eq!(host.native_balance(&BOB), U256::from(10u64));
        assert_eq!(
            host.calls(),
            &[RecordedCall {
                from: ALICE,
                target: BOB,
                value: U256::from(10u64),
                data: vec![0xAB],
            }]
        );
    }
}

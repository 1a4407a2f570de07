//! Ledger address derivation.
//!
//! An account address is the first 20 bytes of the SHA-256 hash of the
//! passkey's affine coordinates (x then y). Addresses are what the ledger,
//! the executor, and modules use to refer to the account; the full curve
//! point only matters to the signature validator.

use super::hashing::sha256_concat;
use super::keys::PasskeyPublicKey;

/// Derive a ledger address from a passkey public key.
///
/// The address is the first 20 bytes of SHA-256(x || y).
pub fn derive_address(public_key: &PasskeyPublicKey) -> [u8; 20] {
    let hash = sha256_concat(&[&public_key.x, &public_key.y]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[..20]);
    address
}

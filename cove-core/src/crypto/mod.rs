//! Cryptographic primitives for passkey credentials.
//!
//! The account credential is a WebAuthn-style passkey on the NIST P-256
//! curve. This module provides the public-key representation, ECDSA
//! signing and verification with a strict low-s policy, SHA-256 hashing,
//! and ledger-address derivation.

mod address;
mod hashing;
mod keys;
mod signing;

pub use address::derive_address;
pub use hashing::{sha256, sha256_concat};
pub use keys::{actor_id, KeyPair, PasskeyPublicKey};
pub use signing::{complement_s, verify};

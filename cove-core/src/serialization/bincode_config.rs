//! Deterministic bincode configuration.
//!
//! Operation hashes are computed over encoded bytes, and signature
//! envelopes and module settings round-trip through the account's storage,
//! so the encoding must be byte-stable: fixed-width integers, little-endian
//! byte order, and no tolerance for trailing garbage on decode.

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::SerializationError;

fn config() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Encode a value to its canonical byte form.
///
/// Identical values always encode to identical bytes, on every platform.
pub fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    config()
        .serialize(value)
        .map_err(|e| SerializationError::EncodeFailed(e.to_string()))
}

/// Decode a value from its canonical byte form.
///
/// Fails on malformed bytes, on a type mismatch, and on trailing bytes
/// after the value.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    config()
        .deserialize(bytes)
        .map_err(|e| SerializationError::DecodeFailed(e.to_string()))
}

//! Callable-entry-point selectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::sha256;

/// A 4-byte identifier naming a callable entry point on an account.
///
/// Selectors are derived from the entry point's name, truncated from its
/// SHA-256 hash. The zero selector is reserved for "no call" and never
/// names a real entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    /// The reserved "no call" selector.
    pub const ZERO: Selector = Selector([0u8; 4]);

    /// Derive a selector from an entry point name.
    pub fn from_name(name: &str) -> Self {
        let hash = sha256(name.as_bytes());
        Selector([hash[0], hash[1], hash[2], hash[3]])
    }

    /// Whether this is the reserved zero selector.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 4]
    }

    /// The raw selector bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

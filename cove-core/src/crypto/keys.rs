//! P-256 passkey keys.
//!
//! The account stores its credential as the affine coordinates of a P-256
//! point, the form a WebAuthn authenticator exports. [`KeyPair`] is the
//! signing side, used by wallets and test harnesses to produce assertions;
//! the kernel itself only ever sees [`PasskeyPublicKey`].

use p256::ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::{EncodedPoint, FieldBytes};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use super::hashing::sha256;
use crate::error::CryptoError;

/// A P-256 public key as affine coordinates.
///
/// Both coordinates are big-endian 32-byte values, matching the layout a
/// WebAuthn authenticator reports when a passkey is created. The all-zero
/// point is reserved as "uninitialized" and is rejected by the account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasskeyPublicKey {
    /// X coordinate, big-endian.
    pub x: [u8; 32],
    /// Y coordinate, big-endian.
    pub y: [u8; 32],
}

impl PasskeyPublicKey {
    /// Create a key from raw affine coordinates.
    pub fn new(x: [u8; 32], y: [u8; 32]) -> Self {
        PasskeyPublicKey { x, y }
    }

    /// The reserved uninitialized point.
    pub fn zero() -> Self {
        PasskeyPublicKey { x: [0u8; 32], y: [0u8; 32] }
    }

    /// Whether both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == [0u8; 32] && self.y == [0u8; 32]
    }

    /// Reconstruct the verifying key, checking the point is on the curve.
    pub fn verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        let point = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(&self.x),
            FieldBytes::from_slice(&self.y),
            false,
        );
        VerifyingKey::from_encoded_point(&point).map_err(|_| CryptoError::InvalidPublicKey)
    }
}

/// P-256 key pair for producing passkey assertions.
///
/// The secret key never leaves this type. The kernel never holds one;
/// it exists for the signing side (wallets, test harnesses).
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new random key pair using the OS random number generator.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        KeyPair { signing_key }
    }

    /// Create a key pair from a 32-byte secret scalar.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes(FieldBytes::from_slice(bytes)).map_err(|_| CryptoError::InvalidSecretKey)?;
        Ok(KeyPair { signing_key })
    }

    /// Get the public key as affine coordinates.
    pub fn public_key(&self) -> PasskeyPublicKey {
        let point = self.signing_key.verifying_key().to_encoded_point(false);
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        // An uncompressed point from a valid key always carries both coordinates.
        x.copy_from_slice(point.x().expect("uncompressed point has x"));
        y.copy_from_slice(point.y().expect("uncompressed point has y"));
        PasskeyPublicKey { x, y }
    }

    /// Sign a message, returning the `(r, s)` pair in canonical low-s form.
    ///
    /// The message is hashed with SHA-256 before signing, matching the
    /// WebAuthn assertion flow.
    pub fn sign(&self, message: &[u8]) -> Result<([u8; 32], [u8; 32]), CryptoError> {
        let digest = sha256(message);
        let signature: Signature = self
            .signing_key
            .sign_prehash(&digest)
            .map_err(|_| CryptoError::SigningFailed)?;
        let signature = signature.normalize_s().unwrap_or(signature);

        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok((r, s))
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        KeyPair {
            signing_key: self.signing_key.clone(),
        }
    }
}

/// Derive a placeholder ledger identity from a label.
///
/// Convenience for tests and fixtures that need distinct well-known
/// actor ids (executor, venue, assets) without a real key behind them.
pub fn actor_id(label: &str) -> [u8; 20] {
    let hash = sha256(label.as_bytes());
    let mut id = [0u8; 20];
    id.copy_from_slice(&hash[..20]);
    id
}

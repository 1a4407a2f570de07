//! Error types for the Cove core crate.

use std::fmt;

/// Top-level error type for cove-core operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Cryptographic operation failed.
    Crypto(CryptoError),
    /// Serialization or deserialization failed.
    Serialization(SerializationError),
    /// Malformed signing challenge.
    Challenge(ChallengeError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Crypto(e) => write!(f, "crypto error: {}", e),
            CoreError::Serialization(e) => write!(f, "serialization error: {}", e),
            CoreError::Challenge(e) => write!(f, "challenge error: {}", e),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<CryptoError> for CoreError {
    fn from(e: CryptoError) -> Self {
        CoreError::Crypto(e)
    }
}

impl From<SerializationError> for CoreError {
    fn from(e: SerializationError) -> Self {
        CoreError::Serialization(e)
    }
}

impl From<ChallengeError> for CoreError {
    fn from(e: ChallengeError) -> Self {
        CoreError::Challenge(e)
    }
}

/// Errors related to cryptographic operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CryptoError {
    /// The public key is not a valid P-256 point.
    InvalidPublicKey,
    /// The secret key is malformed or out of range.
    InvalidSecretKey,
    /// The (r, s) pair is not a well-formed signature.
    InvalidSignature,
    /// The signature uses the non-canonical high-s form.
    MalleableSignature,
    /// Signature verification failed (signature doesn't match digest/key).
    SignatureVerificationFailed,
    /// Signing failed (secret key rejected the digest).
    SigningFailed,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidPublicKey => write!(f, "invalid P-256 public key"),
            CryptoError::InvalidSecretKey => write!(f, "invalid secret key"),
            CryptoError::InvalidSignature => write!(f, "invalid signature format"),
            CryptoError::MalleableSignature => write!(f, "signature s value is not canonical"),
            CryptoError::SignatureVerificationFailed => write!(f, "signature verification failed"),
            CryptoError::SigningFailed => write!(f, "signing failed"),
        }
    }
}

impl std::error::Error for CryptoError {}

/// Errors related to serialization and deserialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to encode data to bytes.
    EncodeFailed(String),
    /// Failed to decode data from bytes.
    DecodeFailed(String),
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::EncodeFailed(msg) => write!(f, "encode failed: {}", msg),
            SerializationError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
        }
    }
}

impl std::error::Error for SerializationError {}

/// Errors related to the signing-challenge byte layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChallengeError {
    /// Challenge is not exactly 39 bytes.
    Length {
        /// The length that was supplied.
        got: usize,
    },
    /// Challenge carries an unknown version byte.
    Version {
        /// The version byte that was supplied.
        got: u8,
    },
    /// Expiration timestamp does not fit in 48 bits.
    ValidUntilRange,
}

impl fmt::Display for ChallengeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeError::Length { got } => {
                write!(f, "challenge must be 39 bytes, got {}", got)
            }
            ChallengeError::Version { got } => {
                write!(f, "unsupported challenge version {}", got)
            }
            ChallengeError::ValidUntilRange => {
                write!(f, "valid_until exceeds 48 bits")
            }
        }
    }
}

impl std::error::Error for ChallengeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = CoreError::Crypto(CryptoError::MalleableSignature);
        assert!(e.to_string().contains("not canonical"));

        let e = CoreError::Serialization(SerializationError::DecodeFailed("bad".into()));
        assert!(e.to_string().contains("decode failed"));

        let e = CoreError::Challenge(ChallengeError::Length { got: 12 });
        assert!(e.to_string().contains("39 bytes"));
    }

    #[test]
    fn test_error_conversion() {
        let err: CoreError = CryptoError::InvalidPublicKey.into();
        assert!(matches!(err, CoreError::Crypto(CryptoError::InvalidPublicKey)));

        let err: CoreError = ChallengeError::ValidUntilRange.into();
        assert!(matches!(err, CoreError::Challenge(ChallengeError::ValidUntilRange)));
    }
}

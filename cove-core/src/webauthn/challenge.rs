//! Signing-challenge byte layout.

use crate::error::ChallengeError;

/// The only challenge version the kernel understands.
pub const CHALLENGE_VERSION: u8 = 1;

/// Encoded challenge length: version (1) + valid-until (6) + hash (32).
pub const CHALLENGE_LEN: usize = 39;

/// The signing challenge embedded in a passkey assertion.
///
/// Wire layout is 39 bytes: a version byte, the expiration as a 6-byte
/// big-endian unsigned integer, and the 32-byte operation hash. A
/// `valid_until` of zero means the assertion never expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Challenge {
    /// Challenge layout version.
    pub version: u8,

    /// Expiration timestamp in unix seconds; zero for no expiration.
    pub valid_until: u64,

    /// The hash of the operation this assertion authorizes.
    pub operation_hash: [u8; 32],
}

impl Challenge {
    /// Build a current-version challenge.
    ///
    /// Fails if `valid_until` does not fit in 48 bits.
    pub fn new(valid_until: u64, operation_hash: [u8; 32]) -> Result<Self, ChallengeError> {
        if valid_until >> 48 != 0 {
            return Err(ChallengeError::ValidUntilRange);
        }
        Ok(Challenge {
            version: CHALLENGE_VERSION,
            valid_until,
            operation_hash,
        })
    }

    /// Encode to the 39-byte wire layout.
    pub fn encode(&self) -> [u8; CHALLENGE_LEN] {
        let mut bytes = [0u8; CHALLENGE_LEN];
        bytes[0] = self.version;
        bytes[1..7].copy_from_slice(&self.valid_until.to_be_bytes()[2..8]);
        bytes[7..39].copy_from_slice(&self.operation_hash);
        bytes
    }

    /// Decode from the wire layout.
    ///
    /// Rejects any length other than 39 bytes and any version other than
    /// the current one.
    pub fn decode(bytes: &[u8]) -> Result<Self, ChallengeError> {
        if bytes.len() != CHALLENGE_LEN {
            return Err(ChallengeError::Length { got: bytes.len() });
        }
        if bytes[0] != CHALLENGE_VERSION {
            return Err(ChallengeError::Version { got: bytes[0] });
        }

        let mut valid_until_bytes = [0u8; 8];
        valid_until_bytes[2..8].copy_from_slice(&bytes[1..7]);
        let valid_until = u64::from_be_bytes(valid_until_bytes);

        let mut operation_hash = [0u8; 32];
        operation_hash.copy_from_slice(&bytes[7..39]);

        Ok(Challenge {
            version: bytes[0],
            valid_until,
            operation_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let challenge = Challenge::new(1_700_000_000, [0xAB; 32]).unwrap();
        let bytes = challenge.encode();
        assert_eq!(bytes.len(), CHALLENGE_LEN);
        assert_eq!(Challenge::decode(&bytes).unwrap(), challenge);
    }

    #[test]
    fn test_no_expiration_encodes_as_zero() {
        let challenge = Challenge::new(0, [1u8; 32]).unwrap();
        let bytes = challenge.encode();
        assert_eq!(&bytes[1..7], &[0u8; 6]);
        assert_eq!(Challenge::decode(&bytes).unwrap().valid_until, 0);
    }

    #[test]
    fn test_valid_until_is_big_endian_48_bits() {
        let challenge = Challenge::new(0x0102_0304_0506, [0u8; 32]).unwrap();
        let bytes = challenge.encode();
        assert_eq!(&bytes[1..7], &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    }

    #[test]
    fn test_valid_until_out_of_range() {
        let result = Challenge::new(1u64 << 48, [0u8; 32]);
        assert_eq!(result, Err(ChallengeError::ValidUntilRange));
    }

    #[test]
    fn test_decode_wrong_length() {
        let result = Challenge::decode(&[0u8; 38]);
        assert_eq!(result, Err(ChallengeError::Length { got: 38 }));
    }

    #[test]
    fn test_decode_wrong_version() {
        let mut bytes = Challenge::new(0, [0u8; 32]).unwrap().encode();
        bytes[0] = 2;
        assert_eq!(Challenge::decode(&bytes), Err(ChallengeError::Version { got: 2 }));
    }
}

//! Passkey assertion envelope and verification.
//!
//! A [`PasskeySignature`] carries everything a WebAuthn authenticator
//! reports for an assertion: the challenge it signed, the authenticator
//! data, the client data JSON, the offsets of the claims the verifier must
//! check inside that JSON, and the `(r, s)` signature itself.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::crypto::{sha256, verify, KeyPair, PasskeyPublicKey};
use crate::error::{CoreError, CryptoError, SerializationError};
use crate::serialization;
use crate::webauthn::Challenge;

/// Minimum authenticator data length: RP ID hash (32) + flags (1) + counter (4).
const AUTHENTICATOR_DATA_MIN_LEN: usize = 37;

/// Authenticator flags byte: bit 0 = user presence, bit 2 = user verification.
const FLAG_USER_PRESENT: u8 = 0x01;
const FLAG_USER_VERIFIED: u8 = 0x04;

/// The assertion type literal a `webauthn.get` response declares.
const ASSERTION_TYPE_CLAIM: &str = "\"type\":\"webauthn.get\"";

/// Build the client data JSON for a challenge.
///
/// Key order matters: the verifier checks the type and challenge claims at
/// declared byte offsets, so the layout must match what the signer produced.
pub fn client_data_json(challenge: &[u8]) -> String {
    format!(
        "{{\"type\":\"webauthn.get\",\"challenge\":\"{}\",\"origin\":\"http://localhost:3000\",\"crossOrigin\":false}}",
        URL_SAFE_NO_PAD.encode(challenge)
    )
}

/// Reasons an assertion fails verification.
///
/// All of these are credential failures, not structural ones: the envelope
/// decoded fine but the assertion does not authenticate the challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssertionError {
    /// Authenticator data is shorter than the fixed header.
    AuthenticatorDataTooShort {
        /// The length that was supplied.
        got: usize,
    },
    /// The user-presence flag is not set.
    UserPresenceMissing,
    /// User verification was required but its flag is not set.
    UserVerificationMissing,
    /// The type claim at the declared offset is not `webauthn.get`.
    TypeClaimMismatch,
    /// The challenge claim at the declared offset does not match the
    /// signed challenge.
    ChallengeClaimMismatch,
    /// The `(r, s)` pair does not verify against the key, or is not in
    /// canonical low-s form.
    Signature(CryptoError),
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionError::AuthenticatorDataTooShort { got } => {
                write!(f, "authenticator data too short: {} bytes", got)
            }
            AssertionError::UserPresenceMissing => write!(f, "user presence flag not set"),
            AssertionError::UserVerificationMissing => {
                write!(f, "user verification required but flag not set")
            }
            AssertionError::TypeClaimMismatch => write!(f, "type claim mismatch"),
            AssertionError::ChallengeClaimMismatch => write!(f, "challenge claim mismatch"),
            AssertionError::Signature(e) => write!(f, "signature check failed: {}", e),
        }
    }
}

impl std::error::Error for AssertionError {}

/// A decoded passkey assertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasskeySignature {
    /// The challenge bytes the authenticator signed over.
    pub challenge: Vec<u8>,

    /// Raw authenticator data (RP ID hash, flags, counter, extensions).
    pub authenticator_data: Vec<u8>,

    /// Whether the verifier must insist on the user-verification flag.
    pub require_user_verification: bool,

    /// The client data JSON the authenticator produced.
    pub client_data_json: String,

    /// Byte offset of the challenge claim inside `client_data_json`.
    pub challenge_location: u32,

    /// Byte offset of the type claim inside `client_data_json`.
    pub response_type_location: u32,

    /// Signature r component, big-endian.
    pub r: [u8; 32],

    /// Signature s component, big-endian; must be canonical low-s.
    pub s: [u8; 32],
}

impl PasskeySignature {
    /// Produce an assertion over an operation hash with a signing key pair.
    ///
    /// This is the signing side of the protocol, used by wallets and test
    /// harnesses. The authenticator data is synthesized with the
    /// user-presence and user-verification flags set and a zero counter.
    pub fn create(
        key_pair: &KeyPair,
        operation_hash: [u8; 32],
        valid_until: u64,
    ) -> Result<Self, CoreError> {
        let challenge = Challenge::new(valid_until, operation_hash)?;
        let challenge_bytes = challenge.encode();

        let mut authenticator_data = Vec::with_capacity(AUTHENTICATOR_DATA_MIN_LEN);
        authenticator_data.extend_from_slice(&sha256(b"localhost"));
        authenticator_data.push(FLAG_USER_PRESENT | FLAG_USER_VERIFIED);
        authenticator_data.extend_from_slice(&0u32.to_be_bytes());

        let client_data = client_data_json(&challenge_bytes);
        let client_data_hash = sha256(client_data.as_bytes());

        let challenge_location = client_data
            .find("\"challenge\":")
            .expect("client data carries a challenge claim") as u32;
        let response_type_location = client_data
            .find(ASSERTION_TYPE_CLAIM)
            .expect("client data carries a type claim") as u32;

        let mut message = authenticator_data.clone();
        message.extend_from_slice(&client_data_hash);
        let (r, s) = key_pair.sign(&message)?;

        Ok(PasskeySignature {
            challenge: challenge_bytes.to_vec(),
            authenticator_data,
            require_user_verification: false,
            client_data_json: client_data,
            challenge_location,
            response_type_location,
            r,
            s,
        })
    }

    /// Encode into the operation signature field.
    pub fn encode(&self) -> Result<Vec<u8>, SerializationError> {
        serialization::serialize(self)
    }

    /// Decode from an operation signature field.
    pub fn decode(bytes: &[u8]) -> Result<Self, SerializationError> {
        serialization::deserialize(bytes)
    }

    /// Verify the assertion against a public key.
    ///
    /// Checks, in order: the authenticator data header and flags, the type
    /// claim, the challenge claim, then the ECDSA signature over
    /// `authenticator_data || sha256(client_data_json)`. Any failure means
    /// the credential did not authenticate the challenge.
    pub fn verify(&self, public_key: &PasskeyPublicKey) -> Result<(), AssertionError> {
        if self.authenticator_data.len() < AUTHENTICATOR_DATA_MIN_LEN {
            return Err(AssertionError::AuthenticatorDataTooShort {
                got: self.authenticator_data.len(),
            });
        }

        let flags = self.authenticator_data[32];
        if flags & FLAG_USER_PRESENT == 0 {
            return Err(AssertionError::UserPresenceMissing);
        }
        if self.require_user_verification && flags & FLAG_USER_VERIFIED == 0 {
            return Err(AssertionError::UserVerificationMissing);
        }

        if !claim_at(&self.client_data_json, self.response_type_location, ASSERTION_TYPE_CLAIM) {
            return Err(AssertionError::TypeClaimMismatch);
        }

        let challenge_claim =
            format!("\"challenge\":\"{}\"", URL_SAFE_NO_PAD.encode(&self.challenge));
        if !claim_at(&self.client_data_json, self.challenge_location, &challenge_claim) {
            return Err(AssertionError::ChallengeClaimMismatch);
        }

        let client_data_hash = sha256(self.client_data_json.as_bytes());
        let mut message = Vec::with_capacity(self.authenticator_data.len() + 32);
        message.extend_from_slice(&self.authenticator_data);
        message.extend_from_slice(&client_data_hash);
        verify(public_key, &message, &self.r, &self.s).map_err(AssertionError::Signature)
    }
}

/// Whether `expected` appears verbatim at byte `offset` of `json`.
fn claim_at(json: &str, offset: u32, expected: &str) -> bool {
    let offset = offset as usize;
    match json.as_bytes().get(offset..offset + expected.len()) {
        Some(slice) => slice == expected.as_bytes(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::complement_s;

    fn sample_assertion() -> (KeyPair, PasskeySignature) {
        let kp = KeyPair::generate();
        let sig = PasskeySignature::create(&kp, [0x42; 32], 0).unwrap();
        (kp, sig)
    }

    #[test]
    fn test_create_and_verify() {
        let (kp, sig) = sample_assertion();
        assert!(sig.verify(&kp.public_key()).is_ok());
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let (_, sig) = sample_assertion();
        let other = KeyPair::generate();
        assert!(matches!(
            sig.verify(&other.public_key()),
            Err(AssertionError::Signature(_))
        ));
    }

    #[test]
    fn test_high_s_is_rejected() {
        let (kp, mut sig) = sample_assertion();
        sig.s = complement_s(&sig.s).unwrap();
        assert_eq!(
            sig.verify(&kp.public_key()),
            Err(AssertionError::Signature(CryptoError::MalleableSignature))
        );
    }

    #[test]
    fn test_short_authenticator_data() {
        let (kp, mut sig) = sample_assertion();
        sig.authenticator_data.truncate(36);
        assert_eq!(
            sig.verify(&kp.public_key()),
            Err(AssertionError::AuthenticatorDataTooShort { got: 36 })
        );
    }

    #[test]
    fn test_missing_user_presence() {
        let (kp, mut sig) = sample_assertion();
        sig.authenticator_data[32] = 0;
        assert_eq!(sig.verify(&kp.public_key()), Err(AssertionError::UserPresenceMissing));
    }

    #[test]
    fn test_required_user_verification() {
        let (kp, mut sig) = sample_assertion();
        sig.require_user_verification = true;
        assert!(sig.verify(&kp.public_key()).is_ok());

        sig.authenticator_data[32] = FLAG_USER_PRESENT;
        assert_eq!(
            sig.verify(&kp.public_key()),
            Err(AssertionError::UserVerificationMissing)
        );
    }

    #[test]
    fn test_wrong_type_offset() {
        let (kp, mut sig) = sample_assertion();
        sig.response_type_location += 1;
        assert_eq!(sig.verify(&kp.public_key()), Err(AssertionError::TypeClaimMismatch));
    }

    #[test]
    fn test_tampered_challenge_claim() {
        let (kp, mut sig) = sample_assertion();
        // Claim a different challenge than the JSON embeds.
        sig.challenge[10] ^= 0xFF;
        assert_eq!(
            sig.verify(&kp.public_key()),
            Err(AssertionError::ChallengeClaimMismatch)
        );
    }

    #[test]
    fn test_tampered_client_data_breaks_signature() {
        let (kp, mut sig) = sample_assertion();
        sig.client_data_json = sig
            .client_data_json
            .replace("localhost:3000", "localhost:3001");
        assert!(matches!(
            sig.verify(&kp.public_key()),
            Err(AssertionError::Signature(_))
        ));
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let (_, sig) = sample_assertion();
        let bytes = sig.encode().unwrap();
        assert_eq!(PasskeySignature::decode(&bytes).unwrap(), sig);
    }

    #[test]
    fn test_claim_offsets_match_layout() {
        let (_, sig) = sample_assertion();
        assert_eq!(sig.response_type_location, 1);
        assert_eq!(sig.challenge_location, 23);
    }
}

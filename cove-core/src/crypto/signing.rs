//! P-256 ECDSA verification with a strict low-s policy.
//!
//! ECDSA signatures are malleable: for any valid `(r, s)` the pair
//! `(r, n - s)` also verifies. The kernel accepts only the canonical
//! low-s form and rejects the high-s twin outright rather than
//! normalizing it. Signers are expected to pre-normalize.

use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::Signature;
use p256::elliptic_curve::scalar::IsHigh;
use p256::elliptic_curve::PrimeField;
use p256::Scalar;

use super::hashing::sha256;
use super::keys::PasskeyPublicKey;
use crate::error::CryptoError;

/// Verify a `(r, s)` signature over a message against a passkey public key.
///
/// The message is hashed with SHA-256 to produce the signing digest. Fails
/// with [`CryptoError::MalleableSignature`] when `s` exceeds half the curve
/// order, even if the signature would otherwise verify.
pub fn verify(
    public_key: &PasskeyPublicKey,
    message: &[u8],
    r: &[u8; 32],
    s: &[u8; 32],
) -> Result<(), CryptoError> {
    let key = public_key.verifying_key()?;
    let signature =
        Signature::from_scalars(*r, *s).map_err(|_| CryptoError::InvalidSignature)?;

    if bool::from(signature.s().is_high()) {
        return Err(CryptoError::MalleableSignature);
    }

    let digest = sha256(message);
    key.verify_prehash(&digest, &signature)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

/// Return `n - s`, the non-canonical twin of an `s` value.
///
/// A signature rebuilt with the complemented `s` still satisfies the ECDSA
/// equation but fails the low-s policy. Exists so callers can exercise the
/// malleability rejection path.
pub fn complement_s(s: &[u8; 32]) -> Result<[u8; 32], CryptoError> {
    let scalar = Option::<Scalar>::from(Scalar::from_repr((*s).into()))
        .ok_or(CryptoError::InvalidSignature)?;
    let negated = -scalar;
    Ok(negated.to_bytes().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    #[test]
    fn test_sign_verify_roundtrip() {
        let kp = KeyPair::generate();
        let message = b"authenticator data and client data hash";

        let (r, s) = kp.sign(message).unwrap();
        assert!(verify(&kp.public_key(), message, &r, &s).is_ok());
    }

    #[test]
    fn test_verify_wrong_message_fails() {
        let kp = KeyPair::generate();
        let (r, s) = kp.sign(b"signed message").unwrap();

        let result = verify(&kp.public_key(), b"different message", &r, &s);
        assert_eq!(result, Err(CryptoError::SignatureVerificationFailed));
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();
        let (r, s) = kp1.sign(b"message").unwrap();

        assert!(verify(&kp2.public_key(), b"message", &r, &s).is_err());
    }

    #[test]
    fn test_high_s_twin_is_rejected() {
        let kp = KeyPair::generate();
        let message = b"message";
        let (r, s) = kp.sign(message).unwrap();

        let high_s = complement_s(&s).unwrap();
        let result = verify(&kp.public_key(), message, &r, &high_s);
        assert_eq!(result, Err(CryptoError::MalleableSignature));
    }

    #[test]
    fn test_complement_is_involutive() {
        let kp = KeyPair::generate();
        let (_, s) = kp.sign(b"message").unwrap();

        let twice = complement_s(&complement_s(&s).unwrap()).unwrap();
        assert_eq!(s, twice);
    }

    #[test]
    fn test_zero_r_is_malformed() {
        let kp = KeyPair::generate();
        let (_, s) = kp.sign(b"message").unwrap();

        let result = verify(&kp.public_key(), b"message", &[0u8; 32], &s);
        assert_eq!(result, Err(CryptoError::InvalidSignature));
    }
}

//! WebAuthn passkey assertions.
//!
//! An operation is authenticated by a WebAuthn-style assertion: the signing
//! challenge carries the operation hash and an expiration, the client data
//! JSON embeds the challenge, and the signature covers the authenticator
//! data concatenated with the client data hash.

mod assertion;
mod challenge;

pub use assertion::{client_data_json, AssertionError, PasskeySignature};
pub use challenge::{Challenge, CHALLENGE_LEN, CHALLENGE_VERSION};

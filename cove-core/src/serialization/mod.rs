//! Deterministic serialization.
//!
//! Signature envelopes, call arguments, and module settings all travel as
//! bytes; the encoding must be byte-identical for identical values so
//! operation hashes stay stable.

mod bincode_config;

pub use bincode_config::{deserialize, serialize};

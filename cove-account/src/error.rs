//! Error types for account state transitions.
//!
//! Failures come in two tiers. Everything in this module is the hard tier:
//! the call aborts and leaves no partial effect. Credential and timing
//! checks instead return the soft [`ValidationCode`] so the executor can
//! apply its own penalty policy; the two channels are never collapsed.
//!
//! [`ValidationCode`]: crate::execute::ValidationCode

use cove_core::Selector;

use crate::host::HostError;

/// Why a code unit cannot be installed as a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The unit does not answer the introspection probe at all.
    MissingIntrospection,
    /// The unit answers the probe but does not advertise the module
    /// capability.
    NotAModule,
}

/// Failures raised by module hooks and handlers.
///
/// These surface to the caller wrapped in [`AccountError::InstallFailed`]
/// or [`AccountError::Module`], carrying the module identity as evidence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleError {
    /// Configured venue is the zero identity.
    InvalidVenue,
    /// An asset is the zero identity, or input equals output.
    InvalidAsset,
    /// Period length is zero days.
    InvalidPeriodLength,
    /// Per-period amount is zero.
    InvalidAmount,
    /// Window starts in the past or ends before it starts.
    InvalidWindow,
    /// The action is not allowed right now: before the window, after it,
    /// or the current period already executed.
    NotAllowed,
    /// The module's namespaced state is missing.
    StateMissing,
    /// The init payload or call arguments did not decode.
    MalformedPayload(String),
    /// An outbound host call failed.
    Host(HostError),
}

impl std::fmt::Display for ModuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleError::InvalidVenue => write!(f, "invalid venue"),
            ModuleError::InvalidAsset => write!(f, "invalid asset pair"),
            ModuleError::InvalidPeriodLength => write!(f, "period length must be at least one day"),
            ModuleError::InvalidAmount => write!(f, "amount per period must be non-zero"),
            ModuleError::InvalidWindow => write!(f, "invalid execution window"),
            ModuleError::NotAllowed => write!(f, "action not allowed right now"),
            ModuleError::StateMissing => write!(f, "module state missing"),
            ModuleError::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
            ModuleError::Host(e) => write!(f, "host call failed: {}", e),
        }
    }
}

impl std::error::Error for ModuleError {}

impl From<HostError> for ModuleError {
    fn from(e: HostError) -> Self {
        ModuleError::Host(e)
    }
}

/// All hard failures for account operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountError {
    /// Caller is not the trusted executor.
    UnauthorizedCaller { expected: [u8; 20], actual: [u8; 20] },
    /// Operation nonce does not equal the account's counter exactly.
    NonceMismatch { expected: u64, got: u64 },
    /// The signature envelope or its challenge did not decode.
    MalformedSignature(String),
    /// The call arguments for a built-in entry point did not decode.
    MalformedCallArgs(String),
    /// No code unit deployed under this identity.
    UnknownCodeUnit { module: [u8; 20] },
    /// The code unit cannot act as a module.
    UnsupportedModule {
        module: [u8; 20],
        reason: UnsupportedReason,
    },
    /// Module is already installed.
    ModuleAlreadyInstalled { module: [u8; 20] },
    /// Module is not currently installed.
    ModuleNotInstalled { module: [u8; 20] },
    /// A declared selector is already owned.
    SelectorInUse { selector: Selector, owner: [u8; 20] },
    /// No installed module owns this selector.
    UnknownSelector { selector: Selector },
    /// The module's install hook failed; nothing was installed.
    InstallFailed { module: [u8; 20], reason: ModuleError },
    /// A module hook or handler failed.
    Module { module: [u8; 20], reason: ModuleError },
    /// The replacement public key is zero or not on the curve.
    InvalidPublicKey,
    /// The hosting ledger rejected an outbound call.
    Host(HostError),
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountError::UnauthorizedCaller { expected, actual } => {
                write!(
                    f,
                    "unauthorized caller: expected {}, got {}",
                    hex::encode(&expected[..4]),
                    hex::encode(&actual[..4])
                )
            }
            AccountError::NonceMismatch { expected, got } => {
                write!(f, "nonce mismatch: expected {}, got {}", expected, got)
            }
            AccountError::MalformedSignature(msg) => {
                write!(f, "malformed signature encoding: {}", msg)
            }
            AccountError::MalformedCallArgs(msg) => {
                write!(f, "malformed call arguments: {}", msg)
            }
            AccountError::UnknownCodeUnit { module } => {
                write!(f, "unknown code unit: {}", hex::encode(&module[..4]))
            }
            AccountError::UnsupportedModule { module, reason } => match reason {
                UnsupportedReason::MissingIntrospection => {
                    write!(
                        f,
                        "code unit {} does not support introspection",
                        hex::encode(&module[..4])
                    )
                }
                UnsupportedReason::NotAModule => {
                    write!(f, "code unit {} is not a module", hex::encode(&module[..4]))
                }
            },
            AccountError::ModuleAlreadyInstalled { module } => {
                write!(f, "module already installed: {}", hex::encode(&module[..4]))
            }
            AccountError::ModuleNotInstalled { module } => {
                write!(f, "module not installed: {}", hex::encode(&module[..4]))
            }
            AccountError::SelectorInUse { selector, owner } => {
                write!(
                    f,
                    "selector {} already owned by {}",
                    selector,
                    hex::encode(&owner[..4])
                )
            }
            AccountError::UnknownSelector { selector } => {
                write!(f, "unknown selector: {}", selector)
            }
            AccountError::InstallFailed { module, reason } => {
                write!(
                    f,
                    "install of {} failed: {}",
                    hex::encode(&module[..4]),
                    reason
                )
            }
            AccountError::Module { module, reason } => {
                write!(f, "module {} failed: {}", hex::encode(&module[..4]), reason)
            }
            AccountError::InvalidPublicKey => write!(f, "invalid public key"),
            AccountError::Host(e) => write!(f, "host error: {}", e),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<HostError> for AccountError {
    fn from(e: HostError) -> Self {
        AccountError::Host(e)
    }
}

/// Result type for account operations.
pub type AccountResult<T> = Result<T, AccountError>;

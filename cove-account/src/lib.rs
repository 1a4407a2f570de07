//! Account state machine for the Cove kernel.
//!
//! A Cove account is self-custodial: actions are authenticated with a
//! WebAuthn-style P-256 passkey instead of a caller-held private key, and
//! the account's callable surface grows at runtime through installable
//! modules. A single trusted executor submits batched, pre-validated
//! operations on the account's behalf.
//!
//! # Key Components
//!
//! - [`AccountState`]: the durable state container (credential, nonce,
//!   selector table, installed modules, namespaced module storage)
//! - [`validate_operation`] / [`execute_operation`]: the signature
//!   validation state machine and the nonce-consuming execution path
//! - [`install_module`] / [`uninstall_module`] / [`dispatch_call`]: the
//!   module registry and dispatcher
//! - [`RecurringSwapModule`]: the worked example module, a time-gated
//!   idempotent periodic swap
//! - [`Host`]: the hosting-ledger boundary, with [`MemoryHost`] as the
//!   in-memory implementation for development and tests
//!
//! # Example
//!
//! ```ignore
//! use cove_account::{AccountState, CallContext, execute_operation};
//!
//! let mut state = AccountState::new(executor, passkey)?;
//! let ctx = CallContext::new(executor, timestamp);
//! let outcome = execute_operation(&mut state, &catalog, &mut host, &ctx, &op, prefund)?;
//! ```

mod error;
mod execute;
mod host;
mod modules;
mod recurring;
mod state;

pub use error::{AccountError, AccountResult, ModuleError, UnsupportedReason};
pub use execute::{
    add_module_selector, execute_operation, execute_selector, remove_module_selector,
    transfer_ownership, transfer_ownership_selector, validate_operation, AddModuleArgs,
    CallContext, ExecuteArgs, OperationOutcome, RemoveModuleArgs, TransferOwnershipArgs,
    ValidationCode,
};
pub use host::{Host, HostError, MemoryHost, RecordedCall};
pub use modules::{
    dispatch_call, install_module, uninstall_module, AccountModule, CapabilitySet, CodeUnit,
    ModuleCatalog, ModuleContext,
};
pub use recurring::{
    settings_selector, trigger_selector, RecurringConfig, RecurringSettings, RecurringSwapModule,
    SECONDS_PER_DAY,
};
pub use state::{AccountEvent, AccountState, StorageArena};

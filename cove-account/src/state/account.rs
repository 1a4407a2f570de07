//! The account's durable state.

use std::collections::{BTreeSet, HashMap};

use cove_core::crypto::derive_address;
use cove_core::{PasskeyPublicKey, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{AccountError, AccountResult};

use super::{AccountEvent, StorageArena};

/// Everything the ledger persists for one account.
///
/// The selector table and installed set always change together: a module
/// owns its selectors exactly while it is installed. The nonce only ever
/// increases, one step per executed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// The account's own ledger identity.
    pub(crate) address: [u8; 20],

    /// The active passkey credential. Exactly one at a time, never zero.
    pub(crate) public_key: PasskeyPublicKey,

    /// The single identity trusted to submit operations. Immutable.
    pub(crate) executor: [u8; 20],

    /// Strictly increasing operation counter.
    pub(crate) nonce: u64,

    /// Selector to owning module. At most one owner per selector.
    pub(crate) selector_table: HashMap<Selector, [u8; 20]>,

    /// Currently installed modules, sorted for deterministic iteration.
    pub(crate) installed: BTreeSet<[u8; 20]>,

    /// Per-module namespaced storage.
    pub(crate) storage: StorageArena,

    /// Notification log.
    pub(crate) events: Vec<AccountEvent>,
}

impl AccountState {
    /// Create an account bound to an executor and an initial passkey.
    ///
    /// The address is derived from the initial key and never changes,
    /// even across ownership transfers. Rejects the zero point.
    pub fn new(executor: [u8; 20], public_key: PasskeyPublicKey) -> AccountResult<Self> {
        if public_key.is_zero() || public_key.verifying_key().is_err() {
            return Err(AccountError::InvalidPublicKey);
        }
        Ok(AccountState {
            address: derive_address(&public_key),
            public_key,
            executor,
            nonce: 0,
            selector_table: HashMap::new(),
            installed: BTreeSet::new(),
            storage: StorageArena::new(),
            events: Vec::new(),
        })
    }

    /// The account's ledger identity.
    pub fn address(&self) -> [u8; 20] {
        self.address
    }

    /// The active credential.
    pub fn public_key(&self) -> &PasskeyPublicKey {
        &self.public_key
    }

    /// The trusted executor.
    pub fn executor(&self) -> [u8; 20] {
        self.executor
    }

    /// The current operation counter.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Whether a module is currently installed.
    pub fn is_installed(&self, module: &[u8; 20]) -> bool {
        self.installed.contains(module)
    }

    /// The currently installed modules, in sorted order.
    pub fn installed_modules(&self) -> impl Iterator<Item = &[u8; 20]> {
        self.installed.iter()
    }

    /// The module owning a selector, if any.
    pub fn selector_owner(&self, selector: &Selector) -> Option<[u8; 20]> {
        self.selector_table.get(selector).copied()
    }

    /// The notification log, oldest first.
    pub fn events(&self) -> &[AccountEvent] {
        &self.events
    }

    /// Read a module's namespaced storage. Read-only accessor for
    /// embedders and tests; modules go through their execution context.
    pub fn module_storage(&self, module: &[u8; 20], key: &[u8]) -> Option<&[u8]> {
        self.storage.get(module, key)
    }

    pub(crate) fn record(&mut self, event: AccountEvent) {
        self.events.push(event);
    }
}

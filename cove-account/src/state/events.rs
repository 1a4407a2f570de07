//! Account notification log.

use cove_core::{PasskeyPublicKey, U256};
use serde::{Deserialize, Serialize};

/// Notifications the account appends as operations mutate it.
///
/// The kernel has no ledger-native event bus; embedders read the log off
/// the state after a call and publish however they like.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    /// A module was installed.
    ModuleInstalled {
        /// The installed module.
        module: [u8; 20],
    },

    /// A module was uninstalled.
    ModuleUninstalled {
        /// The removed module.
        module: [u8; 20],
    },

    /// The credential public key was replaced.
    OwnershipTransferred {
        /// Key that is no longer valid.
        previous: PasskeyPublicKey,
        /// Key all future validations use.
        current: PasskeyPublicKey,
    },

    /// The recurring module executed a period's swap.
    SwapTriggered {
        /// The module that triggered.
        module: [u8; 20],
        /// The period that executed.
        period: u64,
        /// Asset sold.
        input_asset: [u8; 20],
        /// Asset bought.
        output_asset: [u8; 20],
        /// Amount of the input asset sold.
        amount_in: U256,
    },
}

//! Execution context for delegated module logic.

use crate::host::Host;
use crate::state::{AccountEvent, AccountState};

/// The context a module's hooks and handlers run in.
///
/// This is the delegation contract: module code runs, but its reads and
/// writes land in the account's storage, under the module's own namespace.
/// The namespace binding is fixed at construction and cannot be changed by
/// the module, which is what keeps two modules out of each other's state.
pub struct ModuleContext<'a> {
    module_id: [u8; 20],
    caller: [u8; 20],
    timestamp: u64,
    state: &'a mut AccountState,
    host: &'a mut dyn Host,
}

impl<'a> ModuleContext<'a> {
    pub(crate) fn new(
        state: &'a mut AccountState,
        host: &'a mut dyn Host,
        module_id: [u8; 20],
        caller: [u8; 20],
        timestamp: u64,
    ) -> Self {
        ModuleContext {
            module_id,
            caller,
            timestamp,
            state,
            host,
        }
    }

    /// The account whose storage this context writes into.
    pub fn account(&self) -> [u8; 20] {
        self.state.address()
    }

    /// The identity that initiated the call.
    pub fn caller(&self) -> [u8; 20] {
        self.caller
    }

    /// Execution-time unix timestamp.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// The module this context is bound to.
    pub fn module_id(&self) -> [u8; 20] {
        self.module_id
    }

    /// Read from the module's namespace.
    pub fn storage_get(&self, key: &[u8]) -> Option<&[u8]> {
        self.state.storage.get(&self.module_id, key)
    }

    /// Write into the module's namespace.
    pub fn storage_put(&mut self, key: &[u8], value: Vec<u8>) {
        self.state.storage.put(&self.module_id, key, value);
    }

    /// Remove from the module's namespace.
    pub fn storage_remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        self.state.storage.remove(&self.module_id, key)
    }

    /// Append a notification to the account's log.
    pub fn emit(&mut self, event: AccountEvent) {
        self.state.record(event);
    }

    /// The hosting ledger, for outbound calls.
    ///
    /// State writes that establish invariants must complete before any
    /// outbound call made through this handle.
    pub fn host(&mut self) -> &mut dyn Host {
        &mut *self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use cove_core::crypto::actor_id;
    use cove_core::KeyPair;

    fn test_state() -> AccountState {
        AccountState::new(actor_id("executor"), KeyPair::generate().public_key()).unwrap()
    }

    #[test]
    fn test_storage_is_bound_to_module() {
        let mut state = test_state();
        let mut host = MemoryHost::new();
        let module_a = [0xAA; 20];
        let module_b = [0xBB; 20];

        {
            let mut ctx = ModuleContext::new(&mut state, &mut host, module_a, [1u8; 20], 1000);
            ctx.storage_put(b"k", vec![1]);
        }
        {
            let ctx = ModuleContext::new(&mut state, &mut host, module_b, [1u8; 20], 1000);
            assert_eq!(ctx.storage_get(b"k"), None);
        }
        {
            let ctx = ModuleContext::new(&mut state, &mut host, module_a, [1u8; 20], 1000);
            assert_eq!(ctx.storage_get(b"k"), Some(&[1u8][..]));
        }
    }

    #[test]
    fn test_emit_appends_to_account_log() {
        let mut state = test_state();
        let mut host = MemoryHost::new();

        {
            let mut ctx = ModuleContext::new(&mut state, &mut host, [0xAA; 20], [1u8; 20], 1000);
            ctx.emit(AccountEvent::ModuleInstalled { module: [0xAA; 20] });
        }

        assert_eq!(state.events().len(), 1);
    }

    #[test]
    fn test_context_exposes_call_metadata() {
        let mut state = test_state();
        let account = state.address();
        let mut host = MemoryHost::new();
        let ctx = ModuleContext::new(&mut state, &mut host, [0xAA; 20], [7u8; 20], 1234);

        assert_eq!(ctx.account(), account);
        assert_eq!(ctx.caller(), [7u8; 20]);
        assert_eq!(ctx.timestamp(), 1234);
        assert_eq!(ctx.module_id(), [0xAA; 20]);
    }
}

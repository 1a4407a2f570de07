//! Call context for account entry points.

/// Caller identity and execution instant for one inbound call.
///
/// The hosting ledger decides both; the kernel never reads a clock of its
/// own. Expiration and window checks are point-in-time comparisons against
/// this timestamp.
#[derive(Clone, Debug)]
pub struct CallContext {
    /// The identity making the call.
    pub caller: [u8; 20],

    /// Execution-time unix timestamp.
    pub timestamp: u64,
}

impl CallContext {
    /// Create a call context.
    pub fn new(caller: [u8; 20], timestamp: u64) -> Self {
        CallContext { caller, timestamp }
    }
}

//! Code units and the module capability model.

use cove_core::Selector;

use crate::error::ModuleError;

use super::ModuleContext;

/// A typed set of capabilities a code unit advertises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapabilitySet(u32);

impl CapabilitySet {
    /// The unit answers capability queries.
    pub const INTROSPECTION: CapabilitySet = CapabilitySet(1);

    /// The unit can be installed as an account module.
    pub const MODULE: CapabilitySet = CapabilitySet(1 << 1);

    /// The empty set.
    pub const fn empty() -> Self {
        CapabilitySet(0)
    }

    /// The union of two sets.
    pub const fn union(self, other: CapabilitySet) -> Self {
        CapabilitySet(self.0 | other.0)
    }

    /// Whether every capability in `other` is present.
    pub fn contains(&self, other: CapabilitySet) -> bool {
        self.0 & other.0 == other.0
    }
}

/// A unit of deployed code the account can interact with.
///
/// The registry probes a unit before trusting it: `capabilities()` is the
/// introspection query (`None` means the unit does not support
/// introspection at all), and `as_module()` yields the module surface for
/// units that advertise [`CapabilitySet::MODULE`].
pub trait CodeUnit {
    /// Stable name the unit's identity is derived from.
    fn name(&self) -> &'static str;

    /// Answer the introspection probe, or `None` if unsupported.
    fn capabilities(&self) -> Option<CapabilitySet>;

    /// The module surface, present when the unit is a module.
    fn as_module(&self) -> Option<&dyn AccountModule> {
        None
    }
}

/// The surface an installable module exposes to the registry.
///
/// A module holds no state of its own. Hooks and handlers receive a
/// [`ModuleContext`] whose reads and writes land in the account's storage,
/// inside the module's namespace.
pub trait AccountModule {
    /// The selectors this module implements.
    fn selectors(&self) -> Vec<Selector>;

    /// Install hook, run before any selector is registered. `init_payload`
    /// carries module-specific configuration.
    fn on_install(
        &self,
        _ctx: &mut ModuleContext<'_>,
        _init_payload: &[u8],
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Uninstall hook, run before the module's state is dropped. Used for
    /// cleanup such as revoking resource approvals.
    fn on_uninstall(&self, _ctx: &mut ModuleContext<'_>) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Handle a dispatched call to one of this module's selectors.
    fn handle(
        &self,
        ctx: &mut ModuleContext<'_>,
        selector: Selector,
        args: &[u8],
    ) -> Result<Vec<u8>, ModuleError>;
}

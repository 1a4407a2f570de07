//! The deployed-code catalog.

use std::collections::HashMap;

use cove_core::crypto::sha256;

use super::CodeUnit;

/// The ledger's code space: every unit the account could reference.
///
/// A unit's identity is derived from its stable name, so a catalog built
/// the same way yields the same identities on every run.
#[derive(Default)]
pub struct ModuleCatalog {
    units: HashMap<[u8; 20], Box<dyn CodeUnit>>,
}

impl ModuleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a code unit, returning its identity.
    ///
    /// Re-deploying a unit with the same name replaces the previous one
    /// under the same identity, like redeploying code at an address.
    pub fn deploy(&mut self, unit: Box<dyn CodeUnit>) -> [u8; 20] {
        let id = code_id(unit.name());
        self.units.insert(id, unit);
        id
    }

    /// Look up a deployed unit.
    pub fn get(&self, id: &[u8; 20]) -> Option<&dyn CodeUnit> {
        self.units.get(id).map(Box::as_ref)
    }

    /// Whether any unit is deployed under this identity.
    pub fn contains(&self, id: &[u8; 20]) -> bool {
        self.units.contains_key(id)
    }
}

/// Derive a code identity from a unit name.
fn code_id(name: &str) -> [u8; 20] {
    let hash = sha256(name.as_bytes());
    let mut id = [0u8; 20];
    id.copy_from_slice(&hash[..20]);
    id
}

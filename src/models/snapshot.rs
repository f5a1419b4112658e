use indexmap::IndexMap;

use super::vm_entity::VmEntity;

/// Ordered tag -> value mapping flattened from the cluster attribute trees.
/// Insertion order is first-seen order across all wrappers.
pub type ClusterAttributes = IndexMap<String, String>;

/// Ordered name -> entity mapping produced by one VM fetch pass.
pub type VmInventory = IndexMap<String, VmEntity>;

/// Immutable result of a fetch cycle.
///
/// The same snapshot feeds both the terminal table and the spreadsheet
/// export, so the two presentations can never diverge. A failed fetch
/// never clears previously valid state; callers simply keep the old
/// snapshot.
#[derive(Clone, Debug, Default)]
pub struct InventorySnapshot {
    pub vms: VmInventory,
    pub cluster: ClusterAttributes,
}

impl InventorySnapshot {
    /// Both sheets need data; an export with either mapping empty is refused.
    pub fn is_exportable(&self) -> bool {
        !self.vms.is_empty() && !self.cluster.is_empty()
    }
}

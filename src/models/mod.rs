pub mod snapshot;
pub mod table_row;
pub mod vm_entity;

// Re-export commonly used types
pub use snapshot::{ClusterAttributes, InventorySnapshot, VmInventory};
pub use table_row::{column_index, TableRow, CLUSTER_COLUMNS, TOTAL_MARKER, VM_COLUMNS};
pub use vm_entity::{BlockDeviceRecord, VmEntity};

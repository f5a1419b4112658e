/// Marker placed in the name column of the synthetic totals row.
pub const TOTAL_MARKER: &str = "TOTAL";

/// Column headers of the VM table and the "Virtual Machines" sheet.
pub const VM_COLUMNS: [&str; 13] = [
    "Name",
    "UUID",
    "Description",
    "OS",
    "Machine Type",
    "State",
    "vCPUs",
    "Memory (GiB)",
    "Block Device",
    "Device Type",
    "Capacity (GiB)",
    "Allocation (GiB)",
    "Mount Points",
];

/// Column headers of the cluster table and the "Cluster" sheet.
pub const CLUSTER_COLUMNS: [&str; 2] = ["Tag", "Value"];

/// One display-ready table row: a retained block device plus the VM-level
/// fields. The VM name repeats on every row; the remaining VM-level fields
/// are populated only on the VM's first surviving row so its devices group
/// visually.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub uuid: String,
    pub description: String,
    pub os: String,
    pub machine_type: String,
    pub state: String,
    pub vcpus: String,
    pub memory: String,
    pub block_device: String,
    pub device_type: String,
    pub capacity: String,
    pub allocation: String,
    pub mount_points: String,
}

impl TableRow {
    pub fn is_total(&self) -> bool {
        self.name == TOTAL_MARKER
    }

    /// Cell values in column order.
    pub fn cells(&self) -> [&str; 13] {
        [
            &self.name,
            &self.uuid,
            &self.description,
            &self.os,
            &self.machine_type,
            &self.state,
            &self.vcpus,
            &self.memory,
            &self.block_device,
            &self.device_type,
            &self.capacity,
            &self.allocation,
            &self.mount_points,
        ]
    }

    /// Displayed value of a single column.
    pub fn column(&self, index: usize) -> &str {
        self.cells().get(index).copied().unwrap_or("")
    }
}

/// Resolve a column header (case-insensitive) to its index.
pub fn column_index(header: &str) -> Option<usize> {
    VM_COLUMNS
        .iter()
        .position(|c| c.eq_ignore_ascii_case(header.trim()))
}

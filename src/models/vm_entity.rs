/// One virtual disk, volume, or firmware-state device attached to a VM,
/// normalized for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockDeviceRecord {
    /// Composite display name: "<device-name> (<uuid>)".
    pub name: String,
    pub device_type: String,
    /// GiB with two decimals, blank when the source capacity is zero/absent.
    pub capacity: String,
    /// GiB with two decimals, blank when absent.
    pub allocation: String,
    pub mount_points: String,
}

impl BlockDeviceRecord {
    /// Stand-in for a VM that reports no block devices at all, so the VM
    /// still yields exactly one row.
    pub fn placeholder() -> Self {
        Self {
            name: "N/A".into(),
            device_type: "N/A".into(),
            capacity: String::new(),
            allocation: String::new(),
            mount_points: "N/A".into(),
        }
    }
}

/// One logical virtual machine, merged from every raw API record bearing
/// its name within a fetch pass.
///
/// Scalar fields come from the first record seen; later records with the
/// same name only append block devices.
#[derive(Clone, Debug, Default)]
pub struct VmEntity {
    pub name: String,
    pub uuid: String,
    pub description: String,
    pub os: String,
    pub machine_type: String,
    pub state: String,
    pub vcpus: String,
    /// Whole GiB, or "N/A" when the source value is not numeric.
    pub memory: String,
    pub blocks: Vec<BlockDeviceRecord>,
}

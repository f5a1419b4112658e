use indexmap::IndexMap;
use serde_json::Value;

use crate::api::{RawBlockDevice, VirDomainRecord};
use crate::models::{BlockDeviceRecord, TableRow, VmEntity, VmInventory, TOTAL_MARKER};
use crate::utils::{float_or_zero, format_gib, frac_gib, int_or_zero, whole_gib};

/// Device types that stay in the data model but never reach rendered or
/// exported rows, nor the capacity/allocation totals.
pub const EXCLUDED_DEVICE_TYPES: [&str; 3] = ["NVRAM", "IDE_CDROM", "VTPM"];

pub fn is_excluded_device(device_type: &str) -> bool {
    EXCLUDED_DEVICE_TYPES.contains(&device_type)
}

/// Fold raw VirDomain records into one entity per distinct VM name.
///
/// The first record bearing a name supplies the scalar fields; records that
/// repeat the name only append block devices. Entity order is first-seen
/// order across the whole pass.
pub fn aggregate_virdomains(records: Vec<VirDomainRecord>) -> VmInventory {
    let mut vms: VmInventory = IndexMap::new();

    for record in records {
        let name = record.name.clone().unwrap_or_default();
        let entity = vms.entry(name.clone()).or_insert_with(|| VmEntity {
            name,
            uuid: record.uuid.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            os: record.operating_system.clone().unwrap_or_else(|| "N/A".into()),
            machine_type: record.machine_type.clone().unwrap_or_else(|| "N/A".into()),
            state: record.state.clone().unwrap_or_else(|| "N/A".into()),
            vcpus: display_count(record.num_vcpu.as_ref()),
            memory: whole_gib(record.mem.as_ref()),
            blocks: Vec::new(),
        });

        match record.block_devs.as_deref() {
            Some(devs) if !devs.is_empty() => {
                for dev in devs {
                    entity.blocks.push(normalize_block_device(dev));
                }
            }
            _ => entity.blocks.push(BlockDeviceRecord::placeholder()),
        }
    }

    tracing::debug!(count = vms.len(), "aggregated VM entities");
    vms
}

/// Expand entities into display rows: one row per retained block device.
///
/// The VM name repeats on every row; the remaining VM-level fields are
/// populated only on the first surviving row of each VM. A VM whose devices
/// are all excluded contributes zero rows.
pub fn expand_rows(vms: &VmInventory) -> Vec<TableRow> {
    let mut rows = Vec::new();

    for entity in vms.values() {
        let mut first = true;
        for block in &entity.blocks {
            if is_excluded_device(&block.device_type) {
                continue;
            }
            rows.push(TableRow {
                name: entity.name.clone(),
                uuid: lead(first, &entity.uuid),
                description: lead(first, &entity.description),
                os: lead(first, &entity.os),
                machine_type: lead(first, &entity.machine_type),
                state: lead(first, &entity.state),
                vcpus: lead(first, &entity.vcpus),
                memory: lead(first, &entity.memory),
                block_device: block.name.clone(),
                device_type: block.device_type.clone(),
                capacity: block.capacity.clone(),
                allocation: block.allocation.clone(),
                mount_points: block.mount_points.clone(),
            });
            first = false;
        }
    }

    rows
}

/// Build the synthetic totals row.
///
/// vCPU and memory sums walk every entity, whether or not its rows survived
/// filtering; capacity and allocation sum only the devices that actually
/// render, so the table, the sheet, and the visible rows agree.
pub fn totals_row(vms: &VmInventory) -> TableRow {
    let mut total_vcpus: i64 = 0;
    let mut total_memory: i64 = 0;
    let mut total_capacity: f64 = 0.0;
    let mut total_allocation: f64 = 0.0;

    for entity in vms.values() {
        total_vcpus += int_or_zero(&entity.vcpus);
        total_memory += int_or_zero(&entity.memory);
        for block in &entity.blocks {
            if is_excluded_device(&block.device_type) {
                continue;
            }
            total_capacity += float_or_zero(&block.capacity);
            total_allocation += float_or_zero(&block.allocation);
        }
    }

    TableRow {
        name: TOTAL_MARKER.to_string(),
        vcpus: total_vcpus.to_string(),
        memory: total_memory.to_string(),
        capacity: format_gib(total_capacity),
        allocation: format_gib(total_allocation),
        ..TableRow::default()
    }
}

fn lead(first: bool, value: &str) -> String {
    if first {
        value.to_string()
    } else {
        String::new()
    }
}

/// vCPU counts arrive as numbers but are displayed (and totalled) as text.
fn display_count(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        },
        Some(Value::String(s)) => s.clone(),
        _ => "N/A".to_string(),
    }
}

fn normalize_block_device(dev: &RawBlockDevice) -> BlockDeviceRecord {
    let name = dev.name.as_deref().unwrap_or("N/A");
    let uuid = dev.uuid.as_deref().unwrap_or("N/A");
    BlockDeviceRecord {
        name: format!("{} ({})", name, uuid),
        device_type: dev.device_type.clone().unwrap_or_else(|| "N/A".into()),
        capacity: frac_gib(dev.capacity.as_ref()),
        allocation: frac_gib(dev.allocation.as_ref()),
        mount_points: display_mount_points(dev.mount_points.as_ref()),
    }
}

/// Mount points arrive either as a plain string or as an array of paths.
fn display_mount_points(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            if joined.is_empty() {
                "N/A".to_string()
            } else {
                joined
            }
        }
        _ => "N/A".to_string(),
    }
}

use hcview::api::VirDomainRecord;
use hcview::services::{aggregate_virdomains, expand_rows, totals_row};
use serde_json::json;

fn record(value: serde_json::Value) -> VirDomainRecord {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_one_entity_per_distinct_name() {
    let records = vec![
        record(json!({"name": "vm1", "numVCPU": 2})),
        record(json!({"name": "vm2", "numVCPU": 4})),
        record(json!({"name": "vm1", "numVCPU": 8})),
        record(json!({"name": "vm2", "numVCPU": 16})),
    ];
    let vms = aggregate_virdomains(records);
    assert_eq!(vms.len(), 2);
    assert_eq!(vms.keys().collect::<Vec<_>>(), vec!["vm1", "vm2"]);
}

#[test]
fn test_repeated_name_keeps_first_scalars_and_appends_devices() {
    let records = vec![
        record(json!({
            "name": "vm2", "uuid": "u-1", "numVCPU": 4,
            "blockDevs": [{"name": "disk0", "uuid": "b-1", "type": "VIRTIO_DISK"}]
        })),
        record(json!({
            "name": "vm2", "uuid": "u-IGNORED", "numVCPU": 8,
            "blockDevs": [{"name": "disk1", "uuid": "b-2", "type": "VIRTIO_DISK"}]
        })),
    ];
    let vms = aggregate_virdomains(records);
    let vm = &vms["vm2"];
    assert_eq!(vm.vcpus, "4");
    assert_eq!(vm.uuid, "u-1");
    assert_eq!(vm.blocks.len(), 2);

    let rows = expand_rows(&vms);
    assert_eq!(rows.len(), 2);
    // The name repeats; the other VM-level fields are blank after the first row.
    assert_eq!(rows[0].name, "vm2");
    assert_eq!(rows[1].name, "vm2");
    assert_eq!(rows[0].vcpus, "4");
    assert_eq!(rows[1].vcpus, "");
    assert_eq!(rows[1].uuid, "");
    assert_eq!(rows[1].block_device, "disk1 (b-2)");
}

#[test]
fn test_memory_and_capacity_normalization() {
    let records = vec![record(json!({
        "name": "vm1", "mem": 2147483648_u64, "numVCPU": 2,
        "blockDevs": [{
            "name": "disk0", "uuid": "b-1", "type": "VIRTIO_DISK",
            "capacity": 10737418240_u64, "allocation": 5368709120_u64
        }]
    }))];
    let vms = aggregate_virdomains(records);
    let vm = &vms["vm1"];
    assert_eq!(vm.memory, "2");

    let rows = expand_rows(&vms);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].capacity, "10.0");
    assert_eq!(rows[0].allocation, "5.0");
}

#[test]
fn test_non_numeric_memory_is_na() {
    let records = vec![record(json!({"name": "vm1", "mem": "lots"}))];
    let vms = aggregate_virdomains(records);
    assert_eq!(vms["vm1"].memory, "N/A");
}

#[test]
fn test_vm_without_block_devices_gets_placeholder_row() {
    let records = vec![record(json!({"name": "bare-vm", "numVCPU": 1}))];
    let vms = aggregate_virdomains(records);
    assert_eq!(vms["bare-vm"].blocks.len(), 1);

    let rows = expand_rows(&vms);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].block_device, "N/A");
    assert_eq!(rows[0].device_type, "N/A");
    assert_eq!(rows[0].mount_points, "N/A");
    assert_eq!(rows[0].capacity, "");
    assert_eq!(rows[0].allocation, "");
}

#[test]
fn test_excluded_device_types_never_render() {
    let records = vec![record(json!({
        "name": "vm1",
        "blockDevs": [
            {"name": "nvram", "uuid": "b-0", "type": "NVRAM"},
            {"name": "disk0", "uuid": "b-1", "type": "VIRTIO_DISK"},
            {"name": "cdrom", "uuid": "b-2", "type": "IDE_CDROM"},
            {"name": "tpm", "uuid": "b-3", "type": "VTPM"}
        ]
    }))];
    let vms = aggregate_virdomains(records);
    // Retained in the entity, filtered at the presentation boundary.
    assert_eq!(vms["vm1"].blocks.len(), 4);

    let rows = expand_rows(&vms);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].device_type, "VIRTIO_DISK");
}

#[test]
fn test_fully_excluded_vm_yields_no_rows_but_counts_in_totals() {
    let records = vec![
        record(json!({
            "name": "firmware-only", "numVCPU": 4, "mem": 4294967296_u64,
            "blockDevs": [{"name": "nvram", "uuid": "b-0", "type": "NVRAM", "capacity": 1073741824_u64}]
        })),
        record(json!({
            "name": "real-vm", "numVCPU": 2, "mem": 2147483648_u64,
            "blockDevs": [{"name": "disk0", "uuid": "b-1", "type": "VIRTIO_DISK", "capacity": 10737418240_u64}]
        })),
    ];
    let vms = aggregate_virdomains(records);

    let rows = expand_rows(&vms);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "real-vm");

    // vCPU/memory totals walk entities, not filtered rows; the excluded
    // NVRAM capacity stays out of the capacity total.
    let total = totals_row(&vms);
    assert_eq!(total.vcpus, "6");
    assert_eq!(total.memory, "6");
    assert_eq!(total.capacity, "10.0");
}

#[test]
fn test_totals_row_shape() {
    let records = vec![
        record(json!({
            "name": "vm1", "numVCPU": 2, "mem": 2147483648_u64,
            "blockDevs": [
                {"name": "d0", "uuid": "b-1", "type": "VIRTIO_DISK",
                 "capacity": 10737418240_u64, "allocation": 5368709120_u64},
                {"name": "d1", "uuid": "b-2", "type": "VIRTIO_DISK",
                 "capacity": 5368709120_u64, "allocation": 1073741824_u64}
            ]
        })),
        record(json!({"name": "vm2", "numVCPU": "N/A", "mem": null})),
    ];
    let vms = aggregate_virdomains(records);
    let total = totals_row(&vms);

    assert!(total.is_total());
    assert_eq!(total.name, "TOTAL");
    // "N/A" vcpus and memory coerce to zero rather than erroring.
    assert_eq!(total.vcpus, "2");
    assert_eq!(total.memory, "2");
    assert_eq!(total.capacity, "15.0");
    assert_eq!(total.allocation, "6.0");
    assert_eq!(total.uuid, "");
    assert_eq!(total.block_device, "");
    assert_eq!(total.mount_points, "");
}

#[test]
fn test_mount_points_string_and_array_forms() {
    let records = vec![record(json!({
        "name": "vm1",
        "blockDevs": [
            {"name": "d0", "uuid": "b-1", "type": "VIRTIO_DISK", "mountPoints": "/"},
            {"name": "d1", "uuid": "b-2", "type": "VIRTIO_DISK", "mountPoints": ["/", "/var"]},
            {"name": "d2", "uuid": "b-3", "type": "VIRTIO_DISK"}
        ]
    }))];
    let vms = aggregate_virdomains(records);
    let rows = expand_rows(&vms);
    assert_eq!(rows[0].mount_points, "/");
    assert_eq!(rows[1].mount_points, "/, /var");
    assert_eq!(rows[2].mount_points, "N/A");
}

#[test]
fn test_missing_scalar_fields_use_markers() {
    let records = vec![record(json!({"name": "vm1"}))];
    let vms = aggregate_virdomains(records);
    let vm = &vms["vm1"];
    assert_eq!(vm.os, "N/A");
    assert_eq!(vm.machine_type, "N/A");
    assert_eq!(vm.state, "N/A");
    assert_eq!(vm.vcpus, "N/A");
    assert_eq!(vm.memory, "N/A");
    assert_eq!(vm.uuid, "");
    assert_eq!(vm.description, "");
}

#[test]
fn test_entity_order_is_first_seen() {
    let records = vec![
        record(json!({"name": "zeta"})),
        record(json!({"name": "alpha"})),
        record(json!({"name": "zeta"})),
        record(json!({"name": "mike"})),
    ];
    let vms = aggregate_virdomains(records);
    assert_eq!(vms.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mike"]);
}

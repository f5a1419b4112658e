pub mod cluster_service;
pub mod export_service;
pub mod sort_service;
pub mod vm_service;

// Re-export commonly used functions
pub use cluster_service::flatten_registration;
pub use export_service::write_workbook;
pub use sort_service::{numeric_value, sort_rows, SortState};
pub use vm_service::{
    aggregate_virdomains, expand_rows, is_excluded_device, totals_row, EXCLUDED_DEVICE_TYPES,
};

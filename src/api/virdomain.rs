use serde::Deserialize;
use serde_json::Value;

use super::client::ApiClient;
use crate::config::VM_FETCH_TIMEOUT;
use crate::error::InventoryError;

/// One block-device sub-record as returned by the API, sizes in bytes.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBlockDevice {
    pub name: Option<String>,
    pub uuid: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub capacity: Option<Value>,
    pub allocation: Option<Value>,
    /// A plain string on older firmware, an array of paths on newer.
    pub mount_points: Option<Value>,
}

/// One raw VirDomain record.
///
/// A record does not correspond one-to-one with a logical VM: several
/// records can share a `name`, and the aggregator folds them into a single
/// entity.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirDomainRecord {
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub description: Option<String>,
    pub operating_system: Option<String>,
    pub machine_type: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "numVCPU")]
    pub num_vcpu: Option<Value>,
    /// Memory in bytes; non-numeric values are tolerated and shown as "N/A".
    pub mem: Option<Value>,
    pub block_devs: Option<Vec<RawBlockDevice>>,
}

/// Fetch the raw VM inventory.
pub async fn load_virdomains(client: &ApiClient) -> Result<Vec<VirDomainRecord>, InventoryError> {
    let records = client.get_records("/VirDomain", VM_FETCH_TIMEOUT).await?;
    tracing::info!(count = records.len(), "fetched VirDomain records");
    records
        .into_iter()
        .map(|r| serde_json::from_value(r).map_err(|e| InventoryError::Payload(e.to_string())))
        .collect()
}

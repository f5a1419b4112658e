use serde::Deserialize;

use super::client::ApiClient;
use crate::config::CLUSTER_FETCH_TIMEOUT;
use crate::error::InventoryError;

/// One wrapper object from the Registration resource. The cluster attribute
/// tree travels as an embedded XML document under `clusterData`; wrappers
/// without one are legal and skipped downstream.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub cluster_data: Option<String>,
}

/// Fetch the cluster registration wrappers.
pub async fn load_registration(
    client: &ApiClient,
) -> Result<Vec<RegistrationRecord>, InventoryError> {
    let records = client
        .get_records("/Registration", CLUSTER_FETCH_TIMEOUT)
        .await?;
    tracing::info!(count = records.len(), "fetched registration records");
    records
        .into_iter()
        .map(|r| serde_json::from_value(r).map_err(|e| InventoryError::Payload(e.to_string())))
        .collect()
}

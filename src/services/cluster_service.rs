use indexmap::IndexMap;

use crate::api::RegistrationRecord;
use crate::error::InventoryError;
use crate::models::ClusterAttributes;

/// Flatten every embedded attribute tree into one ordered tag -> value
/// mapping.
///
/// Every element node is visited, root included. Tags repeated across
/// wrappers (or within one tree) merge by key, last write wins, while the
/// tag keeps its first-seen position. Elements without usable text record
/// the "N/A" marker.
///
/// A document that fails to parse stops the walk; attributes collected from
/// earlier wrappers are returned alongside the error rather than discarded.
pub fn flatten_registration(
    records: &[RegistrationRecord],
) -> (ClusterAttributes, Option<InventoryError>) {
    let mut attributes: ClusterAttributes = IndexMap::new();

    for record in records {
        let Some(xml) = record.cluster_data.as_deref() else {
            continue;
        };
        if xml.is_empty() {
            continue;
        }

        let doc = match roxmltree::Document::parse(xml) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(%e, "cluster attribute tree failed to parse");
                return (attributes, Some(InventoryError::AttributeTree(e.to_string())));
            }
        };

        for node in doc.descendants().filter(|n| n.is_element()) {
            let tag = node.tag_name().name().to_string();
            let value = match node.text().map(str::trim) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => "N/A".to_string(),
            };
            attributes.insert(tag, value);
        }
    }

    tracing::debug!(count = attributes.len(), "flattened cluster attributes");
    (attributes, None)
}

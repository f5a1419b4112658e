/// Error types for fetch, normalization, and export operations
use thiserror::Error;

/// Errors surfaced to the user by inventory operations.
///
/// Every failure is terminal for the current subcommand; nothing is retried
/// automatically.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Connection failures and timeouts from the HTTP layer.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("HTTP error {0}")]
    HttpStatus(u16),

    /// The response body did not have the expected JSON shape.
    #[error("Unexpected response payload: {0}")]
    Payload(String),

    /// An embedded cluster attribute tree could not be parsed.
    /// Attributes collected before the failure are preserved by the caller.
    #[error("Malformed cluster attribute tree: {0}")]
    AttributeTree(String),

    /// Credentials are not configured; no request was attempted.
    #[error("Missing credentials: set HYPERCORE_HOST, HYPERCORE_USERNAME and HYPERCORE_PASSWORD, or pass --host/--username/--password")]
    MissingCredentials,

    /// Export was requested while either inventory mapping was empty.
    #[error("Insufficient data to export: both cluster attributes and VM inventory must be populated")]
    EmptyExport,

    /// The spreadsheet library rejected the workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

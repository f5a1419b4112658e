use std::time::Duration;

use serde_json::Value;

use crate::config::Config;
use crate::error::InventoryError;

/// HTTP client for the HyperCore REST API.
///
/// Every request carries Basic auth and a per-request timeout. Certificate
/// verification is off unless the config enables it; HyperCore nodes
/// typically serve self-signed certificates.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, InventoryError> {
        let base_url = config.base_url();
        Self::with_base_url(config, base_url)
    }

    /// Point the client at an explicit base URL instead of deriving it from
    /// the configured host. Used by tests and plain-HTTP deployments.
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self, InventoryError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .user_agent(format!("hcview/{}", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        Ok(Self {
            http,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// GET a resource and return the parsed JSON array of records.
    pub async fn get_records(
        &self,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Vec<Value>, InventoryError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "requesting inventory resource");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::HttpStatus(status.as_u16()));
        }

        let payload: Value = response.json().await?;
        match payload {
            Value::Array(records) => Ok(records),
            other => Err(InventoryError::Payload(format!(
                "expected a JSON array from {}, got {}",
                endpoint,
                value_kind(&other)
            ))),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

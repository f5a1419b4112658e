use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::InventoryError;

// Default configuration constants
pub const DEFAULT_VERIFY_TLS: bool = false;

/// Cluster metadata payloads are small.
pub const CLUSTER_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
/// VM inventory payloads are expected to be much larger.
pub const VM_FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for a single HyperCore cluster node.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub host: String,
    pub username: String,
    pub password: String,
    pub verify_tls: bool,
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn from_env() -> Config {
    Config {
        host: sanitize_host(&env::var("HYPERCORE_HOST").unwrap_or_default()),
        username: env::var("HYPERCORE_USERNAME").unwrap_or_default(),
        password: env::var("HYPERCORE_PASSWORD").unwrap_or_default(),
        verify_tls: flag_from_env("HYPERCORE_VERIFY_TLS", DEFAULT_VERIFY_TLS),
    }
}

/// Strip scheme prefixes and trailing slashes so the value can be embedded
/// in the REST base URL.
pub fn sanitize_host(raw: &str) -> String {
    let t = raw.trim();
    let t = t
        .strip_prefix("https://")
        .or_else(|| t.strip_prefix("http://"))
        .unwrap_or(t);
    t.trim_end_matches('/').to_string()
}

fn flag_from_env(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => {
            let t = v.trim().to_lowercase();
            if t.is_empty() {
                default
            } else {
                matches!(t.as_str(), "1" | "true" | "yes" | "on")
            }
        }
        Err(_) => default,
    }
}

impl Config {
    /// Credentials must be complete before any network call is attempted.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.host.trim().is_empty()
            || self.username.trim().is_empty()
            || self.password.trim().is_empty()
        {
            return Err(InventoryError::MissingCredentials);
        }
        Ok(())
    }

    pub fn base_url(&self) -> String {
        format!("https://{}/rest/v1", self.host)
    }
}

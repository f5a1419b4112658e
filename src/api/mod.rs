// Atomic API modules
pub mod client;
pub mod registration;
pub mod virdomain;

// Re-export commonly used functions
pub use client::ApiClient;
pub use registration::{load_registration, RegistrationRecord};
pub use virdomain::{load_virdomains, RawBlockDevice, VirDomainRecord};

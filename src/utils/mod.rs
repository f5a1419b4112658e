// Unit-conversion and totals-coercion helpers
pub mod digits;
pub mod units;

// Re-export all utilities for convenient access
pub use digits::{float_or_zero, int_or_zero};
pub use units::{format_gib, frac_gib, whole_gib};

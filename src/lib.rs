//! Terraform provider for the Segment Public API
//!
//! - [`segment`] - HTTP client, API models and cursor pagination
//! - [`state`] - Mapping between API payloads and Terraform state
//! - [`framework`] - Schema, lifecycle traits and diagnostics
//! - [`resources`] / [`data_sources`] - One module per Terraform type
//! - [`provider`] - Registries wiring everything to a shared client

pub mod config;
pub mod data_sources;
pub mod framework;
pub mod provider;
pub mod resources;
pub mod schemas;
pub mod segment;
pub mod state;

/// Version injected at compile time via SEGMENT_PROVIDER_VERSION (set by
/// release builds), or the crate version for local builds.
pub const VERSION: &str = match option_env!("SEGMENT_PROVIDER_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// User agent sent with every API request
pub const USER_AGENT: &str = concat!("terraform-provider-segment/", env!("CARGO_PKG_VERSION"));

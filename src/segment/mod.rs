//! Segment Public API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Main client with one method per endpoint
//! - [`http`] - HTTP utilities and API error type
//! - [`models`] - Typed request/response payloads
//! - [`pagination`] - Cursor pagination walker
//!
//! # Example
//!
//! ```ignore
//! use terraform_provider_segment::segment::client::SegmentClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = SegmentClient::with_base_url("https://api.segmentapis.com", "token")?;
//!     let workspace = client.get_workspace().await?;
//!     println!("{}", workspace.slug);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod models;
pub mod pagination;

pub use client::SegmentClient;
pub use http::{format_api_error, is_not_found, ApiError};

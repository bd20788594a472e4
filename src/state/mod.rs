//! State mapping
//!
//! Typed state for every resource and data source, with the conversions
//! from API payloads and back into request bodies. Optional API fields stay
//! `None` and serialize as `null`.
//!
//! - [`convert`] - Shared field helpers (optional JSON, lists)
//! - [`common`] - Labels, logos, catalog options
//! - [`metadata`] - Source / destination / warehouse catalog entries
//! - [`source`], [`destination`], [`tracking_plan`], [`access`], [`connection`]

pub mod access;
pub mod common;
pub mod connection;
pub mod convert;
pub mod destination;
pub mod metadata;
pub mod source;
pub mod tracking_plan;

pub use access::{PermissionState, RoleState, UserState, WorkspaceState};
pub use common::{LabelState, LogosState, OptionState};
pub use connection::{SourceTrackingPlanConnectionState, SourceWarehouseConnectionState, NOT_FOUND};
pub use destination::{DestinationState, WarehouseState};
pub use metadata::{DestinationMetadataState, SourceMetadataState, WarehouseMetadataState};
pub use source::SourceState;
pub use tracking_plan::{RuleState, TrackingPlanState};

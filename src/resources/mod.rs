//! Managed resources
//!
//! One module per resource type. Each holds a shared
//! [`SegmentClient`](crate::segment::SegmentClient)
//! handed in at construction and implements the CRUD lifecycle.
//!
//! Resources that disappear server-side are handled per type: some drop
//! out of state, some report an error, connections record a `not_found`
//! sentinel. See each module's `read`.

mod destination;
mod label;
mod source;
mod source_tracking_plan_connection;
mod source_warehouse_connection;
mod tracking_plan;
mod user;
mod warehouse;

pub use destination::DestinationResource;
pub use label::LabelResource;
pub use source::SourceResource;
pub use source_tracking_plan_connection::SourceTrackingPlanConnectionResource;
pub use source_warehouse_connection::SourceWarehouseConnectionResource;
pub use tracking_plan::TrackingPlanResource;
pub use user::UserResource;
pub use warehouse::WarehouseResource;

use crate::framework::{DiagResult, Diagnostic};
use crate::state::convert::non_empty;

/// Identifier from state, or a configuration diagnostic when it is missing
pub(crate) fn require_id<'a>(id: Option<&'a str>, attribute: &str) -> DiagResult<&'a str> {
    non_empty(id).ok_or_else(|| Diagnostic::missing_attribute(attribute))
}

/// Request-building failures come from user-supplied values
pub(crate) fn invalid_config(error: anyhow::Error) -> Diagnostic {
    Diagnostic::config(format!("{:#}", error))
}

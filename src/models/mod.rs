// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the monitoring map.

pub mod filter;
pub mod layer;
pub mod selection;
pub mod site;
pub mod viewport;

pub use filter::{DateRange, FieldFilter, FilterPatch, FilterState};
pub use layer::{EmptyLayerPolicy, LayerState};
pub use selection::{InfoId, InfoRecord, SelectionState};
pub use site::{
    ContaminantType, Coordinates, CropCompatibility, MonitoringSite, Severity, SiteId, SiteStatus,
    SourceKind,
};
pub use viewport::{CameraCommand, MapStyle, Projection, ViewportState};

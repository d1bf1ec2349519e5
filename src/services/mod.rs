// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the map engine's state logic.

pub mod catalog;
pub mod filter;
pub mod markers;
pub mod presets;
pub mod search;
pub mod selection;
pub mod viewport;

pub use catalog::{CatalogError, SiteCatalog};
pub use filter::{compute_visible, count_by_layer, visible_ids};
pub use markers::{reconcile, MarkerDiff, MarkerSpec, MarkerStyle, MarkerSynchronizer, SyncReport};
pub use presets::QuickPreset;
pub use search::SearchDebouncer;
pub use selection::SelectionController;
pub use viewport::{CameraSettings, ViewportController};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map canvas collaborator.
//!
//! The renderer that draws tiles and markers lives outside this crate. The
//! engine only talks to it through [`MapCanvas`]; markers and the camera are
//! mutated exclusively by the marker synchronizer and the viewport controller.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::models::{Coordinates, MapStyle, Projection, SiteId};
use crate::services::markers::MarkerStyle;

/// Opaque handle to a marker living on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MarkerHandle(pub u64);

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Errors reported by the canvas.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid coordinates ({longitude}, {latitude})")]
    InvalidCoordinates { longitude: f64, latitude: f64 },

    #[error("Unknown marker handle: {0}")]
    UnknownHandle(MarkerHandle),

    #[error("Canvas rejected operation: {0}")]
    Rejected(String),
}

/// Primitives the engine needs from the rendering surface.
pub trait MapCanvas {
    fn create_marker(
        &mut self,
        coordinates: Coordinates,
        style: &MarkerStyle,
    ) -> Result<MarkerHandle, CanvasError>;

    fn update_marker_style(
        &mut self,
        handle: MarkerHandle,
        style: &MarkerStyle,
    ) -> Result<(), CanvasError>;

    /// Destroys the marker and any popup attached to it.
    fn remove_marker(&mut self, handle: MarkerHandle) -> Result<(), CanvasError>;

    /// Route clicks on `handle` back to the engine as a selection of `site`.
    fn bind_click(&mut self, handle: MarkerHandle, site: SiteId);

    fn unbind_click(&mut self, handle: MarkerHandle);

    fn open_popup(&mut self, handle: MarkerHandle, content: &str) -> Result<(), CanvasError>;

    fn close_popup(&mut self, handle: MarkerHandle);

    /// Start an animated camera move. A new call replaces any move in flight.
    fn fly_to(&mut self, center: Coordinates, zoom: f64, duration_ms: u64);

    fn set_projection(&mut self, projection: Projection);

    fn set_style(&mut self, style: MapStyle);
}

/// Every call the recording canvas received, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum CanvasCall {
    CreateMarker { handle: MarkerHandle },
    UpdateStyle { handle: MarkerHandle },
    RemoveMarker { handle: MarkerHandle },
    BindClick { handle: MarkerHandle, site: SiteId },
    UnbindClick { handle: MarkerHandle },
    OpenPopup { handle: MarkerHandle },
    ClosePopup { handle: MarkerHandle },
    FlyTo { center: Coordinates, zoom: f64, duration_ms: u64 },
    SetProjection { projection: Projection },
    SetStyle { style: MapStyle },
}

/// A marker as the recording canvas holds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasMarker {
    pub coordinates: Coordinates,
    pub style: MarkerStyle,
    pub popup: Option<String>,
}

/// In-memory canvas that records calls instead of drawing.
///
/// Behaves like a real map where it matters to the engine: rejects
/// out-of-range coordinates, errors on unknown handles, and can be told to
/// fail specific marker creations or popups.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    next_handle: u64,
    markers: BTreeMap<MarkerHandle, CanvasMarker>,
    click_bindings: HashMap<MarkerHandle, SiteId>,
    rejected: Vec<Coordinates>,
    refuse_popups: bool,
    calls: Vec<CanvasCall>,
    projection: Projection,
    style: MapStyle,
    camera: Option<(Coordinates, f64)>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_marker` fail for markers at exactly these coordinates.
    pub fn reject_coordinates(&mut self, coordinates: Coordinates) {
        self.rejected.push(coordinates);
    }

    /// Make every `open_popup` fail.
    pub fn refuse_popups(&mut self) {
        self.refuse_popups = true;
    }

    pub fn markers(&self) -> &BTreeMap<MarkerHandle, CanvasMarker> {
        &self.markers
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&CanvasMarker> {
        self.markers.get(&handle)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Simulate a user click; returns the site bound to the marker.
    pub fn click(&self, handle: MarkerHandle) -> Option<SiteId> {
        self.click_bindings.get(&handle).cloned()
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    /// Target of the most recent camera move.
    pub fn camera_target(&self) -> Option<(Coordinates, f64)> {
        self.camera
    }

    fn ensure_exists(&self, handle: MarkerHandle) -> Result<(), CanvasError> {
        if self.markers.contains_key(&handle) {
            Ok(())
        } else {
            Err(CanvasError::UnknownHandle(handle))
        }
    }
}

impl MapCanvas for RecordingCanvas {
    fn create_marker(
        &mut self,
        coordinates: Coordinates,
        style: &MarkerStyle,
    ) -> Result<MarkerHandle, CanvasError> {
        if !coordinates.is_valid() {
            return Err(CanvasError::InvalidCoordinates {
                longitude: coordinates.longitude,
                latitude: coordinates.latitude,
            });
        }
        if self.rejected.contains(&coordinates) {
            return Err(CanvasError::Rejected(format!(
                "marker at ({}, {})",
                coordinates.longitude, coordinates.latitude
            )));
        }

        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.insert(
            handle,
            CanvasMarker {
                coordinates,
                style: style.clone(),
                popup: None,
            },
        );
        self.calls.push(CanvasCall::CreateMarker { handle });
        Ok(handle)
    }

    fn update_marker_style(
        &mut self,
        handle: MarkerHandle,
        style: &MarkerStyle,
    ) -> Result<(), CanvasError> {
        let marker = self
            .markers
            .get_mut(&handle)
            .ok_or(CanvasError::UnknownHandle(handle))?;
        marker.style = style.clone();
        self.calls.push(CanvasCall::UpdateStyle { handle });
        Ok(())
    }

    fn remove_marker(&mut self, handle: MarkerHandle) -> Result<(), CanvasError> {
        self.markers
            .remove(&handle)
            .ok_or(CanvasError::UnknownHandle(handle))?;
        self.click_bindings.remove(&handle);
        self.calls.push(CanvasCall::RemoveMarker { handle });
        Ok(())
    }

    fn bind_click(&mut self, handle: MarkerHandle, site: SiteId) {
        self.click_bindings.insert(handle, site.clone());
        self.calls.push(CanvasCall::BindClick { handle, site });
    }

    fn unbind_click(&mut self, handle: MarkerHandle) {
        self.click_bindings.remove(&handle);
        self.calls.push(CanvasCall::UnbindClick { handle });
    }

    fn open_popup(&mut self, handle: MarkerHandle, content: &str) -> Result<(), CanvasError> {
        self.ensure_exists(handle)?;
        if self.refuse_popups {
            return Err(CanvasError::Rejected(format!("popup on {}", handle)));
        }
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.popup = Some(content.to_string());
        }
        self.calls.push(CanvasCall::OpenPopup { handle });
        Ok(())
    }

    fn close_popup(&mut self, handle: MarkerHandle) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.popup = None;
        }
        self.calls.push(CanvasCall::ClosePopup { handle });
    }

    fn fly_to(&mut self, center: Coordinates, zoom: f64, duration_ms: u64) {
        self.camera = Some((center, zoom));
        self.calls.push(CanvasCall::FlyTo {
            center,
            zoom,
            duration_ms,
        });
    }

    fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.calls.push(CanvasCall::SetProjection { projection });
    }

    fn set_style(&mut self, style: MapStyle) {
        self.style = style;
        self.calls.push(CanvasCall::SetStyle { style });
    }
}

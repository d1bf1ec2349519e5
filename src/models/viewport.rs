// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map camera state and the command log entries that move it.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::site::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Projection {
    #[default]
    Globe,
    Flat,
}

impl Projection {
    pub fn toggled(self) -> Self {
        match self {
            Projection::Globe => Projection::Flat,
            Projection::Flat => Projection::Globe,
        }
    }
}

/// Base map style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MapStyle {
    #[default]
    Streets,
    Satellite,
    Terrain,
    Dark,
}

impl MapStyle {
    pub const ALL: [MapStyle; 4] = [
        MapStyle::Streets,
        MapStyle::Satellite,
        MapStyle::Terrain,
        MapStyle::Dark,
    ];

    /// Next style in the cycle, wrapping around.
    pub fn next(self) -> Self {
        match self {
            MapStyle::Streets => MapStyle::Satellite,
            MapStyle::Satellite => MapStyle::Terrain,
            MapStyle::Terrain => MapStyle::Dark,
            MapStyle::Dark => MapStyle::Streets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewportState {
    pub center: Coordinates,
    pub zoom: f64,
    pub projection: Projection,
    pub style: MapStyle,
}

/// One entry in the camera intent log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum CameraCommand {
    Reset {
        center: Coordinates,
        zoom: f64,
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    FlyTo {
        center: Coordinates,
        zoom: f64,
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    SetProjection {
        projection: Projection,
    },
    SetStyle {
        style: MapStyle,
    },
}

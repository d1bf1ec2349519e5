// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fieldscope: coordinate the map, filters and panels of a contamination
//! monitoring dashboard.
//!
//! This crate holds the session state behind the dashboard (filters,
//! enabled layers, selection, camera) and keeps an abstract map canvas in
//! sync with it. Rendering is left to whatever implements [`MapCanvas`].

pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod panels;
pub mod services;
pub mod time_utils;

pub use canvas::{MapCanvas, MarkerHandle, RecordingCanvas};
pub use config::Config;
pub use engine::MonitoringMap;
pub use error::{MapError, Result};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Selection slots and the contaminant reference cards they can point at.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::site::{ContaminantType, SiteId};

/// Identifier of a contaminant reference card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InfoId(pub String);

impl InfoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for InfoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference card describing one contaminant family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InfoRecord {
    pub id: InfoId,
    pub contaminant_type: ContaminantType,
    pub title: String,
    pub summary: String,
    pub health_effects: Vec<String>,
    pub typical_sources: Vec<String>,
    /// Advisory concentration above which crops should not be planted
    pub advisory_threshold: f64,
    pub unit: String,
}

/// At most one selected site and at most one selected info card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_site_id: Option<SiteId>,
    pub selected_info_id: Option<InfoId>,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self.selected_site_id.is_none() && self.selected_info_id.is_none()
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monitoring site model and its closed attribute domains.

use chrono::{DateTime, Utc};
use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stable identifier of a monitoring site.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SiteId(pub String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// WGS84 position as (longitude, latitude) in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Both components finite and inside the WGS84 degree ranges.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }

    /// Great-circle distance in kilometers.
    pub fn haversine_km(&self, other: &Coordinates) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other)) / 1000.0
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(c: Coordinates) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}

/// Contamination severity, ordered by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Critical,
    ];

    /// Ordinal used for styling and z-ordering (1 = least urgent).
    pub fn rank(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Moderate => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// High and above need immediate attention on the map.
    pub fn is_urgent(self) -> bool {
        self >= Severity::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ContaminantType {
    HeavyMetals,
    Pesticides,
    IndustrialByproducts,
    Microplastics,
    OrganicPollutants,
    Radiological,
    FertilizerRunoff,
}

impl ContaminantType {
    pub const ALL: [ContaminantType; 7] = [
        ContaminantType::HeavyMetals,
        ContaminantType::Pesticides,
        ContaminantType::IndustrialByproducts,
        ContaminantType::Microplastics,
        ContaminantType::OrganicPollutants,
        ContaminantType::Radiological,
        ContaminantType::FertilizerRunoff,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContaminantType::HeavyMetals => "Heavy Metals",
            ContaminantType::Pesticides => "Pesticides",
            ContaminantType::IndustrialByproducts => "Industrial Byproducts",
            ContaminantType::Microplastics => "Microplastics",
            ContaminantType::OrganicPollutants => "Organic Pollutants",
            ContaminantType::Radiological => "Radiological",
            ContaminantType::FertilizerRunoff => "Fertilizer Runoff",
        }
    }
}

/// Origin of the contamination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SourceKind {
    Agricultural,
    Industrial,
    Urban,
    Mining,
    Natural,
    Unknown,
}

impl SourceKind {
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Agricultural,
        SourceKind::Industrial,
        SourceKind::Urban,
        SourceKind::Mining,
        SourceKind::Natural,
        SourceKind::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Agricultural => "Agricultural",
            SourceKind::Industrial => "Industrial",
            SourceKind::Urban => "Urban",
            SourceKind::Mining => "Mining",
            SourceKind::Natural => "Natural",
            SourceKind::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SiteStatus {
    Active,
    Monitoring,
    Remediated,
}

impl SiteStatus {
    pub fn label(self) -> &'static str {
        match self {
            SiteStatus::Active => "Active",
            SiteStatus::Monitoring => "Monitoring",
            SiteStatus::Remediated => "Remediated",
        }
    }
}

/// Whether crops can be grown on or irrigated from the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CropCompatibility {
    Safe,
    Caution,
    Unsafe,
}

impl CropCompatibility {
    pub const ALL: [CropCompatibility; 3] = [
        CropCompatibility::Safe,
        CropCompatibility::Caution,
        CropCompatibility::Unsafe,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CropCompatibility::Safe => "Safe",
            CropCompatibility::Caution => "Caution",
            CropCompatibility::Unsafe => "Unsafe",
        }
    }
}

/// A monitoring location with its latest contamination reading.
///
/// Sites are created once when the catalog loads and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MonitoringSite {
    pub id: SiteId,
    pub name: String,
    /// Human readable place, e.g. "Fresno County, CA"
    pub location: String,
    pub coordinates: Coordinates,
    pub severity: Severity,
    pub contaminant_type: ContaminantType,
    pub source: SourceKind,
    pub status: SiteStatus,
    pub crop_compatibility: CropCompatibility,
    /// Measured concentration
    pub level: f64,
    /// Display unit for `level` (e.g. "mg/kg")
    pub unit: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_updated: DateTime<Utc>,
}

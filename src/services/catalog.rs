// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Site catalog loading and lookup.
//!
//! The catalog is the read-only source of truth for a session. It is loaded
//! once (from the bundled GeoJSON or a file) and only ever replaced wholesale.

use chrono::{DateTime, Utc};
use geojson::GeoJson;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::{
    ContaminantType, Coordinates, CropCompatibility, InfoId, InfoRecord, MonitoringSite, Severity,
    SiteId, SiteStatus, SourceKind,
};

/// Catalog shipped with the crate.
const BUILTIN_SITES: &str = include_str!("../../data/monitoring_sites.geojson");

/// Feature properties as they appear in the GeoJSON source.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteProperties {
    id: SiteId,
    name: String,
    location: String,
    severity: Severity,
    contaminant_type: ContaminantType,
    source: SourceKind,
    status: SiteStatus,
    crop_compatibility: CropCompatibility,
    level: f64,
    unit: String,
    last_updated: DateTime<Utc>,
}

/// In-memory list of monitoring sites plus contaminant reference cards.
#[derive(Debug, Clone, Default)]
pub struct SiteCatalog {
    sites: Vec<MonitoringSite>,
    info: Vec<InfoRecord>,
}

impl SiteCatalog {
    /// Build a catalog from already-constructed sites.
    ///
    /// Fails on duplicate ids, since selection and markers are keyed by id.
    pub fn new(sites: Vec<MonitoringSite>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for site in &sites {
            if !seen.insert(&site.id) {
                return Err(CatalogError::DuplicateId(site.id.clone()));
            }
            if !site.coordinates.is_valid() {
                tracing::warn!(
                    site = %site.id,
                    longitude = site.coordinates.longitude,
                    latitude = site.coordinates.latitude,
                    "Site has out-of-range coordinates and will not be drawn"
                );
            }
        }

        Ok(Self {
            sites,
            info: builtin_info_records(),
        })
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::load_from_json(BUILTIN_SITES)
    }

    /// Load sites from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load sites from a GeoJSON `FeatureCollection` of points.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| CatalogError::ParseError(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(CatalogError::ParseError(
                "expected a FeatureCollection".to_string(),
            ));
        };

        let mut sites = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.into_iter().enumerate() {
            let coordinates = match feature.geometry.map(|g| g.value) {
                Some(geojson::Value::Point(position)) => Self::convert_position(&position)?,
                Some(_) => return Err(CatalogError::UnsupportedGeometry(index)),
                None => return Err(CatalogError::MissingGeometry(index)),
            };

            let properties = feature.properties.unwrap_or_default();
            let props: SiteProperties =
                serde_json::from_value(serde_json::Value::Object(properties))
                    .map_err(|e| CatalogError::InvalidProperties(index, e.to_string()))?;

            sites.push(MonitoringSite {
                id: props.id,
                name: props.name,
                location: props.location,
                coordinates,
                severity: props.severity,
                contaminant_type: props.contaminant_type,
                source: props.source,
                status: props.status,
                crop_compatibility: props.crop_compatibility,
                level: props.level,
                unit: props.unit,
                last_updated: props.last_updated,
            });
        }

        let catalog = Self::new(sites)?;
        tracing::info!(count = catalog.len(), "Loaded monitoring sites");
        Ok(catalog)
    }

    fn convert_position(position: &[f64]) -> Result<Coordinates, CatalogError> {
        match position {
            [longitude, latitude, ..] => Ok(Coordinates::new(*longitude, *latitude)),
            _ => Err(CatalogError::ParseError(format!(
                "point position has {} components",
                position.len()
            ))),
        }
    }

    pub fn sites(&self) -> &[MonitoringSite] {
        &self.sites
    }

    pub fn get(&self, id: &SiteId) -> Option<&MonitoringSite> {
        self.sites.iter().find(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn info_records(&self) -> &[InfoRecord] {
        &self.info
    }

    pub fn info(&self, id: &InfoId) -> Option<&InfoRecord> {
        self.info.iter().find(|r| &r.id == id)
    }

    /// Reference card for a contaminant family.
    pub fn info_for(&self, contaminant: ContaminantType) -> Option<&InfoRecord> {
        self.info.iter().find(|r| r.contaminant_type == contaminant)
    }
}

/// One reference card per contaminant family.
fn builtin_info_records() -> Vec<InfoRecord> {
    ContaminantType::ALL
        .iter()
        .map(|&contaminant| match contaminant {
            ContaminantType::HeavyMetals => card(
                contaminant,
                "Lead, arsenic, cadmium and mercury accumulate in soil and are taken up by root crops.",
                &["Neurological damage", "Kidney disease", "Developmental delays in children"],
                &["Mine tailings", "Smelting", "Legacy pesticide residues"],
                80.0,
                "mg/kg",
            ),
            ContaminantType::Pesticides => card(
                contaminant,
                "Organophosphate and neonicotinoid residues carried into groundwater by irrigation.",
                &["Endocrine disruption", "Acute poisoning at high doses"],
                &["Orchard spraying", "Seed treatments"],
                1.0,
                "µg/L",
            ),
            ContaminantType::IndustrialByproducts => card(
                contaminant,
                "Solvents, PCBs and process residues discharged from manufacturing sites.",
                &["Liver damage", "Increased cancer risk"],
                &["Manufacturing discharge", "Storage tank leaks"],
                25.0,
                "mg/kg",
            ),
            ContaminantType::Microplastics => card(
                contaminant,
                "Plastic fragments under 5 mm from mulch film, biosolids and urban runoff.",
                &["Inflammation", "Carrier for adsorbed toxins"],
                &["Plastic mulch", "Biosolid application", "Stormwater"],
                100.0,
                "particles/L",
            ),
            ContaminantType::OrganicPollutants => card(
                contaminant,
                "Petroleum hydrocarbons and persistent organic compounds.",
                &["Respiratory irritation", "Increased cancer risk"],
                &["Oilfield operations", "Fuel spills"],
                50.0,
                "µg/kg",
            ),
            ContaminantType::Radiological => card(
                contaminant,
                "Naturally occurring uranium and radium concentrated in groundwater.",
                &["Kidney toxicity", "Bone cancer risk"],
                &["Granitic aquifers", "Phosphate fertilizer"],
                15.0,
                "pCi/L",
            ),
            ContaminantType::FertilizerRunoff => card(
                contaminant,
                "Nitrate and phosphate from over-application leaching into wells and channels.",
                &["Methemoglobinemia in infants", "Algal blooms downstream"],
                &["Synthetic fertilizer", "Dairy manure"],
                10.0,
                "mg/L",
            ),
        })
        .collect()
}

fn card(
    contaminant: ContaminantType,
    summary: &str,
    health_effects: &[&str],
    typical_sources: &[&str],
    advisory_threshold: f64,
    unit: &str,
) -> InfoRecord {
    // Card ids reuse the contaminant's wire name
    let id = serde_json::to_value(contaminant)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| contaminant.label().to_lowercase());

    InfoRecord {
        id: InfoId::new(id),
        contaminant_type: contaminant,
        title: contaminant.label().to_string(),
        summary: summary.to_string(),
        health_effects: health_effects.iter().map(|s| s.to_string()).collect(),
        typical_sources: typical_sources.iter().map(|s| s.to_string()).collect(),
        advisory_threshold,
        unit: unit.to_string(),
    }
}

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Feature {0} has no geometry")]
    MissingGeometry(usize),

    #[error("Feature {0} has unsupported geometry (expected Point)")]
    UnsupportedGeometry(usize),

    #[error("Feature {0} has invalid properties: {1}")]
    InvalidProperties(usize, String),

    #[error("Duplicate site id: {0}")]
    DuplicateId(SiteId),
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog loading smoke tests.
//!
//! If these fail, the bundled data no longer matches the site model and the
//! map will come up empty.

use fieldscope::models::{ContaminantType, InfoId, Severity, SiteId};
use fieldscope::services::{CatalogError, SiteCatalog};

fn load_bundled() -> SiteCatalog {
    SiteCatalog::load_from_file("data/monitoring_sites.geojson")
        .expect("Failed to load monitoring sites - is data/ committed?")
}

#[test]
fn test_bundled_file_matches_builtin() {
    let from_file = load_bundled();
    let builtin = SiteCatalog::builtin().expect("builtin catalog");
    assert_eq!(from_file.sites(), builtin.sites());
    assert_eq!(from_file.len(), 12);
}

#[test]
fn test_bundled_sites_are_well_formed() {
    let catalog = load_bundled();
    for site in catalog.sites() {
        assert!(
            site.coordinates.is_valid(),
            "{} has invalid coordinates",
            site.id
        );
        assert!(!site.name.is_empty());
        assert!(site.level >= 0.0, "{} has negative level", site.id);
    }

    let critical = catalog
        .sites()
        .iter()
        .filter(|s| s.severity == Severity::Critical)
        .count();
    assert_eq!(critical, 2);
    assert_eq!(
        catalog.get(&SiteId::from("cv-004")).map(|s| s.contaminant_type),
        Some(ContaminantType::HeavyMetals)
    );
}

#[test]
fn test_info_card_for_every_contaminant() {
    let catalog = load_bundled();
    for contaminant in ContaminantType::ALL {
        let card = catalog
            .info_for(contaminant)
            .unwrap_or_else(|| panic!("No info card for {:?}", contaminant));
        assert_eq!(catalog.info(&card.id), Some(card));
        assert!(card.advisory_threshold > 0.0);
    }
    assert!(catalog.info(&InfoId::new("asbestos")).is_none());
}

#[test]
fn test_rejects_duplicate_ids() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-120.0, 36.0]},
             "properties": {"id": "dup", "name": "One", "location": "Kern County, CA",
                "severity": "low", "contaminantType": "pesticides", "source": "agricultural",
                "status": "active", "cropCompatibility": "safe", "level": 0.1, "unit": "mg/L",
                "lastUpdated": "2024-01-01T00:00:00Z"}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-121.0, 37.0]},
             "properties": {"id": "dup", "name": "Two", "location": "Kern County, CA",
                "severity": "high", "contaminantType": "pesticides", "source": "agricultural",
                "status": "active", "cropCompatibility": "unsafe", "level": 2.0, "unit": "mg/L",
                "lastUpdated": "2024-01-01T00:00:00Z"}}
        ]
    }"#;
    let result = SiteCatalog::load_from_json(json);
    assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_str() == "dup"));
}

#[test]
fn test_rejects_non_point_geometry() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "geometry": {"type": "LineString", "coordinates": [[-120.0, 36.0], [-121.0, 37.0]]},
             "properties": {"id": "line"}}
        ]
    }"#;
    let result = SiteCatalog::load_from_json(json);
    assert!(matches!(result, Err(CatalogError::UnsupportedGeometry(0))));
}

#[test]
fn test_rejects_unknown_severity() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-120.0, 36.0]},
             "properties": {"id": "x", "name": "X", "location": "Kern County, CA",
                "severity": "apocalyptic", "contaminantType": "pesticides",
                "source": "agricultural", "status": "active", "cropCompatibility": "safe",
                "level": 0.1, "unit": "mg/L", "lastUpdated": "2024-01-01T00:00:00Z"}}
        ]
    }"#;
    let result = SiteCatalog::load_from_json(json);
    assert!(matches!(result, Err(CatalogError::InvalidProperties(0, _))));
}

#[test]
fn test_missing_file() {
    let result = SiteCatalog::load_from_file("data/no_such_file.geojson");
    assert!(matches!(result, Err(CatalogError::IoError(_))));
}

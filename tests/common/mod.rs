// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{TimeZone, Utc};
use fieldscope::models::{
    ContaminantType, Coordinates, CropCompatibility, MonitoringSite, Severity, SiteId, SiteStatus,
    SourceKind,
};
use fieldscope::services::SiteCatalog;
use fieldscope::{Config, MonitoringMap, RecordingCanvas};
use std::sync::Arc;

/// A site with the given id, severity and contaminant. Other fields are fixed.
#[allow(dead_code)]
pub fn site(
    id: &str,
    severity: Severity,
    contaminant: ContaminantType,
    coordinates: Coordinates,
) -> MonitoringSite {
    MonitoringSite {
        id: SiteId::from(id),
        name: format!("Site {}", id),
        location: "Fresno County, CA".to_string(),
        coordinates,
        severity,
        contaminant_type: contaminant,
        source: SourceKind::Agricultural,
        status: SiteStatus::Active,
        crop_compatibility: CropCompatibility::Caution,
        level: 1.0,
        unit: "mg/L".to_string(),
        last_updated: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

/// Three sites: A high, B moderate, C low.
#[allow(dead_code)]
pub fn three_site_catalog() -> SiteCatalog {
    SiteCatalog::new(vec![
        site(
            "A",
            Severity::High,
            ContaminantType::Pesticides,
            Coordinates::new(-120.0, 36.5),
        ),
        site(
            "B",
            Severity::Moderate,
            ContaminantType::HeavyMetals,
            Coordinates::new(-120.5, 37.0),
        ),
        site(
            "C",
            Severity::Low,
            ContaminantType::Microplastics,
            Coordinates::new(-121.0, 37.5),
        ),
    ])
    .expect("Failed to build test catalog")
}

#[allow(dead_code)]
pub fn map_with(config: Config, catalog: SiteCatalog) -> MonitoringMap<RecordingCanvas> {
    MonitoringMap::new(config, Arc::new(catalog), RecordingCanvas::new())
}

/// Session over the bundled catalog with default settings.
#[allow(dead_code)]
pub fn builtin_map() -> MonitoringMap<RecordingCanvas> {
    map_with(
        Config::default(),
        SiteCatalog::builtin().expect("Failed to load bundled catalog - is data/ committed?"),
    )
}

#[allow(dead_code)]
pub fn ids(raw: &[&str]) -> Vec<SiteId> {
    raw.iter().map(|id| SiteId::from(*id)).collect()
}

/// The selected site, if any, is visible and drawn as selected.
#[allow(dead_code)]
pub fn assert_selection_consistent(map: &MonitoringMap<RecordingCanvas>) {
    if let Some(id) = &map.selection().selected_site_id {
        assert!(
            map.is_visible(id),
            "Selected site {} is not in the visible set",
            id
        );
        let handle = map.marker_for(id).expect("Selected site has no marker");
        let marker = map.canvas().marker(handle).expect("Marker missing on canvas");
        assert!(marker.style.selected, "Selected marker not highlighted");
    }
    let highlighted = map
        .canvas()
        .markers()
        .values()
        .filter(|m| m.style.selected)
        .count();
    assert!(highlighted <= 1, "More than one marker highlighted");
}

/// Canvas markers are exactly the visible sites with valid coordinates.
#[allow(dead_code)]
pub fn assert_markers_match_visible(map: &MonitoringMap<RecordingCanvas>) {
    let drawable: Vec<&SiteId> = map
        .visible_sites()
        .into_iter()
        .filter(|s| s.coordinates.is_valid())
        .map(|s| &s.id)
        .collect();
    assert_eq!(
        map.canvas().marker_count(),
        drawable.len(),
        "Marker count does not match visible set"
    );
    for id in drawable {
        let handle = map
            .marker_for(id)
            .unwrap_or_else(|| panic!("No marker for visible site {}", id));
        assert_eq!(map.canvas().click(handle).as_ref(), Some(id));
    }
}

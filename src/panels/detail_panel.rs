// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Detail panel view for the selected site and the selected info card.

use serde::Serialize;

use crate::models::{
    Coordinates, InfoRecord, MonitoringSite, SelectionState, Severity, SiteId,
};
use crate::services::{MarkerStyle, SiteCatalog};
use crate::time_utils::format_utc_rfc3339;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySite {
    pub id: SiteId,
    pub name: String,
    pub severity: Severity,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDetail {
    pub id: SiteId,
    pub name: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub severity: Severity,
    pub severity_label: &'static str,
    /// Same color the marker uses
    pub color: &'static str,
    pub contaminant_label: &'static str,
    pub source_label: &'static str,
    pub status_label: &'static str,
    pub crop_label: &'static str,
    /// e.g. "4.80 mg/kg"
    pub reading: String,
    /// Reading is above the contaminant's advisory threshold
    pub exceeds_advisory: bool,
    pub last_updated: String,
    /// Visible sites within the configured radius, closest first
    pub nearby: Vec<NearbySite>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPanelView {
    pub site: Option<SiteDetail>,
    pub info: Option<InfoRecord>,
}

impl DetailPanelView {
    /// Nothing to show; the panel is closed.
    pub fn is_closed(&self) -> bool {
        self.site.is_none() && self.info.is_none()
    }
}

pub fn build(
    catalog: &SiteCatalog,
    selection: &SelectionState,
    visible: &[&MonitoringSite],
    radius_km: f64,
) -> DetailPanelView {
    let site = selection
        .selected_site_id
        .as_ref()
        .and_then(|id| catalog.get(id))
        .map(|site| site_detail(catalog, site, visible, radius_km));
    let info = selection
        .selected_info_id
        .as_ref()
        .and_then(|id| catalog.info(id))
        .cloned();

    DetailPanelView { site, info }
}

fn site_detail(
    catalog: &SiteCatalog,
    site: &MonitoringSite,
    visible: &[&MonitoringSite],
    radius_km: f64,
) -> SiteDetail {
    let style = MarkerStyle::for_site(site, true);
    let exceeds_advisory = catalog
        .info_for(site.contaminant_type)
        .filter(|card| card.unit == site.unit)
        .is_some_and(|card| site.level > card.advisory_threshold);

    SiteDetail {
        id: site.id.clone(),
        name: site.name.clone(),
        location: site.location.clone(),
        coordinates: site.coordinates,
        severity: site.severity,
        severity_label: site.severity.label(),
        color: style.color,
        contaminant_label: site.contaminant_type.label(),
        source_label: site.source.label(),
        status_label: site.status.label(),
        crop_label: site.crop_compatibility.label(),
        reading: format!("{:.2} {}", site.level, site.unit),
        exceeds_advisory,
        last_updated: format_utc_rfc3339(site.last_updated),
        nearby: nearby_sites(site, visible, radius_km),
    }
}

fn nearby_sites(site: &MonitoringSite, visible: &[&MonitoringSite], radius_km: f64) -> Vec<NearbySite> {
    if !site.coordinates.is_valid() {
        return Vec::new();
    }
    let mut nearby: Vec<NearbySite> = visible
        .iter()
        .filter(|other| other.id != site.id && other.coordinates.is_valid())
        .map(|other| NearbySite {
            id: other.id.clone(),
            name: other.name.clone(),
            severity: other.severity,
            distance_km: site.coordinates.haversine_km(&other.coordinates),
        })
        .filter(|n| n.distance_km <= radius_km)
        .collect();
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}

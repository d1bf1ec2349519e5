// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marker reconciliation.
//!
//! Keeps the markers on the canvas equal to the visible site set. The work is
//! split in two: [`reconcile`] is a pure diff between two marker lists, and
//! [`MarkerSynchronizer::sync`] applies that diff to a [`MapCanvas`], touching
//! only the markers that changed.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::canvas::{MapCanvas, MarkerHandle};
use crate::models::{Coordinates, MonitoringSite, Severity, SiteId, SiteStatus};

/// Color and glyph for each severity. The only place severity maps to visuals.
const fn severity_palette(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::Low => ("#22c55e", "dot"),
        Severity::Moderate => ("#eab308", "diamond"),
        Severity::High => ("#f97316", "alert"),
        Severity::Critical => ("#dc2626", "hazard"),
    }
}

/// Visual state of one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub severity: Severity,
    pub color: &'static str,
    pub glyph: &'static str,
    /// Animated ring around the glyph
    pub pulsing: bool,
    /// Highlight kept even while unselected
    pub attention: bool,
    /// Remediated sites are drawn faded
    pub muted: bool,
    pub selected: bool,
    pub z_index: i32,
}

impl MarkerStyle {
    pub fn new(severity: Severity, status: SiteStatus, selected: bool) -> Self {
        let (color, glyph) = severity_palette(severity);
        let urgent = severity.is_urgent();
        Self {
            severity,
            color,
            glyph,
            pulsing: urgent,
            attention: urgent,
            muted: status == SiteStatus::Remediated,
            selected,
            z_index: i32::from(severity.rank()) * 10 + if selected { 100 } else { 0 },
        }
    }

    pub fn for_site(site: &MonitoringSite, selected: bool) -> Self {
        Self::new(site.severity, site.status, selected)
    }
}

/// What a marker should look like for one visible site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub site_id: SiteId,
    pub coordinates: Coordinates,
    pub label: String,
    pub style: MarkerStyle,
}

impl MarkerSpec {
    pub fn for_site(site: &MonitoringSite, selected: bool) -> Self {
        Self {
            site_id: site.id.clone(),
            coordinates: site.coordinates,
            label: site.name.clone(),
            style: MarkerStyle::for_site(site, selected),
        }
    }
}

/// Build marker specs for a visible set, flagging the selected site.
pub fn specs_for<'a>(
    visible: impl IntoIterator<Item = &'a MonitoringSite>,
    selected: Option<&SiteId>,
) -> Vec<MarkerSpec> {
    visible
        .into_iter()
        .map(|site| MarkerSpec::for_site(site, selected == Some(&site.id)))
        .collect()
}

/// Result of diffing two marker lists.
///
/// `to_create`, `retained` and `to_remove` partition the union of both inputs;
/// `to_restyle` is the subset of `retained` whose style changed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDiff {
    pub to_create: Vec<SiteId>,
    pub to_remove: Vec<SiteId>,
    pub to_restyle: Vec<SiteId>,
    pub retained: Vec<SiteId>,
}

impl MarkerDiff {
    /// True when applying the diff would not touch the canvas.
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty() && self.to_restyle.is_empty()
    }
}

/// Diff `previous` against `next` by site id.
///
/// Creations and restyles follow `next` order, removals follow `previous`.
pub fn reconcile(previous: &[MarkerSpec], next: &[MarkerSpec]) -> MarkerDiff {
    let next_by_id: HashMap<&SiteId, &MarkerSpec> =
        next.iter().map(|spec| (&spec.site_id, spec)).collect();
    let prev_by_id: HashMap<&SiteId, &MarkerSpec> =
        previous.iter().map(|spec| (&spec.site_id, spec)).collect();

    let mut diff = MarkerDiff::default();

    for spec in previous {
        if !next_by_id.contains_key(&spec.site_id) {
            diff.to_remove.push(spec.site_id.clone());
        }
    }

    for spec in next {
        match prev_by_id.get(&spec.site_id) {
            None => diff.to_create.push(spec.site_id.clone()),
            Some(prev) => {
                if prev.style != spec.style {
                    diff.to_restyle.push(spec.site_id.clone());
                }
                diff.retained.push(spec.site_id.clone());
            }
        }
    }

    diff
}

/// Outcome of one synchronization pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub created: Vec<SiteId>,
    pub removed: Vec<SiteId>,
    pub restyled: Vec<SiteId>,
    /// Sites that could not be drawn this pass (retried on the next one)
    pub skipped: Vec<SiteId>,
}

#[derive(Debug, Clone)]
struct LiveMarker {
    handle: MarkerHandle,
    spec: MarkerSpec,
}

/// Owns the markers currently on the canvas.
#[derive(Debug, Default)]
pub struct MarkerSynchronizer {
    /// Markers that exist on the canvas, in render order
    live: Vec<LiveMarker>,
}

impl MarkerSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Specs of markers actually on the canvas.
    pub fn live_specs(&self) -> Vec<MarkerSpec> {
        self.live.iter().map(|m| m.spec.clone()).collect()
    }

    pub fn live_ids(&self) -> Vec<SiteId> {
        self.live.iter().map(|m| m.spec.site_id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn handle_for_site(&self, site: &SiteId) -> Option<MarkerHandle> {
        self.live
            .iter()
            .find(|m| &m.spec.site_id == site)
            .map(|m| m.handle)
    }

    pub fn site_for_handle(&self, handle: MarkerHandle) -> Option<&SiteId> {
        self.live
            .iter()
            .find(|m| m.handle == handle)
            .map(|m| &m.spec.site_id)
    }

    /// Bring the canvas in line with `next`.
    ///
    /// A marker that cannot be created (invalid coordinates or a canvas error)
    /// is skipped and logged; the rest of the batch still applies.
    pub fn sync<C: MapCanvas>(&mut self, canvas: &mut C, next: &[MarkerSpec]) -> SyncReport {
        let previous = self.live_specs();
        let diff = reconcile(&previous, next);
        let mut report = SyncReport::default();

        if diff.is_empty() {
            self.order_like(next);
            return report;
        }

        let remove: HashSet<&SiteId> = diff.to_remove.iter().collect();
        let mut kept = Vec::with_capacity(self.live.len());
        for marker in self.live.drain(..) {
            if remove.contains(&marker.spec.site_id) {
                canvas.unbind_click(marker.handle);
                if let Err(e) = canvas.remove_marker(marker.handle) {
                    tracing::warn!(
                        site = %marker.spec.site_id,
                        handle = %marker.handle,
                        error = %e,
                        "Marker already gone from canvas"
                    );
                }
                report.removed.push(marker.spec.site_id);
            } else {
                kept.push(marker);
            }
        }
        self.live = kept;

        let next_by_id: HashMap<&SiteId, &MarkerSpec> =
            next.iter().map(|spec| (&spec.site_id, spec)).collect();

        for site_id in &diff.to_restyle {
            let Some(spec) = next_by_id.get(site_id) else {
                continue;
            };
            let Some(marker) = self.live.iter_mut().find(|m| &m.spec.site_id == site_id) else {
                continue;
            };
            match canvas.update_marker_style(marker.handle, &spec.style) {
                Ok(()) => {
                    marker.spec = (*spec).clone();
                    report.restyled.push(site_id.clone());
                }
                Err(e) => {
                    tracing::warn!(site = %site_id, error = %e, "Failed to restyle marker");
                }
            }
        }

        for site_id in &diff.to_create {
            let Some(spec) = next_by_id.get(site_id) else {
                continue;
            };
            if !spec.coordinates.is_valid() {
                tracing::warn!(
                    site = %site_id,
                    longitude = spec.coordinates.longitude,
                    latitude = spec.coordinates.latitude,
                    "Skipping marker with invalid coordinates"
                );
                report.skipped.push(site_id.clone());
                continue;
            }
            match canvas.create_marker(spec.coordinates, &spec.style) {
                Ok(handle) => {
                    canvas.bind_click(handle, site_id.clone());
                    self.live.push(LiveMarker {
                        handle,
                        spec: (*spec).clone(),
                    });
                    report.created.push(site_id.clone());
                }
                Err(e) => {
                    tracing::warn!(site = %site_id, error = %e, "Failed to create marker");
                    report.skipped.push(site_id.clone());
                }
            }
        }

        self.order_like(next);

        tracing::debug!(
            created = report.created.len(),
            removed = report.removed.len(),
            restyled = report.restyled.len(),
            skipped = report.skipped.len(),
            live = self.live.len(),
            "Markers reconciled"
        );

        report
    }

    /// Remove every marker, e.g. before the catalog is replaced.
    pub fn clear<C: MapCanvas>(&mut self, canvas: &mut C) {
        for marker in self.live.drain(..) {
            canvas.unbind_click(marker.handle);
            if let Err(e) = canvas.remove_marker(marker.handle) {
                tracing::warn!(site = %marker.spec.site_id, error = %e, "Marker already gone from canvas");
            }
        }
    }

    fn order_like(&mut self, next: &[MarkerSpec]) {
        let position: HashMap<&SiteId, usize> = next
            .iter()
            .enumerate()
            .map(|(i, spec)| (&spec.site_id, i))
            .collect();
        self.live
            .sort_by_key(|m| position.get(&m.spec.site_id).copied().unwrap_or(usize::MAX));
    }
}

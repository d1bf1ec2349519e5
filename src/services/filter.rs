// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Visible-set computation.
//!
//! Pure functions only: the same catalog, filters and layers always produce
//! the same sites in catalog order.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::models::{ContaminantType, EmptyLayerPolicy, FilterState, LayerState, MonitoringSite, SiteId};
use crate::services::catalog::SiteCatalog;
use crate::time_utils::{parse_date_bound, BoundSide};

/// Filter predicates with search text and date bounds pre-parsed once.
struct Predicate<'a> {
    filters: &'a FilterState,
    needle: String,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl<'a> Predicate<'a> {
    fn new(filters: &'a FilterState) -> Self {
        Self {
            filters,
            needle: filters.search.trim().to_lowercase(),
            start: filters
                .date_range
                .start
                .as_deref()
                .and_then(|s| parse_date_bound(s, BoundSide::Start)),
            end: filters
                .date_range
                .end
                .as_deref()
                .and_then(|s| parse_date_bound(s, BoundSide::End)),
        }
    }

    fn matches(&self, site: &MonitoringSite) -> bool {
        self.matches_search(site)
            && self.filters.contamination_type.matches(&site.contaminant_type)
            && self.filters.severity.matches(&site.severity)
            && self.filters.source.matches(&site.source)
            && self.filters.crop_compatibility.matches(&site.crop_compatibility)
            && self.matches_dates(site)
    }

    fn matches_search(&self, site: &MonitoringSite) -> bool {
        self.needle.is_empty()
            || site.name.to_lowercase().contains(&self.needle)
            || site.location.to_lowercase().contains(&self.needle)
    }

    fn matches_dates(&self, site: &MonitoringSite) -> bool {
        let at = site.last_updated;
        self.start.is_none_or(|start| at >= start) && self.end.is_none_or(|end| at <= end)
    }
}

/// Sites passing every filter and layer predicate, in catalog order.
///
/// An empty catalog yields an empty list. Malformed date bounds are ignored
/// and an inverted range (start after end) matches nothing.
pub fn compute_visible<'a>(
    catalog: &'a SiteCatalog,
    filters: &FilterState,
    layers: &LayerState,
    policy: EmptyLayerPolicy,
) -> Vec<&'a MonitoringSite> {
    let predicate = Predicate::new(filters);
    catalog
        .sites()
        .iter()
        .filter(|site| layers.admits(site.contaminant_type, policy))
        .filter(|site| predicate.matches(site))
        .collect()
}

/// Ids of `compute_visible`, in the same order.
pub fn visible_ids(
    catalog: &SiteCatalog,
    filters: &FilterState,
    layers: &LayerState,
    policy: EmptyLayerPolicy,
) -> Vec<SiteId> {
    compute_visible(catalog, filters, layers, policy)
        .into_iter()
        .map(|site| site.id.clone())
        .collect()
}

/// Per-layer site counts under `filters`, ignoring the layer predicate.
///
/// Used for the badges next to each layer toggle, so a disabled layer still
/// shows how many sites enabling it would reveal.
pub fn count_by_layer(
    catalog: &SiteCatalog,
    filters: &FilterState,
) -> BTreeMap<ContaminantType, usize> {
    let predicate = Predicate::new(filters);
    let mut counts: BTreeMap<ContaminantType, usize> =
        ContaminantType::ALL.iter().map(|&t| (t, 0)).collect();
    for site in catalog.sites().iter().filter(|s| predicate.matches(s)) {
        *counts.entry(site.contaminant_type).or_insert(0) += 1;
    }
    counts
}

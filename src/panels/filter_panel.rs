// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filter panel view.

use serde::Serialize;

use crate::models::{
    ContaminantType, CropCompatibility, FilterState, Severity, SourceKind,
};
use crate::panels::wire_name;
use crate::services::QuickPreset;

/// One entry in a dropdown. `value` is what goes back in a [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPanelView {
    pub filters: FilterState,
    /// Badge on the "clear filters" button
    pub active_count: usize,
    pub contaminant_options: Vec<FilterOption>,
    pub severity_options: Vec<FilterOption>,
    pub source_options: Vec<FilterOption>,
    pub crop_options: Vec<FilterOption>,
    pub presets: Vec<&'static str>,
    pub visible_count: usize,
    pub total_count: usize,
}

pub fn build(filters: &FilterState, visible_count: usize, total_count: usize) -> FilterPanelView {
    FilterPanelView {
        active_count: filters.active_count(),
        contaminant_options: options(&ContaminantType::ALL, ContaminantType::label, |t| {
            filters.contamination_type.is_only(t)
        }),
        severity_options: options(&Severity::ALL, Severity::label, |s| {
            filters.severity.is_only(s)
        }),
        source_options: options(&SourceKind::ALL, SourceKind::label, |s| {
            filters.source.is_only(s)
        }),
        crop_options: options(&CropCompatibility::ALL, CropCompatibility::label, |c| {
            filters.crop_compatibility.is_only(c)
        }),
        presets: QuickPreset::ALL.iter().map(|p| p.name()).collect(),
        filters: filters.clone(),
        visible_count,
        total_count,
    }
}

/// "All" first, then one option per variant.
fn options<T>(
    values: &[T],
    label: fn(T) -> &'static str,
    is_selected: impl Fn(&T) -> bool,
) -> Vec<FilterOption>
where
    T: Copy + Serialize,
{
    let any_selected = values.iter().any(&is_selected);
    std::iter::once(FilterOption {
        value: "all".to_string(),
        label: "All",
        selected: !any_selected,
    })
    .chain(values.iter().map(|v| FilterOption {
        value: wire_name(v),
        label: label(*v),
        selected: is_selected(v),
    }))
    .collect()
}

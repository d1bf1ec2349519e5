// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Layer panel view: one toggle per contaminant type with a site count.

use serde::Serialize;

use crate::models::{ContaminantType, EmptyLayerPolicy, FilterState, LayerState};
use crate::services::{count_by_layer, SiteCatalog};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRow {
    pub layer: ContaminantType,
    pub label: &'static str,
    pub enabled: bool,
    /// Sites of this type passing the filters, whether or not the layer is on
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPanelView {
    pub rows: Vec<LayerRow>,
    /// False when the layer set currently restricts nothing
    pub filtering: bool,
    pub empty_policy: EmptyLayerPolicy,
}

pub fn build(
    catalog: &SiteCatalog,
    filters: &FilterState,
    layers: &LayerState,
    policy: EmptyLayerPolicy,
) -> LayerPanelView {
    let counts = count_by_layer(catalog, filters);
    let rows = ContaminantType::ALL
        .iter()
        .map(|&layer| LayerRow {
            layer,
            label: layer.label(),
            enabled: layers.is_enabled(layer),
            count: counts.get(&layer).copied().unwrap_or(0),
        })
        .collect();

    LayerPanelView {
        rows,
        filtering: layers.is_filtering(policy),
        empty_policy: policy,
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only panel views and the events panels send back.
//!
//! Views are plain serializable snapshots built from engine state. Panels
//! never mutate state directly; they emit a [`PanelEvent`].

pub mod detail_panel;
pub mod filter_panel;
pub mod layer_panel;

use serde::{Deserialize, Serialize};

use crate::models::{ContaminantType, FilterState, InfoId, SiteId};
use crate::services::QuickPreset;

pub use detail_panel::{DetailPanelView, NearbySite, SiteDetail};
pub use filter_panel::{FilterOption, FilterPanelView};
pub use layer_panel::{LayerPanelView, LayerRow};

/// Something the user did in a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelEvent {
    FiltersChanged { filters: FilterState },
    SearchInput { text: String },
    ClearFilters,
    ApplyPreset { preset: QuickPreset },
    LayerToggled { layer: ContaminantType },
    ShowAllLayers,
    HideAllLayers,
    #[serde(rename_all = "camelCase")]
    SiteSelected { site_id: SiteId },
    /// Close the site detail
    Close,
    #[serde(rename_all = "camelCase")]
    InfoSelected { info_id: InfoId },
    InfoClosed,
    ResetView,
    ToggleProjection,
    CycleStyle,
}

/// Wire name of a kebab-case enum value, e.g. `"heavy-metals"`.
pub(crate) fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event: PanelEvent =
            serde_json::from_str(r#"{"type":"siteSelected","siteId":"cv-004"}"#).unwrap();
        assert_eq!(
            event,
            PanelEvent::SiteSelected {
                site_id: SiteId::from("cv-004")
            }
        );

        let event: PanelEvent =
            serde_json::from_str(r#"{"type":"layerToggled","layer":"heavy-metals"}"#).unwrap();
        assert_eq!(
            event,
            PanelEvent::LayerToggled {
                layer: ContaminantType::HeavyMetals
            }
        );

        let json = serde_json::to_string(&PanelEvent::ResetView).unwrap();
        assert_eq!(json, r#"{"type":"resetView"}"#);
    }

    #[test]
    fn test_filters_changed_accepts_all() {
        let event: PanelEvent = serde_json::from_str(
            r#"{"type":"filtersChanged","filters":{"search":"","severity":"critical","source":"all"}}"#,
        )
        .unwrap();
        let PanelEvent::FiltersChanged { filters } = event else {
            panic!("wrong variant");
        };
        assert!(filters.source.is_all());
        assert!(!filters.severity.is_all());
    }

    #[test]
    fn test_wire_name() {
        assert_eq!(wire_name(&ContaminantType::HeavyMetals), "heavy-metals");
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quick-filter presets shown as chips above the filter panel.

use serde::{Deserialize, Serialize};

use crate::models::{
    ContaminantType, CropCompatibility, FieldFilter, FilterPatch, Severity, SourceKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickPreset {
    /// Only critical sites
    Critical,
    /// High severity sites
    HighRisk,
    Pesticides,
    HeavyMetals,
    /// Everything traced to industry
    Industrial,
    /// Land not fit for planting
    CropUnsafe,
}

impl QuickPreset {
    pub const ALL: [QuickPreset; 6] = [
        QuickPreset::Critical,
        QuickPreset::HighRisk,
        QuickPreset::Pesticides,
        QuickPreset::HeavyMetals,
        QuickPreset::Industrial,
        QuickPreset::CropUnsafe,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QuickPreset::Critical => "critical",
            QuickPreset::HighRisk => "high-risk",
            QuickPreset::Pesticides => "pesticides",
            QuickPreset::HeavyMetals => "heavy-metals",
            QuickPreset::Industrial => "industrial",
            QuickPreset::CropUnsafe => "crop-unsafe",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Fields this preset overrides. Anything unset keeps its current value.
    pub fn patch(self) -> FilterPatch {
        match self {
            QuickPreset::Critical => FilterPatch {
                severity: Some(FieldFilter::Only(Severity::Critical)),
                ..FilterPatch::default()
            },
            QuickPreset::HighRisk => FilterPatch {
                severity: Some(FieldFilter::Only(Severity::High)),
                ..FilterPatch::default()
            },
            QuickPreset::Pesticides => FilterPatch {
                contamination_type: Some(FieldFilter::Only(ContaminantType::Pesticides)),
                ..FilterPatch::default()
            },
            QuickPreset::HeavyMetals => FilterPatch {
                contamination_type: Some(FieldFilter::Only(ContaminantType::HeavyMetals)),
                ..FilterPatch::default()
            },
            QuickPreset::Industrial => FilterPatch {
                source: Some(FieldFilter::Only(SourceKind::Industrial)),
                ..FilterPatch::default()
            },
            QuickPreset::CropUnsafe => FilterPatch {
                crop_compatibility: Some(FieldFilter::Only(CropCompatibility::Unsafe)),
                ..FilterPatch::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterState;

    #[test]
    fn test_from_name() {
        assert_eq!(QuickPreset::from_name("High-Risk"), Some(QuickPreset::HighRisk));
        assert_eq!(QuickPreset::from_name("nope"), None);
        for preset in QuickPreset::ALL {
            assert_eq!(QuickPreset::from_name(preset.name()), Some(preset));
        }
    }

    #[test]
    fn test_patch_preserves_search() {
        let state = FilterState::default().with_search("kern");
        let next = state.apply(&QuickPreset::Industrial.patch());
        assert_eq!(next.search, "kern");
        assert_eq!(next.source, FieldFilter::Only(SourceKind::Industrial));
        assert!(next.severity.is_all());
    }

    #[test]
    fn test_serde_name_matches_name() {
        for preset in QuickPreset::ALL {
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.name()));
        }
    }
}

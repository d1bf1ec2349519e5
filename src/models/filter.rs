// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User-editable filter parameters.
//!
//! `FilterState` is a value object: every edit produces a new state via the
//! consuming `with_*` methods, which keeps change detection a plain `==`.

use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::site::{ContaminantType, CropCompatibility, Severity, SourceKind};

/// Either "all" or exactly one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldFilter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> FieldFilter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FieldFilter::All)
    }

    /// True only when narrowed to exactly `value`.
    pub fn is_only(&self, value: &T) -> bool {
        matches!(self, FieldFilter::Only(wanted) if wanted == value)
    }
}

impl<T> From<Option<T>> for FieldFilter<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldFilter::Only(v),
            None => FieldFilter::All,
        }
    }
}

impl<T: Serialize> Serialize for FieldFilter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldFilter::All => serializer.serialize_str("all"),
            FieldFilter::Only(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldFilter<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case("all") {
            return Ok(FieldFilter::All);
        }
        T::deserialize(raw.into_deserializer()).map(FieldFilter::Only)
    }
}

/// Inclusive date bounds as typed by the user (ISO 8601).
///
/// Bounds are kept as raw strings; malformed values are treated as unbounded
/// when filtering, never rejected at input time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.end.as_deref().is_none_or(|s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Free text, matched case-insensitively against name and location
    pub search: String,
    pub contamination_type: FieldFilter<ContaminantType>,
    pub severity: FieldFilter<Severity>,
    pub source: FieldFilter<SourceKind>,
    pub crop_compatibility: FieldFilter<CropCompatibility>,
    pub date_range: DateRange,
}

impl FilterState {
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    pub fn with_contamination_type(self, value: FieldFilter<ContaminantType>) -> Self {
        Self {
            contamination_type: value,
            ..self
        }
    }

    pub fn with_severity(self, value: FieldFilter<Severity>) -> Self {
        Self {
            severity: value,
            ..self
        }
    }

    pub fn with_source(self, value: FieldFilter<SourceKind>) -> Self {
        Self {
            source: value,
            ..self
        }
    }

    pub fn with_crop_compatibility(self, value: FieldFilter<CropCompatibility>) -> Self {
        Self {
            crop_compatibility: value,
            ..self
        }
    }

    pub fn with_date_range(self, date_range: DateRange) -> Self {
        Self { date_range, ..self }
    }

    /// Overlay the fields set in `patch`, keeping the rest.
    pub fn apply(self, patch: &FilterPatch) -> Self {
        Self {
            search: patch.search.clone().unwrap_or(self.search),
            contamination_type: patch.contamination_type.unwrap_or(self.contamination_type),
            severity: patch.severity.unwrap_or(self.severity),
            source: patch.source.unwrap_or(self.source),
            crop_compatibility: patch.crop_compatibility.unwrap_or(self.crop_compatibility),
            date_range: patch.date_range.clone().unwrap_or(self.date_range),
        }
    }

    /// Number of predicates that currently narrow the result.
    pub fn active_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            !self.contamination_type.is_all(),
            !self.severity.is_all(),
            !self.source.is_all(),
            !self.crop_compatibility.is_all(),
            !self.date_range.is_unbounded(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial overlay onto a `FilterState`, produced by quick-filter presets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contamination_type: Option<FieldFilter<ContaminantType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<FieldFilter<Severity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<FieldFilter<SourceKind>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_compatibility: Option<FieldFilter<CropCompatibility>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

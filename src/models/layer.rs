// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contaminant layer toggles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::site::ContaminantType;

/// How an empty layer set is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyLayerPolicy {
    /// No layer filter is applied; every contaminant type passes.
    #[default]
    MatchAll,
    /// Nothing passes until at least one layer is enabled.
    MatchNone,
}

/// Set of contaminant layers currently enabled.
///
/// Like `FilterState`, edits return a new value rather than mutating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerState {
    enabled: BTreeSet<ContaminantType>,
}

impl LayerState {
    /// No layers enabled.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every known layer enabled.
    pub fn all() -> Self {
        Self::with_defaults(ContaminantType::ALL)
    }

    pub fn with_defaults(layers: impl IntoIterator<Item = ContaminantType>) -> Self {
        Self {
            enabled: layers.into_iter().collect(),
        }
    }

    /// Flip one layer on or off.
    pub fn toggled(&self, layer: ContaminantType) -> Self {
        let mut enabled = self.enabled.clone();
        if !enabled.remove(&layer) {
            enabled.insert(layer);
        }
        Self { enabled }
    }

    pub fn is_enabled(&self, layer: ContaminantType) -> bool {
        self.enabled.contains(&layer)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ContaminantType> + '_ {
        self.enabled.iter().copied()
    }

    /// Whether sites of `layer` pass the layer predicate.
    pub fn admits(&self, layer: ContaminantType, policy: EmptyLayerPolicy) -> bool {
        if self.enabled.is_empty() {
            return policy == EmptyLayerPolicy::MatchAll;
        }
        self.enabled.contains(&layer)
    }

    /// Whether the layer predicate narrows the result at all.
    pub fn is_filtering(&self, policy: EmptyLayerPolicy) -> bool {
        if self.enabled.is_empty() {
            return policy == EmptyLayerPolicy::MatchNone;
        }
        self.enabled.len() < ContaminantType::ALL.len()
    }
}

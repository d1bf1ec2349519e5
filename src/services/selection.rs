// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Selection controller: one site slot and one info-card slot.

use crate::models::{InfoId, SelectionState, SiteId};

#[derive(Debug, Default, Clone)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected_site(&self) -> Option<&SiteId> {
        self.state.selected_site_id.as_ref()
    }

    pub fn selected_info(&self) -> Option<&InfoId> {
        self.state.selected_info_id.as_ref()
    }

    /// Select a site. The caller has already checked it is visible.
    ///
    /// Returns the previously selected site, if any.
    pub fn select_site(&mut self, id: SiteId) -> Option<SiteId> {
        tracing::debug!(site = %id, "Site selected");
        self.state.selected_site_id.replace(id)
    }

    pub fn clear_site(&mut self) -> Option<SiteId> {
        self.state.selected_site_id.take()
    }

    pub fn select_info(&mut self, id: InfoId) -> Option<InfoId> {
        tracing::debug!(info = %id, "Info card selected");
        self.state.selected_info_id.replace(id)
    }

    pub fn clear_info(&mut self) -> Option<InfoId> {
        self.state.selected_info_id.take()
    }

    pub fn clear_all(&mut self) {
        self.state = SelectionState::default();
    }

    /// Drop the site selection if it is no longer in `visible`.
    ///
    /// Returns the id that was cleared.
    pub fn retain_visible(&mut self, visible: &[SiteId]) -> Option<SiteId> {
        let selected = self.state.selected_site_id.as_ref()?;
        if visible.contains(selected) {
            return None;
        }
        let cleared = self.state.selected_site_id.take();
        if let Some(id) = &cleared {
            tracing::debug!(site = %id, "Selected site filtered out; clearing selection");
        }
        cleared
    }
}

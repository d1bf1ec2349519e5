// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The coordinating component.
//!
//! `MonitoringMap` owns every piece of session state and the canvas. Panels
//! talk to it only through the `on_*` callbacks (or [`MonitoringMap::dispatch`]).
//! Each filter or layer edit runs exactly one visible-set recomputation and
//! one marker reconciliation before returning. After every recomputation the
//! selected site is dropped if it is no longer visible.

use std::sync::Arc;
use std::time::Instant;

use crate::canvas::{MapCanvas, MarkerHandle};
use crate::config::Config;
use crate::error::{MapError, Result};
use crate::models::{
    ContaminantType, FilterState, InfoId, LayerState, MapStyle, MonitoringSite, Projection,
    SelectionState, SiteId, ViewportState,
};
use crate::panels::{self, DetailPanelView, FilterPanelView, LayerPanelView, PanelEvent};
use crate::services::markers::specs_for;
use crate::services::{
    compute_visible, MarkerSynchronizer, QuickPreset, SearchDebouncer, SelectionController,
    SiteCatalog, SyncReport, ViewportController,
};

pub struct MonitoringMap<C: MapCanvas> {
    config: Config,
    catalog: Arc<SiteCatalog>,
    filters: FilterState,
    layers: LayerState,
    selection: SelectionController,
    viewport: ViewportController,
    markers: MarkerSynchronizer,
    search: SearchDebouncer,
    canvas: C,
    visible: Vec<SiteId>,
}

impl<C: MapCanvas> MonitoringMap<C> {
    /// Build the session and draw the initial markers.
    pub fn new(config: Config, catalog: Arc<SiteCatalog>, canvas: C) -> Self {
        let mut map = Self {
            filters: FilterState::default(),
            layers: config.default_layers.clone(),
            selection: SelectionController::new(),
            viewport: ViewportController::new(config.camera),
            markers: MarkerSynchronizer::new(),
            search: SearchDebouncer::new(config.search_debounce()),
            catalog,
            canvas,
            visible: Vec::new(),
            config,
        };
        map.refresh();
        map
    }

    // ─── Read access ─────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn layers(&self) -> &LayerState {
        &self.layers
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Camera state at `now`.
    pub fn camera_at(&self, now: Instant) -> ViewportState {
        self.viewport.camera_at(now)
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Ids of the visible set, in catalog order.
    pub fn visible_ids(&self) -> &[SiteId] {
        &self.visible
    }

    pub fn visible_sites(&self) -> Vec<&MonitoringSite> {
        compute_visible(
            &self.catalog,
            &self.filters,
            &self.layers,
            self.config.empty_layer_policy,
        )
    }

    pub fn is_visible(&self, id: &SiteId) -> bool {
        self.visible.contains(id)
    }

    /// Site currently shown as selected, if any.
    pub fn selected_site(&self) -> Option<&MonitoringSite> {
        self.selection
            .selected_site()
            .and_then(|id| self.catalog.get(id))
    }

    pub fn marker_for(&self, id: &SiteId) -> Option<MarkerHandle> {
        self.markers.handle_for_site(id)
    }

    pub fn filter_panel(&self) -> FilterPanelView {
        panels::filter_panel::build(&self.filters, self.visible.len(), self.catalog.len())
    }

    pub fn layer_panel(&self) -> LayerPanelView {
        panels::layer_panel::build(
            &self.catalog,
            &self.filters,
            &self.layers,
            self.config.empty_layer_policy,
        )
    }

    pub fn detail_panel(&self) -> DetailPanelView {
        panels::detail_panel::build(
            &self.catalog,
            self.selection.state(),
            &self.visible_sites(),
            self.config.nearby_radius_km,
        )
    }

    // ─── Filter and layer edits ──────────────────────────────────

    /// Replace the whole filter state.
    pub fn on_filters_change(&mut self, next: FilterState) -> SyncReport {
        self.search.cancel();
        self.filters = next;
        self.refresh()
    }

    /// Keystroke in the search box; applied now or after the debounce delay.
    pub fn on_search_input(&mut self, text: impl Into<String>, now: Instant) -> Option<SyncReport> {
        let text = self.search.input(text.into(), now)?;
        Some(self.apply_search(text))
    }

    pub fn clear_filters(&mut self) -> SyncReport {
        self.on_filters_change(FilterState::default())
    }

    pub fn apply_preset(&mut self, preset: QuickPreset) -> SyncReport {
        let next = self.filters.clone().apply(&preset.patch());
        self.on_filters_change(next)
    }

    pub fn on_layer_toggle(&mut self, layer: ContaminantType) -> SyncReport {
        let next = self.layers.toggled(layer);
        self.set_layers(next)
    }

    /// Replace the whole layer state.
    pub fn set_layers(&mut self, next: LayerState) -> SyncReport {
        self.layers = next;
        self.refresh()
    }

    pub fn show_all_layers(&mut self) -> SyncReport {
        self.set_layers(LayerState::all())
    }

    /// Disable every layer. What that shows depends on the empty-layer policy.
    pub fn hide_all_layers(&mut self) -> SyncReport {
        self.set_layers(LayerState::none())
    }

    /// Replace the catalog wholesale. All markers and selections are dropped.
    pub fn replace_catalog(&mut self, catalog: Arc<SiteCatalog>) -> SyncReport {
        tracing::info!(count = catalog.len(), "Replacing site catalog");
        self.markers.clear(&mut self.canvas);
        self.selection.clear_all();
        self.catalog = catalog;
        self.refresh()
    }

    // ─── Selection ───────────────────────────────────────────────

    /// Select a visible site and fly to it. Returns whether it was selected.
    pub fn on_site_select(&mut self, id: &SiteId, now: Instant) -> bool {
        match self.select_site(id, now) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(site = %id, error = %e, "Ignoring site selection");
                false
            }
        }
    }

    /// Click on a marker, as routed back from the canvas.
    pub fn on_marker_click(&mut self, handle: MarkerHandle, now: Instant) -> bool {
        let Some(id) = self.markers.site_for_handle(handle).cloned() else {
            tracing::warn!(handle = %handle, "Click on unknown marker");
            return false;
        };
        self.on_site_select(&id, now)
    }

    /// Close the site detail. The camera stays where it is.
    pub fn on_close(&mut self) -> SyncReport {
        self.close_selected_popup();
        self.selection.clear_site();
        self.refresh()
    }

    pub fn select_info(&mut self, id: &InfoId) -> bool {
        if self.catalog.info(id).is_none() {
            let e = MapError::UnknownInfo(id.clone());
            tracing::debug!(error = %e, "Ignoring info selection");
            return false;
        }
        self.selection.select_info(id.clone());
        true
    }

    pub fn clear_info(&mut self) {
        self.selection.clear_info();
    }

    // ─── Camera ──────────────────────────────────────────────────

    /// Return the camera home and clear both selection slots.
    pub fn reset_view(&mut self, now: Instant) -> SyncReport {
        self.close_selected_popup();
        self.selection.clear_all();
        self.viewport.reset(&mut self.canvas, now);
        self.refresh()
    }

    pub fn toggle_projection(&mut self, now: Instant) -> Projection {
        self.viewport.toggle_projection(&mut self.canvas, now)
    }

    pub fn cycle_style(&mut self, now: Instant) -> MapStyle {
        self.viewport.cycle_style(&mut self.canvas, now)
    }

    pub fn set_style(&mut self, style: MapStyle, now: Instant) {
        self.viewport.set_style(&mut self.canvas, style, now);
    }

    /// Advance time: apply debounced search input and settle camera moves.
    pub fn tick(&mut self, now: Instant) -> Option<SyncReport> {
        self.viewport.tick(now);
        let text = self.search.flush(now)?;
        Some(self.apply_search(text))
    }

    // ─── Event dispatch ──────────────────────────────────────────

    /// Route a panel event to its callback.
    pub fn dispatch(&mut self, event: PanelEvent, now: Instant) {
        tracing::debug!(event = ?event, "Panel event");
        match event {
            PanelEvent::FiltersChanged { filters } => {
                self.on_filters_change(filters);
            }
            PanelEvent::SearchInput { text } => {
                self.on_search_input(text, now);
            }
            PanelEvent::ClearFilters => {
                self.clear_filters();
            }
            PanelEvent::ApplyPreset { preset } => {
                self.apply_preset(preset);
            }
            PanelEvent::LayerToggled { layer } => {
                self.on_layer_toggle(layer);
            }
            PanelEvent::ShowAllLayers => {
                self.show_all_layers();
            }
            PanelEvent::HideAllLayers => {
                self.hide_all_layers();
            }
            PanelEvent::SiteSelected { site_id } => {
                self.on_site_select(&site_id, now);
            }
            PanelEvent::Close => {
                self.on_close();
            }
            PanelEvent::InfoSelected { info_id } => {
                self.select_info(&info_id);
            }
            PanelEvent::InfoClosed => self.clear_info(),
            PanelEvent::ResetView => {
                self.reset_view(now);
            }
            PanelEvent::ToggleProjection => {
                self.toggle_projection(now);
            }
            PanelEvent::CycleStyle => {
                self.cycle_style(now);
            }
        }
    }

    // ─── Internals ───────────────────────────────────────────────

    fn apply_search(&mut self, text: String) -> SyncReport {
        self.filters = self.filters.clone().with_search(text);
        self.refresh()
    }

    fn select_site(&mut self, id: &SiteId, now: Instant) -> Result<()> {
        let catalog = Arc::clone(&self.catalog);
        let site = catalog
            .get(id)
            .ok_or_else(|| MapError::UnknownSite(id.clone()))?;
        if !self.is_visible(id) {
            return Err(MapError::SiteNotVisible(id.clone()));
        }

        self.close_selected_popup();
        self.selection.select_site(id.clone());
        self.viewport.fly_to(
            &mut self.canvas,
            site.coordinates,
            self.config.select_zoom,
            self.config.fly_duration_ms,
            now,
        );
        self.refresh();

        // the selection stands even if the popup cannot be shown
        if let Some(handle) = self.markers.handle_for_site(id) {
            if let Err(e) = self.canvas.open_popup(handle, &site.name) {
                tracing::warn!(site = %id, error = %e, "Failed to open popup");
            }
        }
        Ok(())
    }

    fn close_selected_popup(&mut self) {
        let handle = self
            .selection
            .selected_site()
            .and_then(|id| self.markers.handle_for_site(id));
        if let Some(handle) = handle {
            self.canvas.close_popup(handle);
        }
    }

    /// Recompute the visible set, enforce the selection rule, reconcile markers.
    fn refresh(&mut self) -> SyncReport {
        let catalog = Arc::clone(&self.catalog);
        let visible = compute_visible(
            &catalog,
            &self.filters,
            &self.layers,
            self.config.empty_layer_policy,
        );
        self.visible = visible.iter().map(|site| site.id.clone()).collect();

        if self.selection.selected_site().is_some_and(|id| !self.visible.contains(id)) {
            self.close_selected_popup();
            self.selection.retain_visible(&self.visible);
        }

        let specs = specs_for(visible, self.selection.selected_site());
        let report = self.markers.sync(&mut self.canvas, &specs);

        tracing::debug!(
            visible = self.visible.len(),
            total = catalog.len(),
            active_filters = self.filters.active_count(),
            layers = self.layers.len(),
            "Visible set recomputed"
        );
        report
    }
}

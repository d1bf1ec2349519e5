// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fieldscope preview
//!
//! Runs a session against an in-memory canvas and prints the panel views as
//! JSON after every event. Events come from a JSON file given as the first
//! argument, or from a short built-in walkthrough.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use fieldscope::{
    config::Config,
    models::{ContaminantType, SiteId},
    panels::PanelEvent,
    services::{QuickPreset, SiteCatalog},
    MonitoringMap, RecordingCanvas,
};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading site catalog");
            SiteCatalog::load_from_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?
        }
        None => SiteCatalog::builtin().context("Failed to load bundled catalog")?,
    };
    tracing::info!(count = catalog.len(), "Site catalog loaded");

    let events = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read event script {}", path))?;
            serde_json::from_str::<Vec<PanelEvent>>(&raw)
                .with_context(|| format!("Failed to parse event script {}", path))?
        }
        None => walkthrough(),
    };

    let mut now = Instant::now();
    let mut map = MonitoringMap::new(config, Arc::new(catalog), RecordingCanvas::new());
    print_snapshot(&map, None, now)?;

    for event in events {
        map.dispatch(event.clone(), now);
        // let camera moves and debounced search settle between events
        now += Duration::from_millis(map.config().fly_duration_ms.max(map.config().search_debounce_ms));
        map.tick(now);
        print_snapshot(&map, Some(&event), now)?;
    }

    tracing::info!(
        markers = map.canvas().marker_count(),
        canvas_calls = map.canvas().calls().len(),
        camera_commands = map.viewport().command_log().len(),
        "Session finished"
    );
    Ok(())
}

fn walkthrough() -> Vec<PanelEvent> {
    vec![
        PanelEvent::ApplyPreset {
            preset: QuickPreset::HeavyMetals,
        },
        PanelEvent::SiteSelected {
            site_id: SiteId::from("cv-004"),
        },
        PanelEvent::ClearFilters,
        PanelEvent::LayerToggled {
            layer: ContaminantType::Pesticides,
        },
        PanelEvent::ShowAllLayers,
        PanelEvent::SearchInput {
            text: "fresno".to_string(),
        },
        PanelEvent::ToggleProjection,
        PanelEvent::CycleStyle,
        PanelEvent::ResetView,
    ]
}

fn print_snapshot(
    map: &MonitoringMap<RecordingCanvas>,
    event: Option<&PanelEvent>,
    now: Instant,
) -> anyhow::Result<()> {
    let snapshot = json!({
        "event": event,
        "visible": map.visible_ids(),
        "camera": map.camera_at(now),
        "filterPanel": map.filter_panel(),
        "layerPanel": map.layer_panel(),
        "detailPanel": map.detail_panel(),
    });
    println!("{}", serde_json::to_string(&snapshot)?);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fieldscope=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}

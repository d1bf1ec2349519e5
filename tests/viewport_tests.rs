// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camera behavior: superseded moves, reset, projection and style.

mod common;

use common::builtin_map;
use fieldscope::models::{CameraCommand, Coordinates, MapStyle, Projection, SiteId};
use fieldscope::services::{CameraSettings, ViewportController};
use fieldscope::RecordingCanvas;
use std::time::{Duration, Instant};

#[test]
fn test_second_fly_to_wins() {
    let mut canvas = RecordingCanvas::new();
    let mut viewport = ViewportController::new(CameraSettings::default());
    let x = Coordinates::new(-120.0, 37.0);
    let y = Coordinates::new(-118.5, 35.2);
    let t0 = Instant::now();

    viewport.fly_to(&mut canvas, x, 6.0, 2000, t0);
    viewport.fly_to(&mut canvas, y, 4.0, 1000, t0);

    // half way through the second move the camera is not at X
    let mid = viewport.camera_at(t0 + Duration::from_millis(500));
    assert_ne!(mid.center, x);

    let done = t0 + Duration::from_millis(1000);
    assert!(viewport.tick(done));
    let settled = viewport.camera_at(done + Duration::from_secs(5));
    assert_eq!(settled.center, y);
    assert_eq!(settled.zoom, 4.0);
    assert_eq!(canvas.camera_target(), Some((y, 4.0)));
    assert!(!viewport.is_animating(done));
}

#[test]
fn test_superseding_move_starts_from_current_position() {
    let mut canvas = RecordingCanvas::new();
    let mut viewport = ViewportController::new(CameraSettings::default());
    let t0 = Instant::now();
    let start = viewport.target().center;

    viewport.fly_to(&mut canvas, Coordinates::new(-110.0, 36.8), 8.0, 1000, t0);
    let t1 = t0 + Duration::from_millis(500);
    let halfway = viewport.camera_at(t1);
    assert!(halfway.center.longitude > start.longitude);
    assert!(halfway.center.longitude < -110.0);

    viewport.fly_to(&mut canvas, Coordinates::new(-121.0, 38.0), 7.0, 1000, t1);
    // no jump at the moment of replacement
    assert_eq!(viewport.camera_at(t1).center, halfway.center);
}

#[test]
fn test_zoom_is_clamped() {
    let mut canvas = RecordingCanvas::new();
    let settings = CameraSettings::default();
    let mut viewport = ViewportController::new(settings);
    let now = Instant::now();

    viewport.fly_to(&mut canvas, Coordinates::new(-120.0, 37.0), 40.0, 0, now);
    assert_eq!(viewport.target().zoom, settings.max_zoom);
    viewport.fly_to(&mut canvas, Coordinates::new(-120.0, 37.0), -3.0, 0, now);
    assert_eq!(viewport.target().zoom, settings.min_zoom);
}

#[test]
fn test_reset_returns_home() {
    let mut map = builtin_map();
    let t0 = Instant::now();
    map.on_site_select(&SiteId::from("cv-009"), t0);
    assert_eq!(map.viewport().target().zoom, map.config().select_zoom);

    let t1 = t0 + Duration::from_millis(300);
    map.reset_view(t1);
    let settings = *map.viewport().settings();
    let settled = map.camera_at(t1 + Duration::from_millis(settings.reset_duration_ms));
    assert_eq!(settled.center, settings.default_center);
    assert_eq!(settled.zoom, settings.default_zoom);

    assert!(matches!(
        map.viewport().command_log(),
        [CameraCommand::FlyTo { .. }, CameraCommand::Reset { .. }]
    ));
}

#[test]
fn test_projection_toggle_keeps_position() {
    let mut map = builtin_map();
    let now = Instant::now();
    let before = map.camera_at(now);

    assert_eq!(map.toggle_projection(now), Projection::Flat);
    let after = map.camera_at(now);
    assert_eq!(after.center, before.center);
    assert_eq!(after.zoom, before.zoom);
    assert_eq!(map.canvas().projection(), Projection::Flat);

    assert_eq!(map.toggle_projection(now), Projection::Globe);
}

#[test]
fn test_toggle_mid_flight_freezes_camera() {
    let mut map = builtin_map();
    let t0 = Instant::now();
    map.on_site_select(&SiteId::from("cv-001"), t0);

    let t1 = t0 + Duration::from_millis(map.config().fly_duration_ms / 2);
    let frozen = map.camera_at(t1);
    map.toggle_projection(t1);

    assert!(!map.viewport().is_animating(t1));
    assert_eq!(map.viewport().target().center, frozen.center);
    assert_eq!(map.camera_at(t1 + Duration::from_secs(10)).center, frozen.center);
}

#[test]
fn test_style_cycle_visits_every_style() {
    let mut map = builtin_map();
    let now = Instant::now();
    let mut seen = vec![map.camera_at(now).style];
    for _ in 1..MapStyle::ALL.len() {
        seen.push(map.cycle_style(now));
    }
    assert_eq!(seen, MapStyle::ALL.to_vec());
    assert_eq!(map.cycle_style(now), MapStyle::ALL[0]);
    assert_eq!(map.canvas().style(), MapStyle::ALL[0]);
}

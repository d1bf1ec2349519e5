// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Viewport controller.
//!
//! Owns the camera. Nothing else writes camera fields; every move goes through
//! a command, and every command is appended to an intent log. Camera moves are
//! time based: a command issued while a move is in flight replaces it, starting
//! from wherever the camera currently is.

use std::time::{Duration, Instant};

use crate::canvas::MapCanvas;
use crate::models::{CameraCommand, Coordinates, MapStyle, Projection, ViewportState};

/// Fixed camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub default_center: Coordinates,
    pub default_zoom: f64,
    pub reset_duration_ms: u64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            // Central Valley, California
            default_center: Coordinates::new(-119.8, 36.8),
            default_zoom: 5.5,
            reset_duration_ms: 1500,
            min_zoom: 1.0,
            max_zoom: 18.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from_center: Coordinates,
    from_zoom: f64,
    to_center: Coordinates,
    to_zoom: f64,
    started: Instant,
    duration: Duration,
}

impl Transition {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    fn position(&self, now: Instant) -> (Coordinates, f64) {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return (self.to_center, self.to_zoom);
        }
        let t = ease_in_out_cubic(progress);
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        let from_lon = self.from_center.longitude;
        (
            Coordinates::new(
                wrap_longitude(from_lon + longitude_delta(from_lon, self.to_center.longitude) * t),
                lerp(self.from_center.latitude, self.to_center.latitude),
            ),
            lerp(self.from_zoom, self.to_zoom),
        )
    }
}

/// Signed east-west distance from `from` to `to`, the short way around.
fn longitude_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // keep the eastern edge as 180 rather than -180
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    settings: CameraSettings,
    /// Where the camera is, or where it is headed while a move is in flight
    target: ViewportState,
    transition: Option<Transition>,
    log: Vec<CameraCommand>,
}

impl ViewportController {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            target: ViewportState {
                center: settings.default_center,
                zoom: settings.default_zoom,
                projection: Projection::default(),
                style: MapStyle::default(),
            },
            settings,
            transition: None,
            log: Vec::new(),
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Final camera state once any move in flight completes.
    pub fn target(&self) -> ViewportState {
        self.target
    }

    /// Camera state at `now`, interpolated while a move is in flight.
    pub fn camera_at(&self, now: Instant) -> ViewportState {
        match &self.transition {
            Some(transition) => {
                let (center, zoom) = transition.position(now);
                ViewportState {
                    center,
                    zoom,
                    ..self.target
                }
            }
            None => self.target,
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|t| t.progress(now) < 1.0)
    }

    /// Every command issued so far, oldest first.
    pub fn command_log(&self) -> &[CameraCommand] {
        &self.log
    }

    /// Retire a finished move. Returns `true` if one completed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.transition {
            Some(t) if t.progress(now) >= 1.0 => {
                self.transition = None;
                tracing::debug!(
                    longitude = self.target.center.longitude,
                    latitude = self.target.center.latitude,
                    zoom = self.target.zoom,
                    "Camera settled"
                );
                true
            }
            _ => false,
        }
    }

    /// Animate to `center`/`zoom`, replacing any move in flight.
    ///
    /// Invalid coordinates are ignored. Returns whether the camera moved.
    pub fn fly_to<C: MapCanvas>(
        &mut self,
        canvas: &mut C,
        center: Coordinates,
        zoom: f64,
        duration_ms: u64,
        now: Instant,
    ) -> bool {
        if !center.is_valid() {
            tracing::warn!(
                longitude = center.longitude,
                latitude = center.latitude,
                "Ignoring fly-to with invalid coordinates"
            );
            return false;
        }
        let zoom = self.clamp_zoom(zoom);
        self.start_move(canvas, center, zoom, duration_ms, now);
        self.log.push(CameraCommand::FlyTo {
            center,
            zoom,
            duration_ms,
        });
        true
    }

    /// Return to the default center and zoom.
    pub fn reset<C: MapCanvas>(&mut self, canvas: &mut C, now: Instant) {
        let CameraSettings {
            default_center,
            default_zoom,
            reset_duration_ms,
            ..
        } = self.settings;
        self.start_move(canvas, default_center, default_zoom, reset_duration_ms, now);
        self.log.push(CameraCommand::Reset {
            center: default_center,
            zoom: default_zoom,
            duration_ms: reset_duration_ms,
        });
    }

    /// Swap between globe and flat projection, keeping center and zoom.
    pub fn toggle_projection<C: MapCanvas>(&mut self, canvas: &mut C, now: Instant) -> Projection {
        self.freeze(canvas, now);
        let projection = self.target.projection.toggled();
        self.target.projection = projection;
        canvas.set_projection(projection);
        self.log.push(CameraCommand::SetProjection { projection });
        projection
    }

    /// Advance to the next base style, keeping center and zoom.
    pub fn cycle_style<C: MapCanvas>(&mut self, canvas: &mut C, now: Instant) -> MapStyle {
        let next = self.target.style.next();
        self.set_style(canvas, next, now);
        next
    }

    pub fn set_style<C: MapCanvas>(&mut self, canvas: &mut C, style: MapStyle, now: Instant) {
        self.freeze(canvas, now);
        self.target.style = style;
        canvas.set_style(style);
        self.log.push(CameraCommand::SetStyle { style });
    }

    fn start_move<C: MapCanvas>(
        &mut self,
        canvas: &mut C,
        center: Coordinates,
        zoom: f64,
        duration_ms: u64,
        now: Instant,
    ) {
        let current = self.camera_at(now);
        if self.is_animating(now) {
            tracing::debug!("Superseding camera move in flight");
        }

        self.transition = (duration_ms > 0).then(|| Transition {
            from_center: current.center,
            from_zoom: current.zoom,
            to_center: center,
            to_zoom: zoom,
            started: now,
            duration: Duration::from_millis(duration_ms),
        });
        self.target.center = center;
        self.target.zoom = zoom;
        canvas.fly_to(center, zoom, duration_ms);
    }

    /// Stop any move in flight where the camera is right now.
    fn freeze<C: MapCanvas>(&mut self, canvas: &mut C, now: Instant) {
        if !self.is_animating(now) {
            self.transition = None;
            return;
        }
        let current = self.camera_at(now);
        self.transition = None;
        self.target.center = current.center;
        self.target.zoom = current.zoom;
        canvas.fly_to(current.center, current.zoom, 0);
        tracing::debug!("Camera move cancelled by mode change");
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.target.zoom;
        }
        // f64::clamp panics on NaN or inverted bounds
        zoom.max(self.settings.min_zoom).min(self.settings.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasCall, RecordingCanvas};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_starts_at_default_camera() {
        let viewport = ViewportController::new(CameraSettings::default());
        let camera = viewport.camera_at(Instant::now());
        assert_eq!(camera.center, CameraSettings::default().default_center);
        assert_eq!(camera.projection, Projection::Globe);
    }

    #[test]
    fn test_fly_to_interpolates_then_settles() {
        let mut canvas = RecordingCanvas::new();
        let mut viewport = ViewportController::new(CameraSettings::default());
        let t0 = Instant::now();
        let target = Coordinates::new(-121.0, 38.0);

        viewport.fly_to(&mut canvas, target, 8.0, 1000, t0);
        assert!(viewport.is_animating(t0 + ms(500)));
        let midway = viewport.camera_at(t0 + ms(500));
        assert!(midway.zoom > 5.5 && midway.zoom < 8.0);

        assert!(!viewport.tick(t0 + ms(999)));
        assert!(viewport.tick(t0 + ms(1000)));
        let settled = viewport.camera_at(t0 + ms(1000));
        assert_eq!(settled.center, target);
        assert_eq!(settled.zoom, 8.0);
    }

    #[test]
    fn test_second_fly_to_supersedes_first() {
        let mut canvas = RecordingCanvas::new();
        let mut viewport = ViewportController::new(CameraSettings::default());
        let t0 = Instant::now();
        let x = Coordinates::new(-122.0, 39.0);
        let y = Coordinates::new(-118.0, 34.0);

        viewport.fly_to(&mut canvas, x, 6.0, 2000, t0);
        viewport.fly_to(&mut canvas, y, 4.0, 1000, t0);

        viewport.tick(t0 + ms(1000));
        let camera = viewport.camera_at(t0 + ms(1000));
        assert_eq!(camera.center, y);
        assert_eq!(camera.zoom, 4.0);
        assert!(!viewport.is_animating(t0 + ms(1500)));
        // Long after the first move would have ended, nothing drifts back to x
        assert_eq!(viewport.camera_at(t0 + ms(5000)).center, y);
        assert_eq!(canvas.camera_target(), Some((y, 4.0)));
    }

    #[test]
    fn test_mid_flight_redirect_starts_from_current_position() {
        let mut canvas = RecordingCanvas::new();
        let mut viewport = ViewportController::new(CameraSettings::default());
        let t0 = Instant::now();

        viewport.fly_to(&mut canvas, Coordinates::new(-110.0, 36.8), 5.5, 1000, t0);
        let midway = viewport.camera_at(t0 + ms(500));
        viewport.fly_to(&mut canvas, Coordinates::new(-100.0, 36.8), 5.5, 1000, t0 + ms(500));

        let start_of_second = viewport.camera_at(t0 + ms(500));
        assert!((start_of_second.center.longitude - midway.center.longitude).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_projection_preserves_camera() {
        let mut canvas = RecordingCanvas::new();
        let mut viewport = ViewportController::new(CameraSettings::default());
        let t0 = Instant::now();
        viewport.fly_to(&mut canvas, Coordinates::new(-121.0, 38.0), 9.0, 0, t0);

        let before = viewport.camera_at(t0);
        assert_eq!(viewport.toggle_projection(&mut canvas, t0), Projection::Flat);
        let after = viewport.camera_at(t0);
        assert_eq!(before.center, after.center);
        assert_eq!(before.zoom, after.zoom);
        assert_eq!(canvas.projection(), Projection::Flat);
    }

    #[test]
    fn test_style_change_freezes_move_in_flight() {
        let mut canvas = RecordingCanvas::new();
        let mut viewport = ViewportController::new(CameraSettings::default());
        let t0 = Instant::now();
        viewport.fly_to(&mut canvas, Coordinates::new(-100.0, 40.0), 10.0, 1000, t0);

        let midway = viewport.camera_at(t0 + ms(400));
        assert_eq!(viewport.cycle_style(&mut canvas, t0 + ms(400)), MapStyle::Satellite);

        assert!(!viewport.is_animating(t0 + ms(400)));
        assert_eq!(viewport.target().center, midway.center);
        assert_eq!(viewport.camera_at(t0 + ms(2000)).zoom, midway.zoom);
        assert!(matches!(
            canvas.calls().last(),
            Some(CanvasCall::SetStyle { style: MapStyle::Satellite })
        ));
    }

    #[test]
    fn test_reset_returns_to_default_and_logs() {
        let mut canvas = RecordingCanvas::new();
        let settings = CameraSettings::default();
        let mut viewport = ViewportController::new(settings);
        let t0 = Instant::now();

        viewport.fly_to(&mut canvas, Coordinates::new(-121.0, 38.0), 12.0, 500, t0);
        viewport.reset(&mut canvas, t0 + ms(100));
        viewport.tick(t0 + ms(100) + ms(settings.reset_duration_ms));

        assert_eq!(viewport.target().center, settings.default_center);
        assert_eq!(viewport.target().zoom, settings.default_zoom);
        assert!(matches!(viewport.command_log()[1], CameraCommand::Reset { .. }));
    }

    #[test]
    fn test_invalid_target_and_zoom_clamp() {
        let mut canvas = RecordingCanvas::new();
        let mut viewport = ViewportController::new(CameraSettings::default());
        let t0 = Instant::now();

        assert!(!viewport.fly_to(&mut canvas, Coordinates::new(0.0, 120.0), 5.0, 100, t0));
        assert!(viewport.command_log().is_empty());

        viewport.fly_to(&mut canvas, Coordinates::new(0.0, 0.0), 40.0, 0, t0);
        assert_eq!(viewport.target().zoom, 18.0);
    }

    #[test]
    fn test_crossing_antimeridian_takes_short_way() {
        let mut canvas = RecordingCanvas::new();
        let mut viewport = ViewportController::new(CameraSettings::default());
        let t0 = Instant::now();
        viewport.fly_to(&mut canvas, Coordinates::new(-179.0, 10.0), 4.0, 0, t0);
        viewport.fly_to(&mut canvas, Coordinates::new(179.0, 10.0), 4.0, 1000, t0);

        for step in [100, 250, 500, 750, 900] {
            let camera = viewport.camera_at(t0 + ms(step));
            assert!(
                camera.center.longitude.abs() >= 179.0,
                "swung through {} at {}ms",
                camera.center.longitude,
                step
            );
            assert!(camera.center.is_valid());
        }
        assert_eq!(viewport.camera_at(t0 + ms(1000)).center, Coordinates::new(179.0, 10.0));
    }

    #[test]
    fn test_zoom_bounds_never_panic() {
        let settings = CameraSettings {
            min_zoom: f64::NAN,
            ..CameraSettings::default()
        };
        let mut canvas = RecordingCanvas::new();
        let mut viewport = ViewportController::new(settings);
        let t0 = Instant::now();

        viewport.fly_to(&mut canvas, Coordinates::new(-121.0, 38.0), 7.0, 0, t0);
        assert_eq!(viewport.target().zoom, 7.0);
        viewport.fly_to(&mut canvas, Coordinates::new(-121.0, 38.0), 40.0, 0, t0);
        assert_eq!(viewport.target().zoom, 18.0);
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Engine configuration loaded from environment variables.
//!
//! Every setting has a default, so an empty environment yields a working
//! configuration. Values that are present but malformed are rejected.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::models::{ContaminantType, Coordinates, EmptyLayerPolicy, LayerState};
use crate::services::CameraSettings;

/// Engine configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// GeoJSON catalog to load instead of the bundled one
    pub catalog_path: Option<PathBuf>,
    /// Camera defaults and limits
    pub camera: CameraSettings,
    /// Zoom used when flying to a selected site
    pub select_zoom: f64,
    /// Duration of the fly-to animation on selection
    pub fly_duration_ms: u64,
    /// Quiet period before search input is applied (0 = immediate)
    pub search_debounce_ms: u64,
    /// Interpretation of an empty layer set
    pub empty_layer_policy: EmptyLayerPolicy,
    /// Layers enabled when a session starts
    pub default_layers: LayerState,
    /// Radius for the "nearby sites" list in the detail panel
    pub nearby_radius_km: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            camera: CameraSettings::default(),
            select_zoom: 9.0,
            fly_duration_ms: 2000,
            search_debounce_ms: 0,
            empty_layer_policy: EmptyLayerPolicy::MatchAll,
            default_layers: LayerState::none(),
            nearby_radius_km: 50.0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let camera = CameraSettings {
            default_center: match get("FIELDSCOPE_DEFAULT_CENTER") {
                Some(raw) => parse_center(&raw)
                    .ok_or(ConfigError::Invalid("FIELDSCOPE_DEFAULT_CENTER", raw))?,
                None => defaults.camera.default_center,
            },
            default_zoom: parse_finite(
                "FIELDSCOPE_DEFAULT_ZOOM",
                get("FIELDSCOPE_DEFAULT_ZOOM"),
                defaults.camera.default_zoom,
            )?,
            reset_duration_ms: parse_or(
                "FIELDSCOPE_RESET_DURATION_MS",
                get("FIELDSCOPE_RESET_DURATION_MS"),
                defaults.camera.reset_duration_ms,
            )?,
            min_zoom: parse_finite(
                "FIELDSCOPE_MIN_ZOOM",
                get("FIELDSCOPE_MIN_ZOOM"),
                defaults.camera.min_zoom,
            )?,
            max_zoom: parse_finite(
                "FIELDSCOPE_MAX_ZOOM",
                get("FIELDSCOPE_MAX_ZOOM"),
                defaults.camera.max_zoom,
            )?,
        };
        if camera.min_zoom > camera.max_zoom {
            return Err(ConfigError::Invalid(
                "FIELDSCOPE_MIN_ZOOM",
                format!("{} exceeds max zoom {}", camera.min_zoom, camera.max_zoom),
            ));
        }

        let empty_layer_policy = match get("FIELDSCOPE_EMPTY_LAYERS") {
            Some(raw) => parse_policy(&raw).ok_or(ConfigError::Invalid("FIELDSCOPE_EMPTY_LAYERS", raw))?,
            None => defaults.empty_layer_policy,
        };

        let default_layers = match get("FIELDSCOPE_DEFAULT_LAYERS") {
            Some(raw) => parse_layers(&raw)
                .ok_or(ConfigError::Invalid("FIELDSCOPE_DEFAULT_LAYERS", raw))?,
            None => defaults.default_layers,
        };

        Ok(Self {
            catalog_path: get("FIELDSCOPE_CATALOG_PATH").map(PathBuf::from),
            camera,
            select_zoom: parse_finite(
                "FIELDSCOPE_SELECT_ZOOM",
                get("FIELDSCOPE_SELECT_ZOOM"),
                defaults.select_zoom,
            )?,
            fly_duration_ms: parse_or(
                "FIELDSCOPE_FLY_DURATION_MS",
                get("FIELDSCOPE_FLY_DURATION_MS"),
                defaults.fly_duration_ms,
            )?,
            search_debounce_ms: parse_or(
                "FIELDSCOPE_SEARCH_DEBOUNCE_MS",
                get("FIELDSCOPE_SEARCH_DEBOUNCE_MS"),
                defaults.search_debounce_ms,
            )?,
            empty_layer_policy,
            default_layers,
            nearby_radius_km: parse_finite(
                "FIELDSCOPE_NEARBY_RADIUS_KM",
                get("FIELDSCOPE_NEARBY_RADIUS_KM"),
                defaults.nearby_radius_km,
            )?,
        })
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name, raw)),
        None => Ok(default),
    }
}

/// Like `parse_or`, but NaN and infinities are rejected.
fn parse_finite(
    name: &'static str,
    raw: Option<String>,
    default: f64,
) -> Result<f64, ConfigError> {
    let value = parse_or(name, raw, default)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::Invalid(name, value.to_string()))
    }
}

/// "lon,lat" in degrees.
fn parse_center(raw: &str) -> Option<Coordinates> {
    let (lon, lat) = raw.split_once(',')?;
    let center = Coordinates::new(lon.trim().parse().ok()?, lat.trim().parse().ok()?);
    center.is_valid().then_some(center)
}

fn parse_policy(raw: &str) -> Option<EmptyLayerPolicy> {
    serde_json::from_value(serde_json::Value::String(raw.to_ascii_lowercase())).ok()
}

/// Comma-separated contaminant names, e.g. "pesticides,heavy-metals".
fn parse_layers(raw: &str) -> Option<LayerState> {
    let layers = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            serde_json::from_value::<ContaminantType>(serde_json::Value::String(
                name.to_ascii_lowercase(),
            ))
            .ok()
        })
        .collect::<Option<Vec<_>>>()?;
    Some(LayerState::with_defaults(layers))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[])).expect("Config should load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            ("FIELDSCOPE_DEFAULT_CENTER", "-121.5, 38.6"),
            ("FIELDSCOPE_SELECT_ZOOM", "11"),
            ("FIELDSCOPE_SEARCH_DEBOUNCE_MS", "250"),
            ("FIELDSCOPE_EMPTY_LAYERS", "match-none"),
            ("FIELDSCOPE_DEFAULT_LAYERS", "pesticides, heavy-metals"),
            ("FIELDSCOPE_CATALOG_PATH", "data/monitoring_sites.geojson"),
        ]))
        .expect("Config should load");

        assert_eq!(config.camera.default_center, Coordinates::new(-121.5, 38.6));
        assert_eq!(config.select_zoom, 11.0);
        assert_eq!(config.search_debounce(), Duration::from_millis(250));
        assert_eq!(config.empty_layer_policy, EmptyLayerPolicy::MatchNone);
        assert!(config.default_layers.is_enabled(ContaminantType::HeavyMetals));
        assert_eq!(config.default_layers.len(), 2);
        assert!(config.catalog_path.is_some());
    }

    #[test]
    fn test_malformed_values_rejected() {
        for (name, value) in [
            ("FIELDSCOPE_DEFAULT_CENTER", "somewhere"),
            ("FIELDSCOPE_DEFAULT_CENTER", "-200,10"),
            ("FIELDSCOPE_DEFAULT_ZOOM", "close"),
            ("FIELDSCOPE_EMPTY_LAYERS", "maybe"),
            ("FIELDSCOPE_DEFAULT_LAYERS", "pesticides,asbestos"),
            ("FIELDSCOPE_MIN_ZOOM", "30"),
            ("FIELDSCOPE_MIN_ZOOM", "NaN"),
            ("FIELDSCOPE_MAX_ZOOM", "nan"),
            ("FIELDSCOPE_DEFAULT_ZOOM", "inf"),
            ("FIELDSCOPE_SELECT_ZOOM", "NaN"),
            ("FIELDSCOPE_NEARBY_RADIUS_KM", "-inf"),
        ] {
            let result = Config::from_lookup(lookup(&[(name, value)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid(_, _))),
                "{}={} should be rejected",
                name,
                value
            );
        }
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(lookup(&[("FIELDSCOPE_SELECT_ZOOM", "   ")]))
            .expect("Config should load");
        assert_eq!(config.select_zoom, Config::default().select_zoom);
    }
}

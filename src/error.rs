// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Engine error types.
//!
//! Panel callbacks never return these: the coordinator logs and degrades
//! locally. They surface only from setup (config, catalog loading) and from
//! the fallible lookups panels may call directly.

use crate::canvas::CanvasError;
use crate::config::ConfigError;
use crate::models::{InfoId, SiteId};
use crate::services::CatalogError;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),

    #[error("Unknown site: {0}")]
    UnknownSite(SiteId),

    #[error("Site is not visible under the current filters: {0}")]
    SiteNotVisible(SiteId),

    #[error("Unknown info record: {0}")]
    UnknownInfo(InfoId),
}

impl MapError {
    /// Errors caused by stale UI input rather than a broken setup.
    pub fn is_stale_reference(&self) -> bool {
        matches!(
            self,
            MapError::UnknownSite(_) | MapError::SiteNotVisible(_) | MapError::UnknownInfo(_)
        )
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, MapError>;

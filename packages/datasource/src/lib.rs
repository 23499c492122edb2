#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data-source abstraction for the heat-map pipeline.
//!
//! The aggregation core never talks to storage directly; it consumes
//! record sets fetched through [`PositionStore`]. The store is injected
//! into the server's application state at construction time, so the
//! whole pipeline runs against [`memory::MemoryStore`] in tests and
//! local serving with no storage backend present.

pub mod memory;

use async_trait::async_trait;
use contagion_map_heatmap_models::{CitiesContent, RegionBounds, UserPosition};
use thiserror::Error;

/// Errors raised by a position store.
///
/// Propagated unchanged to the request handler, which maps them to a
/// server-side failure; retry policy, if any, belongs to the store
/// implementation, never to the pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Reading a snapshot file failed.
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot file did not parse as the expected JSON shape.
    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backing store could not serve the query.
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// Description of the store failure.
        message: String,
    },
}

/// A queryable source of user positions and city reference data.
///
/// The two fetches are independent reads with no ordering dependency;
/// callers issue them concurrently and join before city assignment.
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Fetches user positions pre-filtered by the region's longitude
    /// range (closed interval), at minimum. Latitude narrowing and risk
    /// criteria are re-applied by the pipeline regardless, so a store
    /// may over-deliver but must never drop in-range records.
    async fn fetch_users_in_range(
        &self,
        region: &RegionBounds,
    ) -> Result<Vec<UserPosition>, FetchError>;

    /// Fetches the full city list plus the subset whose centroid falls
    /// inside the region.
    async fn fetch_all_cities(&self, region: &RegionBounds) -> Result<CitiesContent, FetchError>;
}

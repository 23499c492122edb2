#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Contagion-risk heat-map aggregation pipeline.
//!
//! Turns a validated viewport plus two pre-fetched record sets (user
//! positions narrowed by longitude, city reference data) into a scored
//! grid suitable for client-side heat-map rendering:
//!
//! 1. [`validate_region`] — viewport marker validation.
//! 2. [`filter::risk_relevant`] — keep only risk-relevant positions.
//! 3. [`assign::nearest_cities`] — annotate with the nearest city.
//! 4. [`grid::build`] — tile the viewport into a fixed-resolution grid.
//! 5. [`populate::into_cells`] — bucket positions and cities into cells.
//! 6. [`score::score_cells`] — compute per-cell risk intensity.
//!
//! Every stage is synchronous and pure; fetching lives in
//! `contagion_map_datasource`. The pipeline is all-or-nothing per
//! request and deterministic: identical inputs yield identical grids.

pub mod assign;
pub mod filter;
pub mod grid;
pub mod populate;
pub mod score;

use contagion_map_heatmap_models::{
    CitiesContent, Coordinate, HeatMapGrid, RegionBounds, UserPosition,
};
use thiserror::Error;

/// Errors produced by viewport validation and the aggregation stages.
///
/// Upstream fetch failures are a separate concern
/// (`contagion_map_datasource::FetchError`); the request handler maps
/// both to HTTP statuses.
#[derive(Debug, Error)]
pub enum HeatMapError {
    /// One or more of the five viewport markers is missing a coordinate,
    /// or the viewport edges are inverted. Non-retryable; the client
    /// must correct the request.
    #[error("Invalid region: all five viewport markers must carry latitude and longitude")]
    InvalidRegion,

    /// Impossible state reached from data that passed null checks, e.g.
    /// a non-finite coordinate value. Fails the whole request loudly
    /// rather than masking a data-quality problem with a zeroed grid.
    #[error("Computation fault: {message}")]
    Computation {
        /// Description of the impossible state.
        message: String,
    },
}

/// The five viewport markers as received from the wire, in the order
/// center, north-west, south-west, north-east, south-east. `None` marks
/// a marker that arrived null or with a missing field.
pub type RegionMarkers = [Option<Coordinate>; 5];

/// Validates the five viewport markers into a [`RegionBounds`].
///
/// Absence is the failure mode, not magnitude: zero and negative
/// coordinates are legitimate. Runs before any fetch is issued.
///
/// # Errors
///
/// Returns [`HeatMapError::InvalidRegion`] when any marker is missing or
/// the viewport edges are inverted, and [`HeatMapError::Computation`]
/// when a coordinate is non-finite.
pub fn validate_region(markers: RegionMarkers) -> Result<RegionBounds, HeatMapError> {
    let [center, north_west, south_west, north_east, south_east] = markers;
    let (Some(center), Some(north_west), Some(south_west), Some(north_east), Some(south_east)) =
        (center, north_west, south_west, north_east, south_east)
    else {
        return Err(HeatMapError::InvalidRegion);
    };

    let region = RegionBounds {
        center,
        north_west,
        south_west,
        north_east,
        south_east,
    };

    for corner in [
        region.center,
        region.north_west,
        region.south_west,
        region.north_east,
        region.south_east,
    ] {
        if !corner.latitude.is_finite() || !corner.longitude.is_finite() {
            return Err(HeatMapError::Computation {
                message: format!(
                    "non-finite viewport coordinate ({}, {})",
                    corner.latitude, corner.longitude
                ),
            });
        }
    }

    if region.north() < region.south() || region.east() < region.west() {
        return Err(HeatMapError::InvalidRegion);
    }

    Ok(region)
}

/// Runs the full aggregation pipeline over pre-fetched inputs.
///
/// `users` must already be narrowed by longitude by the store; latitude
/// and risk criteria are re-validated here regardless. `all_cities`
/// feeds nearest-city assignment while `inside_range` is bucketed into
/// cells (a city outside the viewport can never land in a cell).
///
/// # Errors
///
/// Returns [`HeatMapError::Computation`] when a record that passed the
/// null checks carries a non-finite coordinate.
pub fn build_heat_map(
    region: &RegionBounds,
    users: Vec<UserPosition>,
    cities: &CitiesContent,
) -> Result<HeatMapGrid, HeatMapError> {
    let relevant = filter::risk_relevant(region, users);
    let annotated = assign::nearest_cities(&cities.all_cities, relevant);
    let empty_grid = grid::build(region);
    let populated = populate::into_cells(empty_grid, annotated, &cities.inside_range)?;
    Ok(score::score_cells(populated))
}

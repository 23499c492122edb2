#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the contagion map server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the pipeline types in `contagion_map_heatmap_models`
//! to allow independent evolution of the wire contract — notably,
//! responses carry per-cell counts and scores but never echo member
//! positions back to the client.

use contagion_map_heatmap_models::{Coordinate, GridCell, HeatMapGrid, NO_DATA_SCORE};
use serde::{Deserialize, Serialize};

/// A viewport marker as sent by clients. Either field may arrive null;
/// a marker counts as present only when both are set (zero and negative
/// values are legitimate coordinates).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMarker {
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
}

impl ApiMarker {
    /// The marker as a coordinate, when both fields are present.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// Body of `POST /heatmap/getMapElementsByPosition`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatMapRequest {
    /// Viewport center.
    pub marker_central: Option<ApiMarker>,
    /// North-west corner.
    pub marker_north_west: Option<ApiMarker>,
    /// South-west corner.
    pub marker_south_west: Option<ApiMarker>,
    /// North-east corner.
    pub marker_north_east: Option<ApiMarker>,
    /// South-east corner.
    pub marker_south_east: Option<ApiMarker>,
}

impl HeatMapRequest {
    /// The five markers as coordinates, in the order center,
    /// north-west, south-west, north-east, south-east. `None` entries
    /// mark markers that arrived null or incomplete.
    #[must_use]
    pub fn markers(&self) -> [Option<Coordinate>; 5] {
        [
            self.marker_central,
            self.marker_north_west,
            self.marker_south_west,
            self.marker_north_east,
            self.marker_south_east,
        ]
        .map(|marker| marker.and_then(|m| m.coordinate()))
    }
}

/// Rectangle covered by a response cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApiCellBounds {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

/// One scored grid cell as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGridCell {
    /// Row index from the south edge.
    pub row: usize,
    /// Column index from the west edge.
    pub col: usize,
    /// Rectangle this cell covers.
    pub bounds: ApiCellBounds,
    /// Number of risk-relevant positions in the cell.
    pub user_count: usize,
    /// Number of in-range cities in the cell.
    pub city_count: usize,
    /// Risk intensity in `[0, 100)`, or the no-data sentinel.
    pub score: f64,
    /// True when the cell had no member positions; its `score` is the
    /// sentinel, not a measured zero.
    pub no_data: bool,
}

impl From<&GridCell> for ApiGridCell {
    fn from(cell: &GridCell) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
            bounds: ApiCellBounds {
                west: cell.bounds.west,
                south: cell.bounds.south,
                east: cell.bounds.east,
                north: cell.bounds.north,
            },
            user_count: cell.members.len(),
            city_count: cell.cities.len(),
            score: cell.score,
            no_data: (cell.score - NO_DATA_SCORE).abs() < f64::EPSILON,
        }
    }
}

/// The scored heat-map grid as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHeatMap {
    /// Cells per grid axis.
    pub resolution: usize,
    /// Row-major scored cells.
    pub cells: Vec<ApiGridCell>,
}

impl From<&HeatMapGrid> for ApiHeatMap {
    fn from(grid: &HeatMapGrid) -> Self {
        Self {
            resolution: grid.resolution,
            cells: grid.cells.iter().map(ApiGridCell::from).collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

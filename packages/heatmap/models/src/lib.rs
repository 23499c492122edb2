#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core data types for the contagion heat-map aggregation pipeline.
//!
//! These types flow between the pipeline stages in
//! `contagion_map_heatmap` and are distinct from the JSON wire types in
//! `contagion_map_server_models`. Each stage produces a new value
//! consumed by the next; nothing here is shared mutable state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of cells per grid axis. Every viewport is tiled into a
/// `GRID_RESOLUTION` × `GRID_RESOLUTION` grid.
pub const GRID_RESOLUTION: usize = 8;

/// The maximum defined contagion-risk level. Positions reporting exactly
/// this level are risk-relevant even when not flagged contaminated.
pub const MAX_CONTAGION_RISK: i32 = 3;

/// Sentinel score for cells with no member positions. Distinct from a
/// genuine `0.0` so clients can render "no data" differently from "safe".
pub const NO_DATA_SCORE: f64 = -1.0;

/// A geographic point in WGS84 coordinates.
///
/// Both fields may legitimately be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A validated rectangular viewport: center plus four corner markers.
///
/// Invariants (enforced at validation time, relied on everywhere
/// downstream): all five coordinates are finite, the north edge is at or
/// above the south edge, and the east edge is at or east of the west
/// edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBounds {
    /// Viewport center.
    pub center: Coordinate,
    /// North-west corner.
    pub north_west: Coordinate,
    /// South-west corner.
    pub south_west: Coordinate,
    /// North-east corner.
    pub north_east: Coordinate,
    /// South-east corner.
    pub south_east: Coordinate,
}

impl RegionBounds {
    /// Southern latitude boundary.
    #[must_use]
    pub const fn south(&self) -> f64 {
        self.south_west.latitude
    }

    /// Northern latitude boundary.
    #[must_use]
    pub const fn north(&self) -> f64 {
        self.north_west.latitude
    }

    /// Western longitude boundary.
    #[must_use]
    pub const fn west(&self) -> f64 {
        self.north_west.longitude
    }

    /// Eastern longitude boundary.
    #[must_use]
    pub const fn east(&self) -> f64 {
        self.north_east.longitude
    }
}

/// One mobile client's last known location and self-reported risk state.
///
/// Read-only snapshot fetched per request; the pipeline never mutates
/// it. `latitude`/`longitude` are nullable in the source store — records
/// missing either are dropped by the risk filter, not here. Trailing
/// fields are opaque carry-through from the store document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPosition {
    /// Latitude in degrees, if the client reported one.
    pub latitude: Option<f64>,
    /// Longitude in degrees, if the client reported one.
    pub longitude: Option<f64>,
    /// Whether the user self-reported as contaminated.
    #[serde(default)]
    pub contaminated: bool,
    /// Assessed contagion-risk level (0-3), if assessed.
    pub contagion_risk: Option<i32>,
    /// Opaque user identifier.
    pub user_id: Option<String>,
    /// When the position snapshot was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Static city reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    /// City centroid latitude.
    pub latitude: f64,
    /// City centroid longitude.
    pub longitude: f64,
    /// City name.
    pub name: String,
    /// State or province, when known.
    pub state: Option<String>,
    /// Population, when known.
    pub population: Option<i64>,
}

/// The city fetch result: the full reference list plus the subset whose
/// centroid falls inside the requested viewport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesContent {
    /// Every known city. Feeds nearest-city assignment, which must be
    /// able to pick a city outside the viewport.
    pub all_cities: Vec<CityRecord>,
    /// Cities whose centroid lies inside the viewport.
    pub inside_range: Vec<CityRecord>,
}

/// A user position annotated with its nearest known city, if any city
/// reference data exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedUserPosition {
    /// The underlying position snapshot.
    pub position: UserPosition,
    /// Nearest city by planar distance, or `None` when the city list is
    /// empty.
    pub city: Option<CityRecord>,
}

/// Rectangle covered by a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl CellBounds {
    /// Creates a new cell rectangle.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

/// One rectangular subdivision of the viewport.
///
/// Row 0 / col 0 is the south-west cell; increasing row moves north,
/// increasing col moves east.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    /// Rectangle this cell covers.
    pub bounds: CellBounds,
    /// Row index from the south edge.
    pub row: usize,
    /// Column index from the west edge.
    pub col: usize,
    /// Risk-relevant positions bucketed into this cell.
    pub members: Vec<AnnotatedUserPosition>,
    /// In-range cities bucketed into this cell.
    pub cities: Vec<CityRecord>,
    /// Aggregate risk intensity, assigned by the scoring stage.
    /// [`NO_DATA_SCORE`] when the cell has no members.
    pub score: f64,
}

/// The scored output grid: row-major cells, row 0 / col 0 at the
/// south-west corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatMapGrid {
    /// Cells per axis.
    pub resolution: usize,
    /// Row-major cell list (`row * resolution + col`).
    pub cells: Vec<GridCell>,
}

impl HeatMapGrid {
    /// Returns the cell at `(row, col)`, if in range.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        self.cells.get(row * self.resolution + col)
    }

    /// Returns the cell at `(row, col)` mutably, if in range.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut GridCell> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        self.cells.get_mut(row * self.resolution + col)
    }
}

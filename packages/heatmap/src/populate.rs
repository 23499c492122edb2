//! Bucketing of annotated positions and cities into grid cells.

use crate::HeatMapError;
use contagion_map_heatmap_models::{AnnotatedUserPosition, CityRecord, HeatMapGrid};

/// Buckets each annotated position and each in-range city into the one
/// cell whose bounds contain its coordinate.
///
/// Cell intervals are half-open toward higher indices, so a point on a
/// shared interior edge belongs to the north/east neighbor and is never
/// double-assigned; the outermost north/east edges are closed so points
/// exactly on the region boundary are kept. Points strictly outside the
/// region (upstream filtering should prevent them) are silently dropped.
///
/// # Errors
///
/// Returns [`HeatMapError::Computation`] when a record carries a
/// non-finite coordinate — that is a data-quality fault worth failing
/// the request over, not a droppable stray.
pub fn into_cells(
    mut grid: HeatMapGrid,
    users: Vec<AnnotatedUserPosition>,
    cities: &[CityRecord],
) -> Result<HeatMapGrid, HeatMapError> {
    let Some(region) = region_of(&grid) else {
        return Ok(grid);
    };
    let resolution = grid.resolution;

    for user in users {
        // The risk filter only passes records with both fields present.
        let (Some(latitude), Some(longitude)) = (user.position.latitude, user.position.longitude)
        else {
            continue;
        };
        match locate(&region, resolution, latitude, longitude)? {
            Some((row, col)) => {
                if let Some(cell) = grid.cell_mut(row, col) {
                    cell.members.push(user);
                }
            }
            None => {
                log::trace!("dropping out-of-region position ({latitude}, {longitude})");
            }
        }
    }

    for city in cities {
        match locate(&region, resolution, city.latitude, city.longitude)? {
            Some((row, col)) => {
                if let Some(cell) = grid.cell_mut(row, col) {
                    cell.cities.push(city.clone());
                }
            }
            None => {
                log::trace!("dropping out-of-region city {}", city.name);
            }
        }
    }

    Ok(grid)
}

/// Reconstructs the overall region extents from the grid's corner cells.
fn region_of(grid: &HeatMapGrid) -> Option<Extents> {
    let first = grid.cells.first()?.bounds;
    let last = grid.cells.last()?.bounds;
    Some(Extents {
        south: first.south,
        west: first.west,
        north: last.north,
        east: last.east,
    })
}

struct Extents {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl Extents {
    const fn latitude_span(&self) -> f64 {
        self.north - self.south
    }

    const fn longitude_span(&self) -> f64 {
        self.east - self.west
    }
}

/// Maps a coordinate to its `(row, col)` cell, `None` when outside the
/// region.
fn locate(
    region: &Extents,
    resolution: usize,
    latitude: f64,
    longitude: f64,
) -> Result<Option<(usize, usize)>, HeatMapError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(HeatMapError::Computation {
            message: format!("non-finite record coordinate ({latitude}, {longitude})"),
        });
    }

    let Some(row) = axis_index(region.south, region.latitude_span(), resolution, latitude) else {
        return Ok(None);
    };
    let Some(col) = axis_index(region.west, region.longitude_span(), resolution, longitude) else {
        return Ok(None);
    };
    Ok(Some((row, col)))
}

/// One-dimensional cell index along an axis.
///
/// Interior shared edges resolve to the higher-index cell (`floor` of
/// the scaled offset); a value exactly at `min + span` clamps into the
/// last cell, closing the outer edge.
fn axis_index(min: f64, span: f64, resolution: usize, value: f64) -> Option<usize> {
    if value < min || value > min + span {
        return None;
    }
    if span <= 0.0 {
        // Degenerate (zero-extent) axis: everything in range collapses
        // into index 0.
        return Some(0);
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = ((value - min) / span * resolution as f64).floor() as usize;
    Some(index.min(resolution - 1))
}

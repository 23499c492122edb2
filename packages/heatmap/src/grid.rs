//! Viewport grid construction.

use contagion_map_heatmap_models::{
    CellBounds, GRID_RESOLUTION, GridCell, HeatMapGrid, RegionBounds,
};

/// Tiles the viewport into the service's fixed
/// [`GRID_RESOLUTION`]×[`GRID_RESOLUTION`] grid.
///
/// Geometry depends only on the region, so the grid can be built before
/// (or concurrently with) any record processing.
#[must_use]
pub fn build(region: &RegionBounds) -> HeatMapGrid {
    build_with_resolution(region, GRID_RESOLUTION)
}

/// Tiles the viewport into a `resolution`×`resolution` grid of
/// rectangular cells.
///
/// Cells exactly cover the south-west → north-east rectangle with no
/// gaps or overlaps: edges are linearly interpolated across the span
/// and the last edge is pinned to the span maximum, so adjacent cells
/// share edges bit-for-bit. Row 0 / col 0 is the south-west cell;
/// increasing row moves north, increasing col moves east.
///
/// # Panics
///
/// Panics if `resolution` is zero.
#[must_use]
pub fn build_with_resolution(region: &RegionBounds, resolution: usize) -> HeatMapGrid {
    assert!(resolution > 0, "grid resolution must be positive");

    let mut cells = Vec::with_capacity(resolution * resolution);
    for row in 0..resolution {
        let south = edge(region.south(), region.north(), row, resolution);
        let north = edge(region.south(), region.north(), row + 1, resolution);
        for col in 0..resolution {
            let west = edge(region.west(), region.east(), col, resolution);
            let east = edge(region.west(), region.east(), col + 1, resolution);
            cells.push(GridCell {
                bounds: CellBounds::new(west, south, east, north),
                row,
                col,
                members: Vec::new(),
                cities: Vec::new(),
                score: 0.0,
            });
        }
    }

    HeatMapGrid {
        resolution,
        cells,
    }
}

/// The `index`-th of `resolution + 1` evenly spaced edges across
/// `[min, max]`. The last edge is exactly `max` so the tiling never
/// over- or undershoots the region from accumulated rounding.
fn edge(min: f64, max: f64, index: usize, resolution: usize) -> f64 {
    if index == resolution {
        return max;
    }
    #[allow(clippy::cast_precision_loss)]
    let fraction = index as f64 / resolution as f64;
    (max - min).mul_add(fraction, min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contagion_map_heatmap_models::Coordinate;

    fn region(south: f64, west: f64, north: f64, east: f64) -> RegionBounds {
        RegionBounds {
            center: Coordinate::new((south + north) / 2.0, (west + east) / 2.0),
            north_west: Coordinate::new(north, west),
            south_west: Coordinate::new(south, west),
            north_east: Coordinate::new(north, east),
            south_east: Coordinate::new(south, east),
        }
    }

    #[test]
    fn builds_fixed_resolution_grid() {
        let grid = build(&region(0.0, 0.0, 1.0, 1.0));
        assert_eq!(grid.resolution, GRID_RESOLUTION);
        assert_eq!(grid.cells.len(), GRID_RESOLUTION * GRID_RESOLUTION);
    }

    #[test]
    fn row_zero_col_zero_is_south_west() {
        let grid = build_with_resolution(&region(-10.0, -20.0, 10.0, 20.0), 4);
        let cell = grid.cell(0, 0).unwrap();
        assert!((cell.bounds.south - -10.0).abs() < f64::EPSILON);
        assert!((cell.bounds.west - -20.0).abs() < f64::EPSILON);

        let opposite = grid.cell(3, 3).unwrap();
        assert!((opposite.bounds.north - 10.0).abs() < f64::EPSILON);
        assert!((opposite.bounds.east - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cells_tile_the_region_exactly() {
        let bounds = region(-33.9, 150.5, -33.1, 151.5);
        let grid = build_with_resolution(&bounds, 7);

        let cell_area: f64 = grid
            .cells
            .iter()
            .map(|c| (c.bounds.east - c.bounds.west) * (c.bounds.north - c.bounds.south))
            .sum();
        let region_area =
            (bounds.east() - bounds.west()) * (bounds.north() - bounds.south());
        assert!((cell_area - region_area).abs() < 1e-9);
    }

    #[test]
    fn adjacent_cells_share_edges() {
        let grid = build_with_resolution(&region(0.0, 0.0, 3.0, 3.0), 3);
        for row in 0..3 {
            for col in 0..2 {
                let left = grid.cell(row, col).unwrap();
                let right = grid.cell(row, col + 1).unwrap();
                assert!((left.bounds.east - right.bounds.west).abs() < f64::EPSILON);
            }
        }
        for row in 0..2 {
            for col in 0..3 {
                let lower = grid.cell(row, col).unwrap();
                let upper = grid.cell(row + 1, col).unwrap();
                assert!((lower.bounds.north - upper.bounds.south).abs() < f64::EPSILON);
            }
        }
    }
}

//! Per-cell risk intensity scoring.
//!
//! The formula here is a policy knob, not geometry: anything monotonic
//! in the member counts and the city flag, normalized to a fixed range,
//! satisfies the rendering contract. Clients rely only on the range and
//! on [`NO_DATA_SCORE`] marking cells with no members.

use contagion_map_heatmap_models::{HeatMapGrid, MAX_CONTAGION_RISK, NO_DATA_SCORE};

/// Weight of a contaminated member relative to a max-risk-only member.
const CONTAMINATED_WEIGHT: f64 = 3.0;

/// Multiplier applied when the cell contains at least one city — urban
/// cells weigh the same counts more heavily.
const CITY_DENSITY_FACTOR: f64 = 1.25;

/// Half-saturation constant: the weighted count at which a cell scores
/// 50.
const SCORE_SATURATION: f64 = 10.0;

/// Scores every cell of a populated grid, producing the pipeline's
/// final artifact.
///
/// Cells with at least one member get
/// [`saturating_cell_score`]; empty cells get the [`NO_DATA_SCORE`]
/// sentinel so "unknown" renders differently from "zero risk".
#[must_use]
pub fn score_cells(mut grid: HeatMapGrid) -> HeatMapGrid {
    for cell in &mut grid.cells {
        if cell.members.is_empty() {
            cell.score = NO_DATA_SCORE;
            continue;
        }

        let contaminated = cell
            .members
            .iter()
            .filter(|m| m.position.contaminated)
            .count();
        let max_risk_only = cell
            .members
            .iter()
            .filter(|m| {
                !m.position.contaminated
                    && m.position.contagion_risk == Some(MAX_CONTAGION_RISK)
            })
            .count();

        cell.score =
            saturating_cell_score(contaminated, max_risk_only, !cell.cities.is_empty());
    }
    grid
}

/// The scoring policy: a saturating ratio normalized to `[0, 100)`.
///
/// `raw = 3·contaminated + max_risk_only`, multiplied by 1.25 when the
/// cell contains a city, then mapped through `100·w / (w + 10)`.
/// Monotonically increasing in both counts and in the city flag, and
/// bounded, so clients can apply a fixed color scale.
#[must_use]
pub fn saturating_cell_score(contaminated: usize, max_risk_only: usize, has_city: bool) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let raw = CONTAMINATED_WEIGHT.mul_add(contaminated as f64, max_risk_only as f64);
    let weighted = if has_city {
        raw * CITY_DENSITY_FACTOR
    } else {
        raw
    };
    100.0 * weighted / (weighted + SCORE_SATURATION)
}

//! Risk-relevance filtering of raw user positions.
//!
//! The store pre-filters by longitude only (a query-engine restriction
//! on range clauses), so the latitude band is enforced here, together
//! with the risk criteria.

use contagion_map_heatmap_models::{MAX_CONTAGION_RISK, RegionBounds, UserPosition};

/// Selects the positions relevant to contagion risk within the region's
/// latitude band.
///
/// A position is kept when its latitude lies inside the closed
/// `[south, north]` interval, both coordinates are present, and it is
/// either flagged contaminated or assessed at [`MAX_CONTAGION_RISK`].
/// Lower risk levels (including unassessed) do not qualify on their
/// own. Pure; output order follows input order but is not significant
/// downstream.
#[must_use]
pub fn risk_relevant(region: &RegionBounds, users: Vec<UserPosition>) -> Vec<UserPosition> {
    users
        .into_iter()
        .filter(|user| is_risk_relevant(region, user))
        .collect()
}

fn is_risk_relevant(region: &RegionBounds, user: &UserPosition) -> bool {
    // A null latitude can never satisfy the band check, so the null and
    // range checks collapse into one.
    let Some(latitude) = user.latitude else {
        return false;
    };
    if user.longitude.is_none() {
        return false;
    }
    if latitude < region.south() || latitude > region.north() {
        return false;
    }
    if user.contaminated {
        return true;
    }
    user.contagion_risk == Some(MAX_CONTAGION_RISK)
}

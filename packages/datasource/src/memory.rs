//! In-memory [`PositionStore`] backed by JSON snapshot files.

use crate::{FetchError, PositionStore};
use async_trait::async_trait;
use contagion_map_heatmap_models::{CitiesContent, CityRecord, RegionBounds, UserPosition};
use std::path::Path;

/// A [`PositionStore`] over plain vectors.
///
/// Serves two purposes: the backing store for local serving (loaded
/// from JSON snapshot files at startup) and the test double for the
/// pipeline and handlers. Applies the same range semantics a real
/// store would: longitude-only narrowing for positions, full list plus
/// in-range subset for cities.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Vec<UserPosition>,
    cities: Vec<CityRecord>,
}

impl MemoryStore {
    /// Creates a store over the given records.
    #[must_use]
    pub const fn new(users: Vec<UserPosition>, cities: Vec<CityRecord>) -> Self {
        Self { users, cities }
    }

    /// Loads a store from two JSON snapshot files, each a top-level
    /// array of records (`usersposition` and `cities` collection
    /// exports).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] when a file cannot be read and
    /// [`FetchError::Parse`] when its contents do not match the record
    /// shape.
    pub fn from_snapshot_files(
        users_path: &Path,
        cities_path: &Path,
    ) -> Result<Self, FetchError> {
        let users: Vec<UserPosition> =
            serde_json::from_str(&std::fs::read_to_string(users_path)?)?;
        let cities: Vec<CityRecord> =
            serde_json::from_str(&std::fs::read_to_string(cities_path)?)?;
        log::info!(
            "Loaded {} user positions and {} cities from snapshots",
            users.len(),
            cities.len()
        );
        Ok(Self::new(users, cities))
    }
}

#[async_trait]
impl PositionStore for MemoryStore {
    async fn fetch_users_in_range(
        &self,
        region: &RegionBounds,
    ) -> Result<Vec<UserPosition>, FetchError> {
        // Longitude-only narrowing, mirroring the production store's
        // single-field range query. Records with no longitude are
        // excluded here just as a range clause would exclude them.
        Ok(self
            .users
            .iter()
            .filter(|user| {
                user.longitude
                    .is_some_and(|lng| lng >= region.west() && lng <= region.east())
            })
            .cloned()
            .collect())
    }

    async fn fetch_all_cities(&self, region: &RegionBounds) -> Result<CitiesContent, FetchError> {
        let inside_range = self
            .cities
            .iter()
            .filter(|city| {
                city.latitude >= region.south()
                    && city.latitude <= region.north()
                    && city.longitude >= region.west()
                    && city.longitude <= region.east()
            })
            .cloned()
            .collect();
        Ok(CitiesContent {
            all_cities: self.cities.clone(),
            inside_range,
        })
    }
}

//! HTTP handler functions for the contagion map API.

use actix_web::{HttpResponse, web};
use contagion_map_heatmap::{HeatMapError, build_heat_map, validate_region};
use contagion_map_server_models::{ApiHealth, ApiHeatMap, HeatMapRequest};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /heatmap/getMapElementsByPosition`
///
/// Validates the viewport markers, issues the two store fetches
/// concurrently, runs the aggregation pipeline, and returns the scored
/// grid. All-or-nothing: any failure yields an error status with no
/// partial grid.
pub async fn map_elements_by_position(
    state: web::Data<AppState>,
    body: web::Json<HeatMapRequest>,
) -> HttpResponse {
    // Validation runs before any fetch is issued.
    let region = match validate_region(body.markers()) {
        Ok(region) => region,
        Err(e @ HeatMapError::InvalidRegion) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
        Err(e) => {
            log::error!("Rejecting malformed region: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to compute heat map"
            }));
        }
    };

    // Independent reads; join before city assignment.
    let fetched = futures::try_join!(
        state.store.fetch_users_in_range(&region),
        state.store.fetch_all_cities(&region),
    );
    let (users, cities) = match fetched {
        Ok(data) => data,
        Err(e) => {
            log::error!("Upstream fetch failed: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch map data"
            }));
        }
    };

    match build_heat_map(&region, users, &cities) {
        Ok(grid) => HttpResponse::Ok().json(ApiHeatMap::from(&grid)),
        Err(e) => {
            log::error!("Heat map aggregation failed: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to compute heat map"
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use async_trait::async_trait;
    use contagion_map_datasource::memory::MemoryStore;
    use contagion_map_datasource::{FetchError, PositionStore};
    use contagion_map_heatmap_models::{
        CitiesContent, CityRecord, GRID_RESOLUTION, RegionBounds, UserPosition,
    };
    use std::sync::Arc;

    /// Store double that fails the test if any fetch is issued.
    struct PanickingStore;

    #[async_trait]
    impl PositionStore for PanickingStore {
        async fn fetch_users_in_range(
            &self,
            _region: &RegionBounds,
        ) -> Result<Vec<UserPosition>, FetchError> {
            panic!("fetch_users_in_range called before validation passed");
        }

        async fn fetch_all_cities(
            &self,
            _region: &RegionBounds,
        ) -> Result<CitiesContent, FetchError> {
            panic!("fetch_all_cities called before validation passed");
        }
    }

    /// Store double whose fetches always fail.
    struct FailingStore;

    #[async_trait]
    impl PositionStore for FailingStore {
        async fn fetch_users_in_range(
            &self,
            _region: &RegionBounds,
        ) -> Result<Vec<UserPosition>, FetchError> {
            Err(FetchError::Unavailable {
                message: "store offline".to_string(),
            })
        }

        async fn fetch_all_cities(
            &self,
            _region: &RegionBounds,
        ) -> Result<CitiesContent, FetchError> {
            Err(FetchError::Unavailable {
                message: "store offline".to_string(),
            })
        }
    }

    fn request_body(include_center: bool) -> serde_json::Value {
        let marker = |lat: f64, lng: f64| serde_json::json!({"latitude": lat, "longitude": lng});
        let mut body = serde_json::json!({
            "markerNorthWest": marker(2.0, 0.0),
            "markerSouthWest": marker(0.0, 0.0),
            "markerNorthEast": marker(2.0, 2.0),
            "markerSouthEast": marker(0.0, 2.0),
        });
        if include_center {
            body["markerCentral"] = marker(1.0, 1.0);
        }
        body
    }

    async fn post_heatmap(
        store: Arc<dyn PositionStore>,
        body: &serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let state = web::Data::new(AppState { store });
        let app = test::init_service(App::new().app_data(state).route(
            "/heatmap/getMapElementsByPosition",
            web::post().to(map_elements_by_position),
        ))
        .await;
        let request = test::TestRequest::post()
            .uri("/heatmap/getMapElementsByPosition")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status().as_u16();
        let body: serde_json::Value = test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn missing_marker_is_rejected_before_any_fetch() {
        let (status, body) =
            post_heatmap(Arc::new(PanickingStore), &request_body(false)).await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("Invalid region"));
    }

    #[actix_web::test]
    async fn fetch_failure_maps_to_server_error() {
        let (status, _body) = post_heatmap(Arc::new(FailingStore), &request_body(true)).await;
        assert_eq!(status, 500);
    }

    #[actix_web::test]
    async fn returns_scored_grid_for_valid_request() {
        let users = vec![
            UserPosition {
                latitude: Some(0.5),
                longitude: Some(0.5),
                contaminated: true,
                ..UserPosition::default()
            },
            UserPosition {
                latitude: Some(1.5),
                longitude: Some(1.5),
                contagion_risk: Some(1),
                ..UserPosition::default()
            },
        ];
        let cities = vec![CityRecord {
            latitude: 1.0,
            longitude: 1.0,
            name: "Springfield".to_string(),
            state: None,
            population: None,
        }];
        let store = Arc::new(MemoryStore::new(users, cities));

        let (status, body) = post_heatmap(store, &request_body(true)).await;
        assert_eq!(status, 200);
        assert_eq!(body["resolution"].as_u64().unwrap() as usize, GRID_RESOLUTION);
        let cells = body["cells"].as_array().unwrap();
        assert_eq!(cells.len(), GRID_RESOLUTION * GRID_RESOLUTION);

        // One cell holds the contaminated user; the risk-1 user was
        // filtered out.
        let populated: Vec<_> = cells
            .iter()
            .filter(|c| c["userCount"].as_u64().unwrap() > 0)
            .collect();
        assert_eq!(populated.len(), 1);
        assert!(populated[0]["score"].as_f64().unwrap() > 0.0);
        assert_eq!(populated[0]["noData"], serde_json::json!(false));
    }
}

//! Nearest-city annotation.

use contagion_map_heatmap_models::{AnnotatedUserPosition, CityRecord, UserPosition};

/// Annotates each position with its nearest city from the full
/// reference list.
///
/// Distance is squared planar Euclidean on (latitude, longitude) treated
/// as Cartesian; geodesic correction is out of scope for the data scale
/// involved, as is a spatial index (the O(U×C) scan is deliberate).
/// Ties go to the first city in input order (strictly-less comparison),
/// which keeps the whole pipeline deterministic. An empty city list
/// yields `city: None`, which downstream stages tolerate.
#[must_use]
pub fn nearest_cities(
    cities: &[CityRecord],
    users: Vec<UserPosition>,
) -> Vec<AnnotatedUserPosition> {
    users
        .into_iter()
        .map(|position| {
            let city = position
                .latitude
                .zip(position.longitude)
                .and_then(|(latitude, longitude)| nearest_city(cities, latitude, longitude))
                .cloned();
            AnnotatedUserPosition { position, city }
        })
        .collect()
}

fn nearest_city(cities: &[CityRecord], latitude: f64, longitude: f64) -> Option<&CityRecord> {
    let mut best: Option<(&CityRecord, f64)> = None;
    for city in cities {
        let distance = squared_distance(latitude, longitude, city.latitude, city.longitude);
        // Strictly-less keeps the first equidistant city.
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((city, distance));
        }
    }
    best.map(|(city, _)| city)
}

fn squared_distance(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    let d_lat = lat_a - lat_b;
    let d_lng = lng_a - lng_b;
    d_lat.mul_add(d_lat, d_lng * d_lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(latitude: f64, longitude: f64, name: &str) -> CityRecord {
        CityRecord {
            latitude,
            longitude,
            name: name.to_string(),
            state: None,
            population: None,
        }
    }

    fn user_at(latitude: f64, longitude: f64) -> UserPosition {
        UserPosition {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..UserPosition::default()
        }
    }

    #[test]
    fn single_city_is_always_assigned() {
        let cities = vec![city(80.0, 170.0, "Far Away")];
        let annotated = nearest_cities(&cities, vec![user_at(-80.0, -170.0)]);
        assert_eq!(annotated[0].city.as_ref().unwrap().name, "Far Away");
    }

    #[test]
    fn picks_the_closest_city() {
        let cities = vec![
            city(0.0, 0.0, "Origin"),
            city(1.0, 1.0, "Near"),
            city(5.0, 5.0, "Far"),
        ];
        let annotated = nearest_cities(&cities, vec![user_at(1.2, 0.9)]);
        assert_eq!(annotated[0].city.as_ref().unwrap().name, "Near");
    }

    #[test]
    fn equidistant_tie_goes_to_first_in_input_order() {
        let cities = vec![city(0.0, 1.0, "East"), city(0.0, -1.0, "West")];
        let annotated = nearest_cities(&cities, vec![user_at(0.0, 0.0)]);
        assert_eq!(annotated[0].city.as_ref().unwrap().name, "East");

        let reversed = vec![city(0.0, -1.0, "West"), city(0.0, 1.0, "East")];
        let annotated = nearest_cities(&reversed, vec![user_at(0.0, 0.0)]);
        assert_eq!(annotated[0].city.as_ref().unwrap().name, "West");
    }

    #[test]
    fn empty_city_list_yields_no_assignment() {
        let annotated = nearest_cities(&[], vec![user_at(0.0, 0.0)]);
        assert_eq!(annotated.len(), 1);
        assert!(annotated[0].city.is_none());
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Filter for `tracking/get`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// One recorded GPS fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// km/h as reported by the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Route overview for a list of fixes in recorded order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub point_count: usize,
    pub distance_meters: f64,
    pub first: Option<LocationPoint>,
    pub last: Option<LocationPoint>,
    pub max_speed: Option<f64>,
}

impl RouteSummary {
    pub fn from_points(points: &[LocationPoint]) -> Self {
        let distance_meters = points
            .windows(2)
            .map(|pair| {
                haversine_distance(
                    pair[0].latitude,
                    pair[0].longitude,
                    pair[1].latitude,
                    pair[1].longitude,
                )
            })
            .sum();

        let max_speed = points
            .iter()
            .filter_map(|p| p.speed)
            .fold(None, |max: Option<f64>, s| Some(max.map_or(s, |m| m.max(s))));

        Self {
            point_count: points.len(),
            distance_meters,
            first: points.first().cloned(),
            last: points.last().cloned(),
            max_speed,
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64, speed: Option<f64>) -> LocationPoint {
        LocationPoint {
            user_id: Some("u-1".to_string()),
            user_name: None,
            latitude,
            longitude,
            recorded_at: None,
            address: None,
            speed,
        }
    }

    #[test]
    fn test_haversine_distance() {
        // Jakarta to Bandung is approximately 120km
        let jakarta = (-6.2088, 106.8456);
        let bandung = (-6.9175, 107.6191);
        let distance = haversine_distance(jakarta.0, jakarta.1, bandung.0, bandung.1);

        assert!(distance > 110_000.0 && distance < 125_000.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let distance = haversine_distance(-6.2088, 106.8456, -6.2088, 106.8456);
        assert!(distance < 0.001);
    }

    #[test]
    fn test_route_summary_sums_legs() {
        let points = vec![
            point(-6.2088, 106.8456, Some(40.0)),
            point(-6.9175, 107.6191, Some(72.5)),
            point(-6.2088, 106.8456, None),
        ];
        let summary = RouteSummary::from_points(&points);
        let leg = haversine_distance(-6.2088, 106.8456, -6.9175, 107.6191);

        assert_eq!(summary.point_count, 3);
        assert!((summary.distance_meters - 2.0 * leg).abs() < 1e-6);
        assert_eq!(summary.max_speed, Some(72.5));
        assert_eq!(summary.first, Some(points[0].clone()));
        assert_eq!(summary.last, Some(points[2].clone()));
    }

    #[test]
    fn test_route_summary_empty() {
        let summary = RouteSummary::from_points(&[]);
        assert_eq!(summary.point_count, 0);
        assert_eq!(summary.distance_meters, 0.0);
        assert!(summary.first.is_none());
        assert!(summary.max_speed.is_none());
    }

    #[test]
    fn test_query_serializes_date() {
        let query = TrackingQuery {
            user_id: Some("u-1".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"user_id": "u-1", "date": "2024-05-01"})
        );
    }
}

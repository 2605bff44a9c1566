//! Great-circle distance on a spherical Earth.

use quakescope_types::{Coordinate, SeismicEvent};

/// Mean Earth radius used for all distance calculations, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
///
/// Symmetric in its arguments and zero for identical points.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// The epicentre of an event as a [`Coordinate`].
pub(crate) const fn epicentre(event: &SeismicEvent) -> Coordinate {
    Coordinate {
        latitude: event.latitude,
        longitude: event.longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn point(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} +/- {tolerance}, got {actual}"
        );
    }

    #[test]
    fn same_point_is_zero() {
        let la = point(34.05, -118.25);
        assert_close(haversine_km(la, la), 0.0, 1e-9);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        assert_close(haversine_km(point(0.0, 0.0), point(0.0, 1.0)), 111.19, 0.01);
    }

    #[test]
    fn one_degree_of_latitude() {
        assert_close(haversine_km(point(0.0, 0.0), point(1.0, 0.0)), 111.19, 0.01);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (point(34.05, -118.25), point(37.77, -122.42)),
            (point(-33.87, 151.21), point(35.68, 139.69)),
            (point(89.9, 0.0), point(-89.9, 180.0)),
        ];
        for (a, b) in pairs {
            assert_close(haversine_km(a, b), haversine_km(b, a), 1e-9);
        }
    }

    #[test]
    fn los_angeles_to_san_francisco() {
        // Reference value from standard haversine calculators.
        let d = haversine_km(point(34.05, -118.25), point(37.77, -122.42));
        assert_close(d, 559.0, 2.0);
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_km(point(0.0, 0.0), point(0.0, 180.0));
        assert_close(d, std::f64::consts::PI * EARTH_RADIUS_KM, 1e-6);
    }
}

use crate::models::Coordinate;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
/// Assumed pace when the provider cannot route a pair of stops.
pub const WALKING_SPEED_M_PER_MIN: f64 = 50.0;

pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Seconds needed to walk `distance_m` at [`WALKING_SPEED_M_PER_MIN`].
pub fn walking_duration_s(distance_m: u64) -> u64 {
    round_non_negative(distance_m as f64 / WALKING_SPEED_M_PER_MIN * 60.0)
}

/// Nearest whole meter. Negative or non-finite input maps to zero.
pub fn round_meters(meters: f64) -> u64 {
    round_non_negative(meters)
}

/// Milliseconds to whole seconds, half away from zero.
pub fn millis_to_seconds(millis: f64) -> u64 {
    round_non_negative(millis / 1000.0)
}

pub(crate) fn round_non_negative(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let point = Coordinate { lat: 37.5, lon: 127.0 };
        assert_eq!(haversine_m(point, point), 0.0);
    }

    #[test]
    fn test_haversine_symmetry() {
        let a = Coordinate { lat: 37.5, lon: 127.0 };
        let b = Coordinate { lat: 37.51, lon: 127.01 };
        assert_eq!(haversine_m(a, b), haversine_m(b, a));
    }

    #[test]
    fn test_haversine_seoul_pair() {
        // ~0.01° both ways at 37.5°N
        let a = Coordinate { lat: 37.50, lon: 127.00 };
        let b = Coordinate { lat: 37.51, lon: 127.01 };
        let dist = haversine_m(a, b);
        assert!((dist - 1420.0).abs() < 10.0, "got {dist}");
    }

    #[test]
    fn test_walking_duration() {
        // 50 m/min -> 1.2 s per meter
        assert_eq!(walking_duration_s(0), 0);
        assert_eq!(walking_duration_s(50), 60);
        assert_eq!(walking_duration_s(1000), 1200);
        assert_eq!(walking_duration_s(1), 1);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(millis_to_seconds(600_000.0), 600);
        assert_eq!(millis_to_seconds(1_500.0), 2);
        assert_eq!(millis_to_seconds(2_499.0), 2);
        assert_eq!(millis_to_seconds(-10.0), 0);
        assert_eq!(round_meters(999.5), 1000);
        assert_eq!(round_meters(f64::NAN), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0, -180.0..=180.0)
                .prop_map(|(lat, lon)| Coordinate { lat, lon })
        }

        proptest! {
            #[test]
            fn prop_haversine_non_negative(a in valid_coord(), b in valid_coord()) {
                prop_assert!(haversine_m(a, b) >= 0.0);
            }

            #[test]
            fn prop_haversine_symmetric(a in valid_coord(), b in valid_coord()) {
                prop_assert!((haversine_m(a, b) - haversine_m(b, a)).abs() < 1e-6);
            }

            #[test]
            fn prop_haversine_bounded_by_half_earth_circumference(
                a in valid_coord(),
                b in valid_coord()
            ) {
                let max_distance = std::f64::consts::PI * EARTH_RADIUS_M;
                prop_assert!(haversine_m(a, b) <= max_distance + 1.0);
            }

            #[test]
            fn prop_haversine_triangle_inequality(
                a in valid_coord(),
                b in valid_coord(),
                c in valid_coord()
            ) {
                let dist_ab = haversine_m(a, b);
                let dist_bc = haversine_m(b, c);
                let dist_ac = haversine_m(a, c);
                prop_assert!(dist_ac <= dist_ab + dist_bc + 1e-3);
            }

            #[test]
            fn prop_walking_duration_monotonic(d in 0u64..10_000_000, extra in 0u64..1_000) {
                prop_assert!(walking_duration_s(d) <= walking_duration_s(d + extra));
            }
        }
    }
}

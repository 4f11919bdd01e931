//! Spherical forward projection and initial bearing.
//!
//! Formulae from the "destination point" and "initial bearing" sections of
//! the movable-type latlong notes, on a sphere of radius
//! [`EARTH_RADIUS_NM`](super::defaults::EARTH_RADIUS_NM).

use crate::types::{LonLat, NauticalMiles};

use super::defaults::EARTH_RADIUS_NM;

/// Wrap a longitude into (-180, 180]. In-range values come back unchanged.
pub fn normalize_longitude(lon: f64) -> f64 {
    if lon > -180.0 && lon <= 180.0 {
        return lon;
    }
    let wrapped = (lon + 540.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

/// Destination reached from `origin` after travelling `distance` along the
/// great circle with initial bearing `bearing_deg` (degrees true).
///
/// Full precision; callers quantize. A zero distance returns `origin`
/// exactly, whatever the bearing.
pub fn project(origin: LonLat, distance: NauticalMiles, bearing_deg: f64) -> LonLat {
    if distance.raw() == 0.0 {
        return LonLat::new(normalize_longitude(origin.lon()), origin.lat());
    }
    let lat = origin.lat().to_radians();
    let lon = origin.lon().to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance.raw() / EARTH_RADIUS_NM;

    let lat2 = (lat.sin() * delta.cos() + lat.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon
        + (theta.sin() * delta.sin() * lat.cos()).atan2(delta.cos() - lat.sin() * lat2.sin());

    LonLat::new(normalize_longitude(lon2.to_degrees()), lat2.to_degrees())
}

/// Initial bearing from `from` to `to`, in [0, 360).
pub fn bearing(from: LonLat, to: LonLat) -> f64 {
    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();
    let dlon = (to.lon() - from.lon()).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let deg = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360
    if deg >= 360.0 { 0.0 } else { deg }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: LonLat, b: LonLat, eps: f64) -> bool {
        (a.lon() - b.lon()).abs() < eps && (a.lat() - b.lat()).abs() < eps
    }

    #[test]
    fn zero_distance_is_identity() {
        let origins = [
            LonLat::new(0.0, 0.0),
            LonLat::new(-117.8, 35.3),
            LonLat::new(139.7, -33.9),
            LonLat::new(179.9999, 89.5),
            LonLat::new(-179.5, -60.0),
            LonLat::new(-77.0365, 38.8977),
            LonLat::new(0.1, 0.1),
            LonLat::new(180.0, 12.5),
        ];
        for origin in origins {
            for theta in [0.0, 45.0, 90.0, 180.0, 271.5, 359.9] {
                let p = project(origin, NauticalMiles::ZERO, theta);
                assert_eq!(p, origin, "{origin} at {theta}° moved to {p}");
            }
        }
    }

    #[test]
    fn zero_distance_wraps_out_of_range_origin() {
        let p = project(LonLat::new(190.0, 10.0), NauticalMiles::ZERO, 45.0);
        assert_eq!(p, LonLat::new(-170.0, 10.0));
    }

    #[test]
    fn one_degree_of_arc_north() {
        // 60 NM is roughly one degree of latitude on this sphere
        let arc = EARTH_RADIUS_NM * 1f64.to_radians();
        let p = project(LonLat::new(10.0, 20.0), NauticalMiles(arc), 0.0);
        assert!(close(p, LonLat::new(10.0, 21.0), EPS), "{p}");
    }

    #[test]
    fn east_along_equator() {
        let arc = EARTH_RADIUS_NM * 2f64.to_radians();
        let p = project(LonLat::new(0.0, 0.0), NauticalMiles(arc), 90.0);
        assert!(close(p, LonLat::new(2.0, 0.0), EPS), "{p}");
    }

    #[test]
    fn projection_wraps_antimeridian() {
        let arc = EARTH_RADIUS_NM * 1f64.to_radians();
        let p = project(LonLat::new(179.5, 0.0), NauticalMiles(arc), 90.0);
        assert!(close(p, LonLat::new(-179.5, 0.0), 1e-6), "{p}");
    }

    #[test]
    fn normalize_longitude_range() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(-117.8), -117.8);
        assert_eq!(normalize_longitude(0.1), 0.1);
        assert_eq!(normalize_longitude(139.7), 139.7);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(540.0), 180.0);
    }

    #[test]
    fn cardinal_bearings() {
        let o = LonLat::new(0.0, 0.0);
        assert!((bearing(o, LonLat::new(0.0, 1.0)) - 0.0).abs() < EPS);
        assert!((bearing(o, LonLat::new(1.0, 0.0)) - 90.0).abs() < EPS);
        assert!((bearing(o, LonLat::new(0.0, -1.0)) - 180.0).abs() < EPS);
        assert!((bearing(o, LonLat::new(-1.0, 0.0)) - 270.0).abs() < EPS);
    }

    #[test]
    fn bearing_is_in_range() {
        let o = LonLat::new(-117.0, 35.0);
        for i in 0..72 {
            let theta = i as f64 * 5.0;
            let b = bearing(o, project(o, NauticalMiles(25.0), theta));
            assert!((0.0..360.0).contains(&b), "{b}");
            let diff = (b - theta + 540.0).rem_euclid(360.0) - 180.0;
            assert!(diff.abs() < 1e-6, "expected {theta}, got {b}");
        }
    }
}

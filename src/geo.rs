//! Geographic positions of road-network nodes.

/// Mean Earth radius, in meters.
const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// A position on the globe, in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    latitude: f64,
    longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[inline(always)]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline(always)]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle (haversine) distance to `other`, in meters.
    ///
    /// No road between the two points can be shorter than this.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let lat_a = self.latitude.to_radians();
        let lat_b = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        MEAN_EARTH_RADIUS * c
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Point::new(43.6, 1.44);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(43.6047, 1.4442);
        let b = Point::new(43.5601, 1.4808);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
    }

    #[test]
    fn known_city_pair() {
        // Two points ~1.2km apart in central Philadelphia.
        let a = Point::new(39.9526, -75.1635);
        let b = Point::new(39.9496, -75.1503);
        let d = a.distance_to(&b);
        assert!(d > 1_000.0 && d < 1_500.0, "unexpected distance {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        // A degree of latitude is ~111km everywhere.
        let a = Point::new(45.0, 3.0);
        let b = Point::new(46.0, 3.0);
        let d = a.distance_to(&b);
        assert!((d - 111_195.0).abs() < 200.0, "unexpected distance {d}");
    }
}

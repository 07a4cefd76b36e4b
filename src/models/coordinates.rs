use serde::{Deserialize, Serialize};

/// Mean Earth radius used for the spherical distance and projection math.
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Calculate distance between two coordinates using Haversine formula
    /// Returns distance in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Project a point `distance_m` meters from this one along `bearing_deg`
    /// (compass degrees, 0 = north, clockwise), using the forward geodesic
    /// on a spherical Earth. Longitude is normalized to [-180, 180], so the
    /// result is always a valid coordinate.
    pub fn destination_point(&self, bearing_deg: f64, distance_m: f64) -> Coordinates {
        let angular_distance = (distance_m / 1000.0) / EARTH_RADIUS_KM;
        let bearing_rad = bearing_deg.to_radians();

        let lat1 = self.lat.to_radians();
        let lng1 = self.lng.to_radians();

        let lat2 = (lat1.sin() * angular_distance.cos()
            + lat1.cos() * angular_distance.sin() * bearing_rad.cos())
        .asin();
        let lng2 = lng1
            + (bearing_rad.sin() * angular_distance.sin() * lat1.cos())
                .atan2(angular_distance.cos() - lat1.sin() * lat2.sin());

        // Wrap longitude into [-180, 180]
        let lng_deg = (lng2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;

        Coordinates {
            lat: lat2.to_degrees(),
            lng: lng_deg,
        }
    }

    /// Initial compass bearing (degrees, 0 = north, clockwise, [0, 360))
    /// from this point toward `other` on a spherical Earth.
    pub fn initial_bearing_to(&self, other: &Coordinates) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let y = delta_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

        (y.atan2(x).to_degrees() + 360.0).rem_euclid(360.0)
    }

    /// Round coordinates to specified decimal places for caching
    pub fn round(&self, decimal_places: u32) -> Self {
        let multiplier = 10_f64.powi(decimal_places as i32);
        Coordinates {
            lat: (self.lat * multiplier).round() / multiplier,
            lng: (self.lng * multiplier).round() / multiplier,
        }
    }
}

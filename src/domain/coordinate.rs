use serde::Deserialize;

/// A WGS84 point as returned by the geocoding API.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Placeholder written when an address could not be located.
    pub const SENTINEL: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_members_default_to_zero() {
        let point: LatLng = serde_json::from_str(r#"{"lat": 31.23}"#).unwrap();
        assert_eq!(point, LatLng::new(31.23, 0.0));

        let empty: LatLng = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LatLng::SENTINEL);
    }
}

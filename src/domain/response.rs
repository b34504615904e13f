use serde::Deserialize;

use super::LatLng;

/// Value of the top-level `status` field of a geocoding response.
///
/// Only [`GeocodeStatus::Ok`] means the `results` array is meaningful.
/// Unrecognised or missing statuses decode as [`GeocodeStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeocodeStatus {
    Ok,
    ZeroResults,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    #[default]
    #[serde(other)]
    Other,
}

/// Decoded geocoding API response.
///
/// Unknown fields are ignored and missing ones take their zero value, so a
/// body of `{}` decodes to an empty result with [`GeocodeStatus::Other`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResult {
    pub status: GeocodeStatus,
    pub error_message: Option<String>,
    pub results: Vec<Candidate>,
}

impl GeocodeResult {
    /// Location of the first candidate, if the query succeeded with any.
    pub fn first_location(&self) -> Option<LatLng> {
        if self.status != GeocodeStatus::Ok {
            return None;
        }
        self.results.first().map(|c| c.geometry.location)
    }
}

/// One match returned for a query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub formatted_address: String,
    pub geometry: Geometry,
    pub types: Vec<String>,
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub location: LatLng,
    /// e.g. `ROOFTOP`, `APPROXIMATE`
    pub location_type: String,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geocode_response() {
        // Trimmed response for "Beijing"
        let json = r#"{
            "results": [{
                "address_components": [
                    {"long_name": "北京市", "short_name": "北京市", "types": ["locality", "political"]},
                    {"long_name": "中国", "short_name": "CN", "types": ["country", "political"]}
                ],
                "formatted_address": "中国北京市",
                "geometry": {
                    "location": {"lat": 39.904211, "lng": 116.407395},
                    "location_type": "APPROXIMATE",
                    "viewport": {
                        "northeast": {"lat": 40.1, "lng": 116.7},
                        "southwest": {"lat": 39.7, "lng": 116.1}
                    }
                },
                "place_id": "ChIJuSwU55ZS8DURiqkPryBWYrk",
                "types": ["locality", "political"]
            }],
            "status": "OK"
        }"#;

        let result: GeocodeResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status, GeocodeStatus::Ok);
        assert_eq!(result.results.len(), 1);

        let candidate = &result.results[0];
        assert_eq!(candidate.formatted_address, "中国北京市");
        assert_eq!(candidate.geometry.location_type, "APPROXIMATE");
        assert_eq!(candidate.geometry.viewport.northeast, LatLng::new(40.1, 116.7));
        assert_eq!(candidate.address_components[1].short_name, "CN");
        assert_eq!(candidate.types, vec!["locality", "political"]);

        assert_eq!(
            result.first_location(),
            Some(LatLng::new(39.904211, 116.407395))
        );
    }

    #[test]
    fn test_zero_results_has_no_location() {
        let json = r#"{"results": [], "status": "ZERO_RESULTS"}"#;
        let result: GeocodeResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status, GeocodeStatus::ZeroResults);
        assert_eq!(result.first_location(), None);
    }

    #[test]
    fn test_non_ok_status_ignores_candidates() {
        let json = r#"{
            "results": [{"geometry": {"location": {"lat": 1.0, "lng": 2.0}}}],
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota."
        }"#;
        let result: GeocodeResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status, GeocodeStatus::OverQueryLimit);
        assert!(result.error_message.is_some());
        assert_eq!(result.first_location(), None);
    }

    #[test]
    fn test_unknown_and_missing_status() {
        let result: GeocodeResult = serde_json::from_str(r#"{"status": "NEW_THING"}"#).unwrap();
        assert_eq!(result.status, GeocodeStatus::Other);

        let result: GeocodeResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.status, GeocodeStatus::Other);
        assert!(result.results.is_empty());
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        assert!(serde_json::from_str::<GeocodeResult>("<html>").is_err());
        assert!(serde_json::from_str::<GeocodeResult>(r#"{"results": "nope"}"#).is_err());
    }
}

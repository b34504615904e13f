use std::fmt;

use super::{GeocodeResult, LatLng};

/// One line of output: the queried address and where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub address: String,
    pub location: LatLng,
    /// `false` when `location` is the sentinel rather than a real match
    pub located: bool,
}

impl OutputRecord {
    /// Build the record for a successfully decoded response.
    ///
    /// Takes the first candidate when the status is `OK` and there is at
    /// least one; otherwise falls back to [`LatLng::SENTINEL`].
    pub fn from_result(address: &str, result: &GeocodeResult) -> Self {
        match result.first_location() {
            Some(location) => Self {
                address: address.to_string(),
                location,
                located: true,
            },
            None => Self {
                address: address.to_string(),
                location: LatLng::SENTINEL,
                located: false,
            },
        }
    }
}

/// Formats as `"<address>",<lat>,<lng>` with six fractional digits.
///
/// The address is quoted verbatim; embedded quotes are not escaped.
impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\",{:.6},{:.6}",
            self.address, self.location.lat, self.location.lng
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, GeocodeStatus, Geometry};

    fn ok_result(points: &[(f64, f64)]) -> GeocodeResult {
        GeocodeResult {
            status: GeocodeStatus::Ok,
            results: points
                .iter()
                .map(|&(lat, lng)| Candidate {
                    geometry: Geometry {
                        location: LatLng::new(lat, lng),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_candidate_wins() {
        let result = ok_result(&[(39.9, 116.4), (31.2, 121.5)]);
        let record = OutputRecord::from_result("Beijing", &result);
        assert!(record.located);
        assert_eq!(record.to_string(), r#""Beijing",39.900000,116.400000"#);
    }

    #[test]
    fn test_ok_without_candidates_is_sentinel() {
        let record = OutputRecord::from_result("Nowhere", &ok_result(&[]));
        assert!(!record.located);
        assert_eq!(record.to_string(), r#""Nowhere",0.000000,0.000000"#);
    }

    #[test]
    fn test_zero_results_is_sentinel() {
        let result = GeocodeResult {
            status: GeocodeStatus::ZeroResults,
            ..Default::default()
        };
        let record = OutputRecord::from_result("Atlantis", &result);
        assert_eq!(record.to_string(), r#""Atlantis",0.000000,0.000000"#);
    }

    #[test]
    fn test_negative_and_rounded_coordinates() {
        let result = ok_result(&[(-33.8688197, 151.2092953)]);
        let record = OutputRecord::from_result("Sydney NSW", &result);
        assert_eq!(record.to_string(), r#""Sydney NSW",-33.868820,151.209295"#);

        let result = ok_result(&[(37.7749, -122.4194)]);
        let record = OutputRecord::from_result("San Francisco", &result);
        assert_eq!(
            record.to_string(),
            r#""San Francisco",37.774900,-122.419400"#
        );
    }

    #[test]
    fn test_address_is_quoted_verbatim() {
        let result = ok_result(&[(1.0, 2.0)]);
        let record = OutputRecord::from_result(r#"5th "Main" St, 上海"#, &result);
        assert_eq!(
            record.to_string(),
            r#""5th "Main" St, 上海",1.000000,2.000000"#
        );
    }
}

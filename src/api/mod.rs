pub mod error;
pub mod google;

pub use error::GeocodeError;
pub use google::GoogleGeocoder;

use crate::domain::GeocodeResult;

/// Resolves a free-text address into the upstream's decoded response.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        (**self).geocode(address)
    }
}

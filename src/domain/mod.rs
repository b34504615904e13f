pub mod coordinate;
pub mod record;
pub mod response;

pub use coordinate::LatLng;
pub use record::OutputRecord;
pub use response::{AddressComponent, Candidate, GeocodeResult, GeocodeStatus, Geometry, Viewport};

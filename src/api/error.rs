use thiserror::Error;

/// Why a single address could not be geocoded.
///
/// Every variant is per-address: the batch logs it and moves on.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("geocoding API returned error status: {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("failed to parse geocoding JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

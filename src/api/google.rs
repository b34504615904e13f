use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;

use super::{GeocodeError, Geocoder};
use crate::config::GeocoderConfig;
use crate::domain::GeocodeResult;

const USER_AGENT: &str = concat!("geocode-batch/", env!("CARGO_PKG_VERSION"));

/// Client for a Google-style `geocode/json` endpoint.
///
/// Sends exactly one GET per address. There is no retry or rate limiting;
/// the only bound on a request is the configured timeout.
pub struct GoogleGeocoder {
    client: Client,
    endpoint: Url,
    language: String,
    api_key: Option<String>,
}

impl GoogleGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .with_context(|| format!("Invalid geocoding endpoint: {}", config.endpoint))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            language: config.language.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full request URL for `address`, with the address form-encoded.
    pub fn request_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("sensor", "false")
                .append_pair("language", &self.language);
            if let Some(key) = &self.api_key {
                query.append_pair("key", key);
            }
            query.append_pair("address", address);
        }
        url
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let url = self.request_url(address);
        log::debug!("GET {}", redact_key(&url));

        let response = self.client.get(url).send()?;
        let status = response.status();
        log::debug!("{} -> {}", address, status);

        // Read the whole body first so transport and decode failures stay distinct
        let body = response.bytes()?;

        // The API reports INVALID_REQUEST and friends in the JSON body, sometimes
        // alongside a 4xx. Only an undecodable error response is an HTTP failure.
        match serde_json::from_slice::<GeocodeResult>(&body) {
            Ok(result) => Ok(result),
            Err(_) if !status.is_success() => Err(GeocodeError::HttpStatus(status)),
            Err(e) => Err(GeocodeError::Decode(e)),
        }
    }
}

fn redact_key(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "key") {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

//! Reverse geocoding of GPS fixes to place labels
//!
//! Talks to a Nominatim-compatible `reverse` endpoint. Each lookup carries a
//! request-level timeout and is never retried; a failed or malformed
//! response degrades that fix to "unresolved".

use crate::location::exif::GpsFix;
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Capability: resolve a GPS fix to a place label.
pub trait Geocoder {
    fn reverse(&self, fix: &GpsFix) -> Option<String>;
}

/// Address object of a Nominatim reverse-geocoding response
#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<Address>,
}

/// Build a label from an address: settlement first (city, town, village, or
/// municipality), then state if distinct from the settlement, country only
/// when nothing finer resolved.
fn label_from_address(address: &Address) -> Option<String> {
    let settlement = address
        .city
        .as_deref()
        .or(address.town.as_deref())
        .or(address.village.as_deref())
        .or(address.municipality.as_deref());

    let mut parts: Vec<&str> = Vec::new();
    if let Some(settlement) = settlement {
        parts.push(settlement);
    }
    if let Some(state) = address.state.as_deref() {
        if Some(state) != settlement {
            parts.push(state);
        }
    }
    if parts.is_empty() {
        if let Some(country) = address.country.as_deref() {
            parts.push(country);
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("_"))
    }
}

/// HTTP reverse geocoder against a Nominatim-compatible endpoint
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Build a geocoder with a per-request timeout.
    ///
    /// Nominatim's usage policy requires an identifying User-Agent.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sd-import/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn reverse(&self, fix: &GpsFix) -> Option<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("lat", fix.latitude.to_string()),
                ("lon", fix.longitude.to_string()),
                ("zoom", "10".to_string()),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<ReverseResponse>());

        match response {
            Ok(body) => body.address.as_ref().and_then(label_from_address),
            Err(e) => {
                debug!(
                    "Reverse geocoding failed for {:.4},{:.4}: {}",
                    fix.latitude, fix.longitude, e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(json: &str) -> Address {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_label_prefers_city() {
        let addr = address(r#"{"city": "Seattle", "state": "Washington", "country": "United States"}"#);
        assert_eq!(label_from_address(&addr).unwrap(), "Seattle_Washington");
    }

    #[test]
    fn test_label_falls_through_settlement_kinds() {
        let addr = address(r#"{"village": "Hallstatt", "country": "Austria"}"#);
        assert_eq!(label_from_address(&addr).unwrap(), "Hallstatt");
    }

    #[test]
    fn test_label_skips_state_equal_to_settlement() {
        // City-states report the same name twice
        let addr = address(r#"{"city": "Berlin", "state": "Berlin", "country": "Germany"}"#);
        assert_eq!(label_from_address(&addr).unwrap(), "Berlin");
    }

    #[test]
    fn test_label_country_only_when_nothing_finer() {
        let addr = address(r#"{"country": "Iceland"}"#);
        assert_eq!(label_from_address(&addr).unwrap(), "Iceland");
    }

    #[test]
    fn test_label_empty_address_is_none() {
        let addr = address("{}");
        assert!(label_from_address(&addr).is_none());
    }
}

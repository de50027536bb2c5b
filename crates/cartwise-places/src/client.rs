//! HTTP client for a Google-Places-style nearby search endpoint.
//!
//! Wraps `reqwest` with the request/response shapes of the `searchNearby`
//! endpoint: circle-restricted POST body, API key and field-mask headers,
//! cursor pagination via `pageToken` / `nextPageToken`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{NearbyPage, NearbyQuery, RawPlace};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

const FIELD_MASK: &str =
    "places.id,places.displayName,places.location,nextPageToken";

/// A paginated nearby-search source: one page of places per call.
///
/// The resolver is generic over this trait so its pagination, dedup, and
/// ranking logic can be exercised with an in-memory stub.
pub trait NearbySearch {
    fn search_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<NearbyPage, PlacesError>> + Send;
}

/// Client for the Places `searchNearby` endpoint.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchNearbyRequest<'a> {
    included_types: &'a [String],
    max_result_count: u32,
    rank_preference: &'static str,
    location_restriction: LocationRestriction,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<&'a str>,
}

#[derive(Serialize)]
struct LocationRestriction {
    circle: Circle,
}

#[derive(Serialize)]
struct Circle {
    center: LatLng,
    radius: f64,
}

#[derive(Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNearbyResponse {
    #[serde(default)]
    places: Vec<ApiPlace>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlace {
    id: Option<String>,
    display_name: Option<DisplayName>,
    location: Option<ApiLocation>,
}

#[derive(Deserialize)]
struct DisplayName {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiLocation {
    latitude: f64,
    longitude: f64,
}

impl GooglePlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, max_retries, backoff_base_ms, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("cartwise/0.1 (nearby-places)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    async fn fetch_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> Result<NearbyPage, PlacesError> {
        let url = format!("{}/v1/places:searchNearby", self.base_url);
        let body = SearchNearbyRequest {
            included_types: &query.place_types,
            max_result_count: 20,
            rank_preference: "DISTANCE",
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: LatLng {
                        latitude: query.lat,
                        longitude: query.lng,
                    },
                    radius: f64::from(query.radius_m),
                },
            },
            page_token,
        };

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Surface 5xx as retriable HTTP errors, everything else as a
            // terminal API error with the response text attached.
            if status.is_server_error() {
                if let Err(e) = response.error_for_status() {
                    return Err(PlacesError::Http(e));
                }
                return Err(PlacesError::Api(format!("status {status}")));
            }
            let text = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api(format!("status {status}: {text}")));
        }

        let raw = response.text().await?;
        let parsed: SearchNearbyResponse =
            serde_json::from_str(&raw).map_err(|e| PlacesError::Deserialize {
                context: "searchNearby response".to_owned(),
                source: e,
            })?;

        let places = parsed
            .places
            .into_iter()
            .filter_map(|p| {
                let id = p.id?;
                let name = p.display_name.and_then(|d| d.text)?;
                let location = p.location?;
                Some(RawPlace {
                    id,
                    name,
                    lat: location.latitude,
                    lng: location.longitude,
                })
            })
            .collect();

        Ok(NearbyPage {
            places,
            next_page_token: parsed.next_page_token,
        })
    }
}

impl NearbySearch for GooglePlacesClient {
    /// Fetches one page of nearby places, retrying transient failures.
    async fn search_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> Result<NearbyPage, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_page(query, page_token)
        })
        .await
    }
}

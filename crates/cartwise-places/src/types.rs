//! Domain types for nearby-place resolution.

use serde::{Deserialize, Serialize};

/// A physical store location returned by the nearby search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Provider-assigned place ID; unique, used for deduplication.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Great-circle distance from the query point, truncated to whole meters.
    pub distance_m: u32,
}

/// Parameters for one nearby-place resolution.
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: u32,
    /// Place type filters forwarded to the search source (e.g. `"supermarket"`).
    pub place_types: Vec<String>,
    /// Stop paging once this many distinct places are collected.
    pub min_unique: usize,
    /// Hard cap on pages fetched per resolution.
    pub max_pages: u32,
    /// Keep at most this many places per brand key; `0` disables the cap.
    pub max_per_brand: usize,
}

impl Default for NearbyQuery {
    fn default() -> Self {
        Self {
            lat: 0.0,
            lng: 0.0,
            radius_m: 2000,
            place_types: vec!["supermarket".to_string()],
            min_unique: 20,
            max_pages: 5,
            max_per_brand: 1,
        }
    }
}

/// One page of nearby-search results.
#[derive(Debug, Clone)]
pub struct NearbyPage {
    pub places: Vec<RawPlace>,
    pub next_page_token: Option<String>,
}

/// A place as reported by the search source, before distance computation.
#[derive(Debug, Clone)]
pub struct RawPlace {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

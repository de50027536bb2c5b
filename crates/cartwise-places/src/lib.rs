//! Nearby-place resolution against a paginated places API.
//!
//! The resolver pages through a nearby-search source, deduplicates results
//! by place identifier, ranks them by great-circle distance from the query
//! point, and optionally caps how many places of the same brand survive.

mod brand;
mod client;
mod error;
mod geo;
mod resolver;
mod retry;
mod types;

pub use brand::brand_key;
pub use client::{GooglePlacesClient, NearbySearch};
pub use error::PlacesError;
pub use geo::haversine_m;
pub use resolver::resolve;
pub use types::{NearbyPage, NearbyQuery, Place, RawPlace};

//! Grocery price comparison across stores, backed by similarity search.
//!
//! A free-text product query is matched against a vector collection of
//! store catalog entries; surviving candidates are grouped by store and
//! reduced to a per-store representative price, from which cheapest-store
//! selection and percentage differences follow. Shopping lists aggregate
//! one comparison per item into per-store totals with a coverage-filtered
//! best-store recommendation.

mod compare;
mod embeddings;
mod error;
mod recommendation;
mod search;
mod types;
mod vector_store;

pub use compare::PriceComparer;
pub use embeddings::OpenAiEmbedder;
pub use error::PricingError;
pub use search::{ProductSearch, QdrantProductSearch};
pub use types::{BestStore, GroceryItem, PriceComparison, ShoppingListResult};
pub use vector_store::QdrantClient;

//! Domain types for price comparison.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A candidate product match for one query, as returned by similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Catalog entry text (product name).
    pub name: String,
    /// Store identifier the entry came from.
    pub store: String,
    /// Current price; always strictly positive after mapping.
    pub price: f64,
    /// Pre-discount price, when the catalog carries one.
    pub price_original: Option<f64>,
    pub amount: String,
    pub unit: String,
    pub description: String,
    pub category: String,
    /// Similarity score in `[0, 1]`.
    pub similarity_score: f64,
}

/// Result of comparing one query's prices across stores.
///
/// Store maps are `BTreeMap`s so iteration, and therefore every tie-break
/// over stores, is lexicographic by store name.
#[derive(Debug, Clone, Serialize)]
pub struct PriceComparison {
    pub query: String,
    pub cheapest_store: String,
    pub cheapest_price: f64,
    /// Surviving candidates per store, in retrieval order.
    pub items_by_store: BTreeMap<String, Vec<GroceryItem>>,
    /// Percentage difference of each store's representative price from the
    /// cheapest, rounded to 2 decimals. The cheapest store maps to `0.0`.
    pub price_differences: BTreeMap<String, f64>,
    pub recommendation: String,
}

/// The winning store for a shopping list.
#[derive(Debug, Clone, Serialize)]
pub struct BestStore {
    pub store: String,
    pub total: f64,
    pub items_covered: usize,
}

/// Aggregate result of comparing a multi-item shopping list.
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingListResult {
    /// One comparison per query that produced candidates, in request order.
    pub comparisons: Vec<PriceComparison>,
    /// Number of items requested (including queries with no matches).
    pub requested_items: usize,
    /// Sum of representative prices per store, over the queries it covers.
    pub total_by_store: BTreeMap<String, f64>,
    /// How many of the requested items each store covers.
    pub coverage_by_store: BTreeMap<String, usize>,
    /// `None` when no store covers enough of the list.
    pub best_store: Option<BestStore>,
    pub recommendation: String,
}

//! Store grouping, cheapest-store selection, and shopping-list aggregation.

use std::collections::BTreeMap;

use crate::error::PricingError;
use crate::recommendation;
use crate::search::ProductSearch;
use crate::types::{BestStore, GroceryItem, PriceComparison, ShoppingListResult};

/// Fraction of a shopping list a store must cover to qualify as "valid"
/// for the best-store recommendation. Applied as a literal float
/// comparison: for a 3-item list a store needs `count >= 2.1`, i.e. all 3.
const COVERAGE_THRESHOLD: f64 = 0.7;

/// Compares grocery prices across stores using similarity search.
pub struct PriceComparer<S> {
    search: S,
    price_threshold_percent: f64,
    min_similarity: f64,
}

impl<S: ProductSearch> PriceComparer<S> {
    #[must_use]
    pub fn new(search: S, price_threshold_percent: f64, min_similarity: f64) -> Self {
        Self {
            search,
            price_threshold_percent,
            min_similarity,
        }
    }

    /// Compare prices for one product query across stores.
    ///
    /// Returns `Ok(None)` when no candidate scores at or above the
    /// similarity floor, a normal outcome for queries the catalog cannot
    /// answer, not an error.
    ///
    /// # Errors
    ///
    /// Propagates [`PricingError`] from the search collaborator.
    pub async fn compare(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Option<PriceComparison>, PricingError> {
        let items = self.search.search(query, top_k).await?;
        Ok(self.compare_items(query, items))
    }

    /// Compare prices for a whole shopping list.
    ///
    /// Each query is compared independently; queries with no surviving
    /// candidates are omitted from the aggregate rather than failing it.
    ///
    /// # Errors
    ///
    /// Propagates [`PricingError`] from the search collaborator.
    pub async fn compare_list(
        &self,
        queries: &[String],
        top_k_per_item: usize,
    ) -> Result<ShoppingListResult, PricingError> {
        let mut comparisons = Vec::with_capacity(queries.len());
        for query in queries {
            if let Some(comparison) = self.compare(query, top_k_per_item).await? {
                comparisons.push(comparison);
            } else {
                tracing::debug!(query, "no candidates for list item, omitting");
            }
        }
        Ok(aggregate_list(comparisons, queries.len()))
    }

    /// Pure aggregation half of [`compare`](Self::compare), split out so it
    /// can be tested on in-memory candidates.
    fn compare_items(&self, query: &str, items: Vec<GroceryItem>) -> Option<PriceComparison> {
        let surviving: Vec<GroceryItem> = items
            .into_iter()
            .filter(|i| i.similarity_score >= self.min_similarity)
            .collect();
        if surviving.is_empty() {
            return None;
        }

        let mut items_by_store: BTreeMap<String, Vec<GroceryItem>> = BTreeMap::new();
        for item in surviving {
            items_by_store.entry(item.store.clone()).or_default().push(item);
        }

        let store_prices = representative_prices(&items_by_store);

        // Minimum price wins; on ties the BTreeMap order makes the
        // lexicographically first store the cheapest.
        let (cheapest_store, cheapest_price) = store_prices
            .iter()
            .fold(None::<(&String, f64)>, |acc, (store, price)| match acc {
                Some((_, best)) if best <= *price => acc,
                _ => Some((store, *price)),
            })
            .map(|(s, p)| (s.clone(), p))?;

        let price_differences: BTreeMap<String, f64> = store_prices
            .iter()
            .map(|(store, price)| {
                let diff = if cheapest_price > 0.0 {
                    round2(((price - cheapest_price) / cheapest_price) * 100.0)
                } else {
                    0.0
                };
                (store.clone(), diff)
            })
            .collect();

        let recommendation = recommendation::single_item(
            query,
            &cheapest_store,
            cheapest_price,
            &store_prices,
            &price_differences,
            self.price_threshold_percent,
        );

        Some(PriceComparison {
            query: query.to_owned(),
            cheapest_store,
            cheapest_price,
            items_by_store,
            price_differences,
            recommendation,
        })
    }
}

/// Per-store representative price: the minimum price among that store's
/// surviving candidates.
fn representative_prices(
    items_by_store: &BTreeMap<String, Vec<GroceryItem>>,
) -> BTreeMap<String, f64> {
    items_by_store
        .iter()
        .filter_map(|(store, items)| {
            items
                .iter()
                .map(|i| i.price)
                .fold(None::<f64>, |acc, p| {
                    Some(acc.map_or(p, |a| a.min(p)))
                })
                .map(|min| (store.clone(), min))
        })
        .collect()
}

/// Aggregate independent per-item comparisons into per-store totals and a
/// coverage-filtered best-store selection.
fn aggregate_list(comparisons: Vec<PriceComparison>, requested_items: usize) -> ShoppingListResult {
    let mut total_by_store: BTreeMap<String, f64> = BTreeMap::new();
    let mut coverage_by_store: BTreeMap<String, usize> = BTreeMap::new();

    for comparison in &comparisons {
        for (store, price) in representative_prices(&comparison.items_by_store) {
            *total_by_store.entry(store.clone()).or_insert(0.0) += price;
            *coverage_by_store.entry(store).or_insert(0) += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let required = requested_items as f64 * COVERAGE_THRESHOLD;

    // Minimum total among valid stores; strict `<` keeps the
    // lexicographically first store on ties.
    #[allow(clippy::cast_precision_loss)]
    let best_store = total_by_store
        .iter()
        .filter(|(store, _)| {
            coverage_by_store.get(*store).copied().unwrap_or(0) as f64 >= required
        })
        .fold(None::<(&String, f64)>, |acc, (store, total)| match acc {
            Some((_, best)) if best <= *total => acc,
            _ => Some((store, *total)),
        })
        .map(|(store, total)| BestStore {
            store: store.clone(),
            total: round2(total),
            items_covered: coverage_by_store.get(store).copied().unwrap_or(0),
        });

    let recommendation = recommendation::shopping_list(
        requested_items,
        &total_by_store,
        &coverage_by_store,
        best_store.as_ref(),
    );

    ShoppingListResult {
        comparisons,
        requested_items,
        total_by_store,
        coverage_by_store,
        best_store,
        recommendation,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Deterministic recommendation text. No LLM involved: templates over the
//! computed aggregates, stable for a given input.

use std::collections::BTreeMap;

use crate::types::BestStore;

/// Render the recommendation for a single-item comparison.
pub(crate) fn single_item(
    query: &str,
    cheapest_store: &str,
    cheapest_price: f64,
    store_prices: &BTreeMap<String, f64>,
    price_differences: &BTreeMap<String, f64>,
    threshold_percent: f64,
) -> String {
    let mut lines = vec![
        format!("Price comparison for '{query}':"),
        format!("  cheapest: {cheapest_store} at \u{20ac}{cheapest_price:.2}"),
    ];

    for (store, price) in store_prices {
        if store == cheapest_store {
            continue;
        }
        let diff_percent = price_differences.get(store).copied().unwrap_or(0.0);
        let diff_amount = price - cheapest_price;
        let status = if diff_percent <= threshold_percent {
            "similar price"
        } else {
            "more expensive"
        };
        lines.push(format!(
            "  {store}: \u{20ac}{price:.2} (+\u{20ac}{diff_amount:.2}, +{diff_percent:.1}%) {status}"
        ));
    }

    let max_savings = store_prices
        .iter()
        .filter(|(store, _)| store.as_str() != cheapest_store)
        .filter(|(store, _)| {
            price_differences.get(*store).copied().unwrap_or(0.0) > threshold_percent
        })
        .map(|(_, price)| price - cheapest_price)
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        });

    match max_savings {
        Some(savings) => lines.push(format!(
            "Recommendation: buy at {cheapest_store}, save up to \u{20ac}{savings:.2}."
        )),
        None => lines.push(format!(
            "Recommendation: prices are similar (within {threshold_percent}%), any store works."
        )),
    }

    lines.join("\n")
}

/// Render the recommendation for a shopping-list comparison.
pub(crate) fn shopping_list(
    requested_items: usize,
    total_by_store: &BTreeMap<String, f64>,
    coverage_by_store: &BTreeMap<String, usize>,
    best: Option<&BestStore>,
) -> String {
    if total_by_store.is_empty() {
        return "No products found.".to_owned();
    }

    let mut lines = vec![format!("Shopping list comparison ({requested_items} items):")];

    for (store, total) in total_by_store {
        let covered = coverage_by_store.get(store).copied().unwrap_or(0);
        let note = match best {
            Some(b) if b.store == *store => " best",
            _ if covered < requested_items => " (incomplete)",
            _ => "",
        };
        lines.push(format!(
            "  {store}: \u{20ac}{total:.2} [{covered}/{requested_items} items]{note}"
        ));
    }

    match best {
        Some(b) => lines.push(format!(
            "Best store: {}, total \u{20ac}{:.2} ({}/{} items).",
            b.store, b.total, b.items_covered, requested_items
        )),
        None => lines.push("No store covers enough of the list.".to_owned()),
    }

    lines.join("\n")
}

//! Nearby-place resolution: pagination, dedup, ranking, brand capping.

use std::collections::HashSet;

use crate::brand::brand_key;
use crate::client::NearbySearch;
use crate::error::PlacesError;
use crate::geo::haversine_m;
use crate::types::{NearbyQuery, Place};

/// Resolve nearby places for a coordinate and radius.
///
/// Pages through `source` until `query.min_unique` distinct places are
/// collected or `query.max_pages` pages have been fetched (or the source
/// runs out of pages). Places are deduplicated strictly by identifier:
/// a place repeated across pages counts once, keeping its first-seen
/// record. Results are sorted by ascending distance from the query point
/// (ties keep first-seen order) and then brand-capped.
///
/// Under-filling is not an error: a source that returns fewer than
/// `min_unique` places simply yields a shorter list.
///
/// # Errors
///
/// Returns the source's [`PlacesError`] as-is; a failed page fetch aborts
/// the whole resolution with no partial result.
pub async fn resolve<S: NearbySearch>(
    source: &S,
    query: &NearbyQuery,
) -> Result<Vec<Place>, PlacesError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut places: Vec<Place> = Vec::new();
    let mut page_token: Option<String> = None;

    for page_no in 0..query.max_pages {
        let page = source.search_page(query, page_token.as_deref()).await?;

        for raw in page.places {
            if !seen.insert(raw.id.clone()) {
                continue;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let distance_m =
                haversine_m(query.lat, query.lng, raw.lat, raw.lng).max(0.0) as u32;
            places.push(Place {
                id: raw.id,
                name: raw.name,
                lat: raw.lat,
                lng: raw.lng,
                distance_m,
            });
        }

        tracing::debug!(
            page = page_no + 1,
            unique = places.len(),
            has_next = page.next_page_token.is_some(),
            "nearby search page processed"
        );

        if places.len() >= query.min_unique {
            break;
        }
        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    places.sort_by_key(|p| p.distance_m);

    Ok(cap_per_brand(places, query.max_per_brand))
}

/// Walk a distance-sorted place list and keep at most `max_per_brand`
/// entries per derived brand key. A cap of `0` disables capping entirely,
/// which is observably different from a cap of 1.
fn cap_per_brand(places: Vec<Place>, max_per_brand: usize) -> Vec<Place> {
    if max_per_brand == 0 {
        return places;
    }

    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    places
        .into_iter()
        .filter(|p| {
            let count = counts.entry(brand_key(&p.name)).or_insert(0);
            *count += 1;
            *count <= max_per_brand
        })
        .collect()
}

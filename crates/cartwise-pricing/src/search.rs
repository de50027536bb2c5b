//! Product similarity search: trait seam plus the Qdrant-backed implementation.

use crate::embeddings::OpenAiEmbedder;
use crate::error::PricingError;
use crate::types::GroceryItem;
use crate::vector_store::{QdrantClient, ScoredPoint};

/// A source of candidate product matches for a free-text query.
///
/// The comparator is generic over this trait so its aggregation logic can
/// be exercised with in-memory fixtures.
pub trait ProductSearch {
    fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<GroceryItem>, PricingError>> + Send;
}

/// Similarity search over a Qdrant grocery collection: embed the query,
/// run a payload-carrying vector query, and map hits to [`GroceryItem`]s.
pub struct QdrantProductSearch {
    embedder: OpenAiEmbedder,
    qdrant: QdrantClient,
}

impl QdrantProductSearch {
    #[must_use]
    pub fn new(embedder: OpenAiEmbedder, qdrant: QdrantClient) -> Self {
        Self { embedder, qdrant }
    }
}

impl ProductSearch for QdrantProductSearch {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<GroceryItem>, PricingError> {
        let vector = self.embedder.embed(query).await?;
        let points = self.qdrant.query(vector, top_k).await?;

        let items: Vec<GroceryItem> = points
            .iter()
            .filter_map(item_from_point)
            .collect();

        tracing::debug!(
            query,
            hits = points.len(),
            mapped = items.len(),
            "similarity search completed"
        );

        Ok(items)
    }
}

/// Map one scored point's payload to a [`GroceryItem`].
///
/// Candidates with a missing, unparseable, or non-positive price are
/// dropped with a warning: a zero price would poison cheapest-store
/// selection and the percentage math downstream, so it is treated as
/// invalid catalog data rather than silently defaulted.
fn item_from_point(point: &ScoredPoint) -> Option<GroceryItem> {
    let name = payload_str(point, "text").unwrap_or_default();

    let Some(price) = payload_f64(point, "price").filter(|p| *p > 0.0) else {
        tracing::warn!(
            name,
            raw = ?point.payload.get("price"),
            "candidate skipped: missing or invalid price"
        );
        return None;
    };

    Some(GroceryItem {
        name,
        store: payload_str(point, "source").unwrap_or_else(|| "unknown".to_owned()),
        price,
        price_original: payload_f64(point, "price_original").filter(|p| *p > 0.0),
        amount: payload_str(point, "amount").unwrap_or_default(),
        unit: payload_str(point, "unit").unwrap_or_default(),
        description: payload_str(point, "description").unwrap_or_default(),
        category: payload_str(point, "category").unwrap_or_default(),
        similarity_score: point.score,
    })
}

fn payload_str(point: &ScoredPoint, key: &str) -> Option<String> {
    point
        .payload
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}

/// Numeric payload fields arrive as numbers or numeric strings depending on
/// which ingestion script wrote them; accept both.
fn payload_f64(point: &ScoredPoint, key: &str) -> Option<f64> {
    point.payload.get(key).and_then(|v| {
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(score: f64, payload: serde_json::Value) -> ScoredPoint {
        let map = payload
            .as_object()
            .expect("payload fixture must be an object")
            .clone()
            .into_iter()
            .collect();
        ScoredPoint {
            score,
            payload: map,
        }
    }

    #[test]
    fn maps_full_payload() {
        let p = point(
            0.91,
            serde_json::json!({
                "text": "Milk 1.5% 1L",
                "source": "lidl",
                "price": 0.89,
                "price_original": 1.05,
                "amount": "1",
                "unit": "l",
                "description": "semi-skimmed",
                "category": "dairy"
            }),
        );
        let item = item_from_point(&p).unwrap();
        assert_eq!(item.name, "Milk 1.5% 1L");
        assert_eq!(item.store, "lidl");
        assert!((item.price - 0.89).abs() < 1e-9);
        assert_eq!(item.price_original, Some(1.05));
        assert_eq!(item.unit, "l");
        assert!((item.similarity_score - 0.91).abs() < 1e-9);
    }

    #[test]
    fn accepts_string_encoded_price() {
        let p = point(0.8, serde_json::json!({ "text": "Bread", "price": "1.29" }));
        let item = item_from_point(&p).unwrap();
        assert!((item.price - 1.29).abs() < 1e-9);
    }

    #[test]
    fn missing_store_defaults_to_unknown() {
        let p = point(0.8, serde_json::json!({ "text": "Bread", "price": 1.0 }));
        assert_eq!(item_from_point(&p).unwrap().store, "unknown");
    }

    #[test]
    fn missing_price_drops_candidate() {
        let p = point(0.8, serde_json::json!({ "text": "Bread" }));
        assert!(item_from_point(&p).is_none());
    }

    #[test]
    fn unparseable_price_drops_candidate() {
        let p = point(0.8, serde_json::json!({ "text": "Bread", "price": "two euros" }));
        assert!(item_from_point(&p).is_none());
    }

    #[test]
    fn zero_price_drops_candidate() {
        let p = point(0.8, serde_json::json!({ "text": "Bread", "price": 0.0 }));
        assert!(item_from_point(&p).is_none());
    }

    #[test]
    fn negative_price_drops_candidate() {
        let p = point(0.8, serde_json::json!({ "text": "Bread", "price": -1.2 }));
        assert!(item_from_point(&p).is_none());
    }

    #[test]
    fn zero_price_original_becomes_none() {
        let p = point(
            0.8,
            serde_json::json!({ "text": "Bread", "price": 1.0, "price_original": 0 }),
        );
        assert!(item_from_point(&p).unwrap().price_original.is_none());
    }
}

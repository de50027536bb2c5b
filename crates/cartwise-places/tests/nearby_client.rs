//! Integration tests for `GooglePlacesClient` using wiremock HTTP mocks.

use cartwise_places::{resolve, GooglePlacesClient, NearbyQuery, NearbySearch};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GooglePlacesClient {
    GooglePlacesClient::with_base_url("test-key", 30, 0, 0, base_url)
        .expect("client construction should not fail")
}

fn test_query() -> NearbyQuery {
    NearbyQuery {
        lat: 48.731_866_4,
        lng: 21.243_101_9,
        radius_m: 2000,
        place_types: vec!["supermarket".to_owned()],
        min_unique: 20,
        max_pages: 5,
        max_per_brand: 0,
    }
}

fn place_json(id: &str, name: &str, lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "displayName": { "text": name },
        "location": { "latitude": lat, "longitude": lng }
    })
}

#[tokio::test]
async fn search_page_parses_places() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "places": [
            place_json("p1", "Lidl Hlavná", 48.733, 21.244),
            place_json("p2", "Tesco Expres", 48.734, 21.245),
        ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "includedTypes": ["supermarket"],
            "rankPreference": "DISTANCE"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .search_page(&test_query(), None)
        .await
        .expect("should parse page");

    assert_eq!(page.places.len(), 2);
    assert_eq!(page.places[0].id, "p1");
    assert_eq!(page.places[0].name, "Lidl Hlavná");
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn search_page_forwards_page_token_and_reads_next() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(body_partial_json(serde_json::json!({ "pageToken": "cursor-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [place_json("p3", "Billa", 48.735, 21.246)],
            "nextPageToken": "cursor-2"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .search_page(&test_query(), Some("cursor-1"))
        .await
        .expect("should parse page");

    assert_eq!(page.places.len(), 1);
    assert_eq!(page.next_page_token.as_deref(), Some("cursor-2"));
}

#[tokio::test]
async fn search_page_skips_places_missing_required_fields() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "places": [
            place_json("ok", "Kaufland", 48.733, 21.244),
            // No display name, dropped.
            { "id": "no-name", "location": { "latitude": 48.7, "longitude": 21.2 } },
            // No id, dropped.
            { "displayName": { "text": "Ghost" }, "location": { "latitude": 48.7, "longitude": 21.2 } }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.search_page(&test_query(), None).await.unwrap();
    assert_eq!(page.places.len(), 1);
    assert_eq!(page.places[0].id, "ok");
}

#[tokio::test]
async fn search_page_empty_result_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.search_page(&test_query(), None).await.unwrap();
    assert!(page.places.is_empty());
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn client_error_status_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(
            ResponseTemplate::new(403).set_body_string(r#"{"error":{"message":"denied"}}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_page(&test_query(), None).await.unwrap_err();
    assert!(matches!(err, cartwise_places::PlacesError::Api(_)));
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [place_json("p1", "Lidl", 48.733, 21.244)]
        })))
        .mount(&server)
        .await;

    // 3 retries, zero backoff base so the test stays fast.
    let client = GooglePlacesClient::with_base_url("test-key", 30, 3, 0, &server.uri()).unwrap();
    let page = client.search_page(&test_query(), None).await.unwrap();
    assert_eq!(page.places.len(), 1);
}

#[tokio::test]
async fn resolve_pages_dedups_and_sorts_end_to_end() {
    let server = MockServer::start().await;

    // Page 1: two places, one duplicated on page 2.
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(body_partial_json(serde_json::json!({ "pageToken": "t2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [
                place_json("far", "Kaufland", 48.75, 21.26),
                place_json("near", "Lidl", 48.732, 21.2435),
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [
                place_json("near", "Lidl", 48.732, 21.2435),
                place_json("mid", "Tesco", 48.74, 21.25),
            ],
            "nextPageToken": "t2"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = resolve(&client, &test_query()).await.unwrap();

    let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["near", "mid", "far"]);
}

//! Handler tests for the Countries domain
//!
//! Exercise the HTTP layer against the in-memory repository and a stubbed
//! reference API gateway: status codes, JSON shapes, and sync counts.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_countries::*;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Reference API stub with a fixed set of records
struct StubGateway {
    records: Vec<(String, String)>,
}

#[async_trait]
impl CountryGateway for StubGateway {
    async fn fetch_all(&self) -> CountryResult<Vec<CountryRecord>> {
        let records = self
            .records
            .iter()
            .map(|(code, name)| {
                serde_json::from_value(serde_json::json!({
                    "cca3": code,
                    "name": { "common": name }
                }))
                .unwrap()
            })
            .collect();
        Ok(records)
    }

    async fn fetch_by_code(&self, code: &str) -> CountryResult<Option<CountryRecord>> {
        Ok(self
            .records
            .iter()
            .find(|(c, _)| c == code)
            .map(|(code, name)| {
                serde_json::from_value(serde_json::json!({
                    "cca3": code,
                    "name": { "common": name }
                }))
                .unwrap()
            }))
    }
}

fn app(records: Vec<(&str, &str)>) -> (axum::Router, InMemoryCountryRepository) {
    let repo = InMemoryCountryRepository::new();
    let gateway = StubGateway {
        records: records
            .into_iter()
            .map(|(c, n)| (c.to_string(), n.to_string()))
            .collect(),
    };
    let service = CountryService::new(repo.clone(), gateway);
    (handlers::router(service), repo)
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_get_unknown_country_returns_404() {
    let (app, _repo) = app(vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/XXX")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["errorCode"], "NOT_FOUND");
}

#[tokio::test]
async fn test_sync_then_list_and_get() {
    let (app, _repo) = app(vec![("COL", "Colombia"), ("PER", "Peru")]);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sync")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["syncedCount"], 2);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let countries: Vec<Country> = json_body(response.into_body()).await;
    assert_eq!(countries.len(), 2);
    // Ordered by name
    assert_eq!(countries[0].code, "COL");

    // Lookup is case-insensitive thanks to upper-case normalization
    let response = app
        .oneshot(Request::builder().uri("/col").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let country: Country = json_body(response.into_body()).await;
    assert_eq!(country.name, "Colombia");
}

#[tokio::test]
async fn test_sync_skips_invalid_records() {
    let (app, _repo) = app(vec![("COL", "Colombia"), ("", "Nowhere"), ("TOOLONG", "Bad")]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sync")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["syncedCount"], 1);
}

#[tokio::test]
async fn test_sync_outdated_with_fresh_data_syncs_nothing() {
    let (app, repo) = app(vec![("COL", "Colombia")]);

    repo.upsert(Country::new("COL", "Colombia").unwrap())
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sync/outdated?daysOld=30")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["syncedCount"], 0);
}

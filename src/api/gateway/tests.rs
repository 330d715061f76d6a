//! Tests for the reqwest dashboard gateway.

use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ApiSettings, HttpDashboardGateway};
use crate::api::error::DashboardError;
use crate::api::gateway::DashboardGateway;
use crate::api::models::{CrawlStatus, CrawlerAction, Nullable};
use crate::api::query::ReviewQuery;

fn settings_for(server: &MockServer) -> ApiSettings {
    ApiSettings::parse(&format!("{}/api", server.uri()), Duration::from_secs(5))
        .expect("mock server URI should parse")
}

fn gateway_for(server: &MockServer) -> HttpDashboardGateway {
    HttpDashboardGateway::new(settings_for(server)).expect("gateway should build")
}

#[rstest]
#[case::trailing_slash("http://localhost:8081/api/")]
#[case::no_trailing_slash("http://localhost:8081/api")]
fn endpoint_joins_paths_under_base(#[case] base: &str) {
    let settings = ApiSettings::parse(base, Duration::from_secs(1)).expect("base should parse");
    let url = settings
        .endpoint("crawler/status")
        .expect("endpoint should build");

    assert_eq!(url.as_str(), "http://localhost:8081/api/crawler/status");
}

#[test]
fn reviews_url_encodes_query_in_backend_order() {
    let settings = ApiSettings::parse("http://localhost:8081/api", Duration::from_secs(1))
        .expect("base should parse");
    let query = ReviewQuery::new()
        .with_topic("AI")
        .with_search("transformer")
        .with_page(2);

    let url = settings.reviews_url(&query).expect("URL should build");

    assert_eq!(
        url.as_str(),
        "http://localhost:8081/api/reviews?page=1&size=10&topic=AI&search=transformer"
    );
}

#[rstest]
#[case::not_a_url("not a url")]
#[case::wrong_scheme("ftp://localhost/api")]
fn parse_rejects_unusable_base_urls(#[case] base: &str) {
    let result = ApiSettings::parse(base, Duration::from_secs(1));
    assert!(
        matches!(result, Err(DashboardError::Configuration { .. })),
        "expected configuration error, got {result:?}"
    );
}

#[tokio::test]
async fn crawler_status_decodes_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/crawler/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": true,
            "totalProcessed": 42,
            "newReviews": [{"title": "A", "crawlStatus": "COMPLETED"}],
            "crawlingSpeed": 1.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = gateway_for(&server)
        .crawler_status()
        .await
        .expect("status request should succeed");

    assert_eq!(update.running, Some(true));
    assert_eq!(update.total_processed, Nullable::Value(42));
    let reviews = update.new_reviews.unwrap_or_default();
    assert_eq!(
        reviews.first().map(|review| review.crawl_status.clone()),
        Some(CrawlStatus::Completed)
    );
}

#[rstest]
#[case::start(CrawlerAction::Start, "/api/crawler/start")]
#[case::stop(CrawlerAction::Stop, "/api/crawler/stop")]
#[tokio::test]
async fn control_crawler_posts_to_action_endpoint(
    #[case] action: CrawlerAction,
    #[case] endpoint: &str,
) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": action == CrawlerAction::Start
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = gateway_for(&server)
        .control_crawler(action)
        .await
        .expect("control request should succeed");

    assert_eq!(update.running, Some(action == CrawlerAction::Start));
}

#[tokio::test]
async fn list_reviews_sends_filters_and_decodes_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reviews"))
        .and(query_param("page", "1"))
        .and(query_param("size", "10"))
        .and(query_param("topic", "AI"))
        .and(query_param("search", "transformer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"id": 1, "title": "Attention"}],
            "totalPages": 3,
            "totalElements": 21
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ReviewQuery::new()
        .with_topic("AI")
        .with_search("transformer")
        .with_page(2);
    let page = gateway_for(&server)
        .list_reviews(&query)
        .await
        .expect("listing should succeed");

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_elements, Some(21));
    assert_eq!(page.content.len(), 1);
}

#[tokio::test]
async fn retry_failed_tolerates_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reviews/retry-failed"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway_for(&server)
        .retry_failed()
        .await
        .expect("retry should succeed");

    assert!(outcome.retried_count.is_none());
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reviews/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal Server Error"
        })))
        .mount(&server)
        .await;

    let error = gateway_for(&server)
        .review_stats()
        .await
        .expect_err("500 should fail");

    assert_eq!(
        error,
        DashboardError::Api {
            status: 500,
            message: "review stats failed: Internal Server Error".to_owned(),
        }
    );
}

#[tokio::test]
async fn malformed_json_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reviews/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = gateway_for(&server)
        .list_topics()
        .await
        .expect_err("garbage body should fail");

    assert!(matches!(error, DashboardError::Decode { .. }), "got {error:?}");
}

#[tokio::test]
async fn unreachable_backend_maps_to_network_error() {
    let settings = ApiSettings::parse("http://127.0.0.1:9/api", Duration::from_millis(500))
        .expect("base should parse");
    let gateway = HttpDashboardGateway::new(settings).expect("gateway should build");

    let error = gateway
        .crawler_status()
        .await
        .expect_err("closed port should fail");

    assert!(error.is_transport(), "expected network error, got {error:?}");
}

//! Integration tests for `DashboardClient` using wiremock HTTP mocks.
//!
//! Each test stands up a local server that plays both the API base and the
//! dashboard origin, then checks how one source's response is classified.

use folio_client::{DashboardClient, Endpoint, FailureKind, SourceError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DashboardClient {
    DashboardClient::with_base_urls(base_url, base_url, 5)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_returns_body_when_success_flag_is_true() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics/social-media-overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "overview": { "totalReach": 100, "totalPosts": 5 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let overview = client
        .fetch_social_overview()
        .await
        .expect("overview should parse");

    assert_eq!(overview.total_reach, Some(100.0));
    assert_eq!(overview.total_posts, Some(5.0));
}

#[tokio::test]
async fn session_cookie_is_sent_with_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/portfolio-metrics"))
        .and(header("cookie", "sid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "totalReach": 50, "engagementRate": 3.2, "profileViews": 10 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri())
        .with_session_cookie("sid=abc123")
        .expect("cookie should be a valid header");
    let metrics = client
        .fetch_portfolio_metrics()
        .await
        .expect("metrics should parse");

    assert_eq!(metrics.total_reach, Some(50.0));
    assert_eq!(metrics.engagement_rate, Some(3.2));
    assert_eq!(metrics.profile_views, Some(10.0));
    assert!(metrics.social_media.is_none());
}

#[tokio::test]
async fn metrics_nested_social_media_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/portfolio-metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "totalReach": 10,
                "socialMedia": { "totalReach": 7, "totalPosts": null }
            }
        })))
        .mount(&server)
        .await;

    let metrics = test_client(&server.uri())
        .fetch_portfolio_metrics()
        .await
        .expect("metrics should parse");
    let social = metrics.social_media.expect("socialMedia should be present");

    assert_eq!(social.total_reach, Some(7.0));
    assert_eq!(social.total_posts, None);
    assert_eq!(metrics.engagement_rate, None);
}

#[tokio::test]
async fn non_2xx_status_is_an_http_status_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/portfolio-metrics"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_portfolio_metrics()
        .await
        .expect_err("503 should fail");

    assert!(
        matches!(err, SourceError::HttpStatus { status: 503, .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.kind(), FailureKind::HttpStatus);
}

#[tokio::test]
async fn non_json_body_is_an_application_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics/social-media-overview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_social_overview()
        .await
        .expect_err("HTML body should fail");

    assert!(matches!(err, SourceError::Deserialize { .. }), "unexpected error: {err:?}");
    assert_eq!(err.kind(), FailureKind::Application);
}

#[tokio::test]
async fn success_false_is_an_application_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics/social-media-overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "no connected accounts"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_social_overview()
        .await
        .expect_err("success:false should fail");

    assert!(
        matches!(err, SourceError::Unsuccessful { ref reason, .. } if reason == "no connected accounts"),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.kind(), FailureKind::Application);
}

#[tokio::test]
async fn wrongly_typed_field_is_an_application_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/portfolio-metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "totalReach": "lots" }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_portfolio_metrics()
        .await
        .expect_err("string reach should fail");
    assert_eq!(err.kind(), FailureKind::Application);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    let uri = format!("http://127.0.0.1:{port}");

    let err = test_client(&uri)
        .fetch(Endpoint::PortfolioMetrics)
        .await
        .expect_err("closed port should fail");

    assert!(matches!(err, SourceError::Transport(_)), "unexpected error: {err:?}");
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn published_posts_sends_limit_and_parses_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics/published-posts"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "posts": [{
                "id": "post-1",
                "projectName": "Folio",
                "projectImage": "https://img/folio.png",
                "platforms": ["linkedin", "twitter"],
                "publishedAt": "2025-05-01T12:00:00Z",
                "results": [
                    { "platform": "linkedin", "url": "https://linkedin.com/p/1" },
                    { "platform": "twitter" }
                ]
            }]
        })))
        .mount(&server)
        .await;

    let posts = test_client(&server.uri())
        .fetch_published_posts()
        .await
        .expect("posts should parse");

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].project_name, "Folio");
    assert_eq!(posts[0].platforms, ["linkedin", "twitter"]);
    assert_eq!(posts[0].results[1].url, None);
}

#[tokio::test]
async fn published_posts_without_posts_array_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics/published-posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_published_posts()
        .await
        .expect_err("missing posts should fail");
    assert!(
        matches!(err, SourceError::MissingField { field: "posts", .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn analytics_paths_ignore_api_base_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/portfolio-metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let api_base = format!("{}/backend", server.uri());
    let client = DashboardClient::with_base_urls(&api_base, &server.uri(), 5)
        .expect("client construction should not fail");

    client
        .fetch_portfolio_metrics()
        .await
        .expect("metrics should resolve against the app origin");
}

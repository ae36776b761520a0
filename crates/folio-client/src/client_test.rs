use serde_json::json;

use super::*;

fn test_client() -> DashboardClient {
    DashboardClient::with_base_urls("http://api.local:5000", "http://app.local:5173/", 30)
        .expect("client construction should not fail")
}

#[test]
fn url_for_resolves_identity_against_api_base() {
    let client = test_client();
    assert_eq!(
        client.url_for(Endpoint::CurrentUser).as_str(),
        "http://api.local:5000/api/auth/me"
    );
}

#[test]
fn url_for_resolves_analytics_against_app_origin() {
    let client = test_client();
    assert_eq!(
        client.url_for(Endpoint::PortfolioMetrics).as_str(),
        "http://app.local:5173/api/dashboard/portfolio-metrics"
    );
    assert_eq!(
        client
            .url_for(Endpoint::PublishedPosts { limit: 10 })
            .as_str(),
        "http://app.local:5173/api/analytics/published-posts?limit=10"
    );
}

#[test]
fn url_for_keeps_base_path_prefix() {
    let client = DashboardClient::with_base_urls("https://example.com/backend", "https://example.com", 30)
        .expect("client construction should not fail");
    assert_eq!(
        client.url_for(Endpoint::Projects).as_str(),
        "https://example.com/backend/api/projects"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = DashboardClient::with_base_urls("not a url", "http://app.local", 30);
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
}

#[test]
fn session_cookie_with_newline_is_rejected() {
    let result = test_client().with_session_cookie("sid=abc\nx");
    assert!(matches!(result, Err(ClientError::InvalidSessionCookie)));
}

#[test]
fn truthiness_follows_loose_rules() {
    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!(1)));
    assert!(is_truthy(&json!("ok")));
    assert!(is_truthy(&json!({})));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!("")));
    assert!(!is_truthy(&json!(null)));
}

#[test]
fn check_success_requires_flag_where_contracted() {
    let body = json!({ "overview": {} });
    let err = DashboardClient::check_success(Endpoint::SocialMediaOverview, &body).unwrap_err();
    assert!(matches!(err, SourceError::Unsuccessful { .. }));
}

#[test]
fn check_success_tolerates_missing_flag_for_metrics() {
    let body = json!({ "data": { "totalReach": 1 } });
    assert!(DashboardClient::check_success(Endpoint::PortfolioMetrics, &body).is_ok());
}

#[test]
fn check_success_rejects_false_flag_for_metrics() {
    let body = json!({ "success": false, "message": "metrics unavailable" });
    let err = DashboardClient::check_success(Endpoint::PortfolioMetrics, &body).unwrap_err();
    assert!(
        matches!(err, SourceError::Unsuccessful { ref reason, .. } if reason == "metrics unavailable"),
        "unexpected error: {err:?}"
    );
}

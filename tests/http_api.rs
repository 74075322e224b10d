//! End-to-end tests of the HTTP routes with the Feddit backend mocked by
//! wiremock and the router driven through `oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use feddit_sentiment::config::AppConfig;
use feddit_sentiment::feddit::FedditClient;
use feddit_sentiment::web::{create_router, state::AppState};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_app(mock_server: &MockServer, timeout_secs: u64) -> Router {
    let mut config = AppConfig::default();
    config.upstream.host = mock_server.uri();
    config.upstream.timeout_secs = timeout_secs;
    let client = FedditClient::new(&config.upstream).unwrap();
    create_router(AppState::new(client, config))
}

async fn mount_subfeddits(mock_server: &MockServer, count: usize) {
    let subfeddits: Vec<Value> = (1..=count)
        .map(|i| json!({"id": i, "username": format!("admin_{}", i), "title": format!("Dummy Topic {}", i)}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v1/subfeddits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 10,
            "skip": 0,
            "subfeddits": subfeddits,
        })))
        .mount(mock_server)
        .await;
}

async fn mount_comments(mock_server: &MockServer, comments: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comments": comments })))
        .mount(mock_server)
        .await;
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn number_of_subfeddits_is_plain_integer() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;

    let (status, body) = get(make_app(&mock_server, 5), "/api/v1/number_of_subfeddits").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(3));
}

#[tokio::test]
async fn subfeddit_entries_without_ids_still_count() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/subfeddits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subfeddits": [{"title": "a"}, {"title": "b"}]
        })))
        .mount(&mock_server)
        .await;

    let (status, body) = get(make_app(&mock_server, 5), "/api/v1/number_of_subfeddits").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(2));
}

#[tokio::test]
async fn sorted_comments_put_positive_first() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments"))
        .and(query_param("subfeddit_id", "1"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comments": [
                {"id": 2, "text": "I hate this", "created_at": 1700000100},
                {"id": 1, "text": "I love this", "created_at": 1700000000}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = get(
        make_app(&mock_server, 5),
        "/api/v1/subfeddit_comments?subfeddit=1&sorted_results=true&comments_limit=10",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[0]["text"], "I love this");
    assert_eq!(rows[0]["classification"], "Positive");
    assert!(rows[0]["polarity_score"].as_f64().unwrap() > 0.0);

    assert_eq!(rows[1]["id"], 2);
    assert_eq!(rows[1]["classification"], "Negative");
    assert!(rows[1]["polarity_score"].as_f64().unwrap() < 0.0);

    // Only the projected fields are exposed.
    let keys: Vec<&String> = rows[0].as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4);
    assert!(rows[0].get("created_at").is_none());
}

#[tokio::test]
async fn empty_upstream_gives_empty_list() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 2).await;
    mount_comments(&mock_server, json!([])).await;

    let (status, body) = get(make_app(&mock_server, 5), "/api/v1/subfeddit_comments?subfeddit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn negative_subfeddit_is_rejected_before_upstream() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = get(make_app(&mock_server, 5), "/api/v1/subfeddit_comments?subfeddit=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn subfeddit_equal_to_count_is_rejected() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = get(make_app(&mock_server, 5), "/api/v1/subfeddit_comments?subfeddit=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Subfeddit does not exist");
}

#[tokio::test]
async fn malformed_params_get_detail_bodies() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    let app = make_app(&mock_server, 5);

    for uri in [
        "/api/v1/subfeddit_comments",
        "/api/v1/subfeddit_comments?subfeddit=abc",
        "/api/v1/subfeddit_comments?subfeddit=1&comments_limit=-1",
        "/api/v1/subfeddit_comments?subfeddit=1&time_range=-10",
        "/api/v1/subfeddit_comments?subfeddit=1&time_range=10&start_date=2024-05-01",
        "/api/v1/subfeddit_comments?subfeddit=1&start_date=2024-05-20&end_date=2024-05-01",
        "/api/v1/subfeddit_comments?subfeddit=1&end_date=yesterday",
        "/api/v1/subfeddit_comments?subfeddit=1&subfeddit=2",
    ] {
        let (status, body) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["detail"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn zero_limit_returns_empty_without_fetching_comments() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = get(
        make_app(&mock_server, 5),
        "/api/v1/subfeddit_comments?subfeddit=1&comments_limit=0",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn time_range_keeps_recent_comments() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    let recent = Utc::now().timestamp() - 30;
    mount_comments(
        &mock_server,
        json!([
            {"id": 1, "text": "old but good", "created_at": 1_000},
            {"id": 2, "text": "fresh and great", "created_at": recent},
            {"id": 3, "text": "two hours ago", "created_at": recent - 7_200}
        ]),
    )
    .await;

    let (status, body) = get(
        make_app(&mock_server, 5),
        "/api/v1/subfeddit_comments?subfeddit=1&time_range=60",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn date_range_filters_inclusively() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    // 2024-05-01T00:00:00Z, 2024-05-03T23:59:59Z, 2024-05-04T00:00:00Z
    mount_comments(
        &mock_server,
        json!([
            {"id": 1, "text": "first", "created_at": 1_714_521_600},
            {"id": 2, "text": "last", "created_at": 1_714_780_799},
            {"id": 3, "text": "too late", "created_at": 1_714_780_800}
        ]),
    )
    .await;

    let (status, body) = get(
        make_app(&mock_server, 5),
        "/api/v1/subfeddit_comments?subfeddit=1&start_date=2024-05-01&end_date=2024-05-03",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn output_never_exceeds_limit() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    // A backend that ignores `limit`.
    let comments: Vec<Value> = (0..10)
        .map(|i| json!({"id": i, "text": "good", "created_at": 0}))
        .collect();
    mount_comments(&mock_server, Value::Array(comments)).await;

    let (status, body) = get(
        make_app(&mock_server, 5),
        "/api/v1/subfeddit_comments?subfeddit=1&comments_limit=4",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    mount_comments(
        &mock_server,
        json!([
            {"id": 1, "text": "meh", "created_at": 0},
            {"id": 2, "text": "really good", "created_at": 0},
            {"id": 3, "text": "not good", "created_at": 0},
            {"id": 4, "text": "good", "created_at": 0}
        ]),
    )
    .await;
    let app = make_app(&mock_server, 5);
    let uri = "/api/v1/subfeddit_comments?subfeddit=2&sorted_results=true";

    let (_, first) = get(app.clone(), uri).await;
    let (_, second) = get(app, uri).await;
    assert_eq!(first, second);

    let scores: Vec<f64> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["polarity_score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn upstream_error_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    mount_subfeddits(&mock_server, 3).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (status, body) = get(make_app(&mock_server, 5), "/api/v1/subfeddit_comments?subfeddit=1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["detail"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn upstream_timeout_is_gateway_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/subfeddits"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"subfeddits": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let (status, body) = get(make_app(&mock_server, 1), "/api/v1/number_of_subfeddits").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["detail"].is_string());
}

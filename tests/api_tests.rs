//! HTTP client tests against a local stub of the movie API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio_test::assert_ok;

use macflix_client::{
    error::ApiError,
    models::Identity,
    services::{ApiClient, AuthClient, CatalogClient, HttpRecommendationSource, LibraryClient,
        RecommendationSource, SaveMovieRequest},
};

/// What the stub observed about each recommendations request
#[derive(Debug, Clone, Default)]
struct RecordedRequest {
    authorization: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Clone, Default)]
struct StubState {
    recommendation_requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn recommendations(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state
        .recommendation_requests
        .lock()
        .unwrap()
        .push(RecordedRequest {
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            page: params.get("page").cloned(),
            limit: params.get("limit").cloned(),
        });

    Json(json!({
        "movies": [
            {"id": 1, "title": "The Matrix"},
            {"id": 2, "title": "Inception"}
        ],
        "total": 2,
        "page": params.get("page").cloned().unwrap_or_default(),
        "limit": params.get("limit").cloned().unwrap_or_default(),
    }))
}

fn stub_router(state: StubState) -> Router {
    Router::new()
        .route(
            "/api/movie/popular",
            get(|| async {
                Json(json!({
                    "results": [
                        {"id": 603, "title": "The Matrix", "vote_average": 8.2},
                        {"id": 27205, "title": "Inception"}
                    ],
                    "page": 1,
                    "total_pages": 4
                }))
            }),
        )
        .route(
            "/api/movie/genres",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "genres exploded") }),
        )
        .route("/recommendations", get(recommendations))
        .route(
            "/api/auth/login",
            post(|| async {
                Json(json!({
                    "user": {"id": "u1", "username": "neo"},
                    "token": "jwt-token"
                }))
            }),
        )
        .route(
            "/api/favorite",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                if headers.get("authorization").is_none() {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no token"})));
                }
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "id": "fav-1",
                        "movieId": body["movieId"],
                        "title": body["title"],
                    })),
                )
            }),
        )
        .with_state(state)
}

async fn start_stub() -> (String, StubState) {
    let state = StubState::default();
    let app = stub_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

#[tokio::test]
async fn test_popular_parses_page() {
    let (base_url, _) = start_stub().await;
    let catalog = CatalogClient::new(ApiClient::with_base_url(base_url));

    let page = tokio_test::assert_ok!(catalog.popular(1).await);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].title, "The Matrix");
    assert_eq!(page.total_pages, 4);
    assert!(page.has_next());
}

#[tokio::test]
async fn test_non_success_status_becomes_server_error() {
    let (base_url, _) = start_stub().await;
    let catalog = CatalogClient::new(ApiClient::with_base_url(base_url));

    let err = catalog.genres().await.unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("genres exploded"));
        }
        other => panic!("expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_route_becomes_server_error_not_panic() {
    let (base_url, _) = start_stub().await;
    let catalog = CatalogClient::new(ApiClient::with_base_url(base_url));

    let err = catalog.details(42).await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 404, .. }));
}

#[tokio::test]
async fn test_recommendation_fetch_sends_bearer_and_pagination() {
    let (base_url, state) = start_stub().await;
    let source = HttpRecommendationSource::new(ApiClient::with_base_url(base_url));

    let page = source
        .fetch_page(&Identity::authenticated("u1", "secret-token"), 3, 10)
        .await
        .unwrap();
    assert_eq!(page.movies.len(), 2);
    assert_eq!(page.total, 2);

    let requests = state.recommendation_requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer secret-token")
    );
    assert_eq!(requests[0].page.as_deref(), Some("3"));
    assert_eq!(requests[0].limit.as_deref(), Some("10"));
}

#[tokio::test]
async fn test_missing_credential_makes_no_http_request() {
    let (base_url, state) = start_stub().await;
    let source = HttpRecommendationSource::new(ApiClient::with_base_url(base_url));

    let identity = Identity {
        user_id: Some("u1".to_string()),
        token: None,
    };
    let err = source.fetch_page(&identity, 1, 10).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingCredential));
    assert!(state.recommendation_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_recommendation_body_is_invalid_response() {
    // A stub whose body lacks the required fields entirely.
    let app = Router::new().route(
        "/recommendations",
        get(|| async { Json(json!({"unexpected": true})) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let source = HttpRecommendationSource::new(ApiClient::with_base_url(format!("http://{}", addr)));
    let err = source
        .fetch_page(&Identity::authenticated("u1", "t1"), 1, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_login_parses_user_and_token() {
    let (base_url, _) = start_stub().await;
    let auth = AuthClient::new(ApiClient::with_base_url(base_url));

    let login = tokio_test::assert_ok!(auth.login("neo@matrix.io", "redpill").await);
    assert_eq!(login.user.username, "neo");
    assert_eq!(login.token, "jwt-token");
}

#[tokio::test]
async fn test_add_favorite_sends_bearer_and_camel_case_body() {
    let (base_url, _) = start_stub().await;
    let library = LibraryClient::new(ApiClient::with_base_url(base_url));

    let request = SaveMovieRequest {
        movie_id: "603".to_string(),
        title: "The Matrix".to_string(),
        poster_path: None,
        overview: None,
    };
    let saved = library.add_favorite("jwt-token", &request).await.unwrap();
    assert_eq!(saved.id, "fav-1");
    assert_eq!(saved.movie_id, "603");
    assert_eq!(saved.title, "The Matrix");
}

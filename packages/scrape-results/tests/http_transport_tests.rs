//! End-to-end tests for the reqwest transport against a local axum backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use scrape_results::{
    prepare_batch, BearerToken, HttpTransport, RawArticle, RawLink, SubmissionCoordinator,
    SubmissionOutcome, SubmitConfig,
};
use url::Url;

/// Authorization header and JSON body of every request the stub received.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>);

impl Captured {
    fn requests(&self) -> Vec<(Option<String>, serde_json::Value)> {
        self.0.lock().unwrap().clone()
    }
}

type StubState = (Captured, StatusCode, &'static str);

async fn record(
    State((captured, status, body)): State<StubState>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, &'static str) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.0.lock().unwrap().push((auth, payload));
    (status, body)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Start a backend answering every `POST /articles` with `status` and `body`.
async fn spawn_backend(status: StatusCode, body: &'static str) -> (Url, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route("/articles", post(record))
        .with_state((captured.clone(), status, body));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let endpoint = Url::parse(&format!("http://{addr}/articles")).unwrap();
    (endpoint, captured)
}

fn http_coordinator(endpoint: Url) -> SubmissionCoordinator<HttpTransport> {
    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    SubmissionCoordinator::new(transport, endpoint)
}

fn batch() -> scrape_results::SubmissionBatch {
    prepare_batch(
        4,
        &[
            RawArticle::new("https://example.com/one")
                .with_indexable(true)
                .with_outer_links(vec![RawLink::new("https://other.test")
                    .with_follow(true)
                    .with_status(200, "")]),
            RawArticle::new("https://example.com/two"),
        ],
    )
    .unwrap()
}

#[tokio::test]
async fn test_posts_batch_with_bearer_token() {
    init_tracing();
    let (endpoint, captured) = spawn_backend(StatusCode::OK, "").await;

    let outcome = http_coordinator(endpoint)
        .submit(batch(), &BearerToken::new("abc.def"))
        .await;

    assert_eq!(outcome, SubmissionOutcome::Success);

    let requests = captured.requests();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer abc.def"));
    assert_eq!(body["projectId"], 4);
    assert_eq!(body["articles"][0]["isIndexable"], true);
    assert_eq!(body["articles"][0]["outerLinks"][0]["status"]["code"], 200);
    assert_eq!(body["articles"][1]["articleUrl"], "https://example.com/two");
}

#[tokio::test]
async fn test_structured_rejection_over_http() {
    init_tracing();
    let (endpoint, _) =
        spawn_backend(StatusCode::BAD_REQUEST, r#"{"message": "invalid project"}"#).await;

    let outcome = http_coordinator(endpoint)
        .submit(batch(), &BearerToken::new("t"))
        .await;

    assert_eq!(
        outcome,
        SubmissionOutcome::TransportFailure {
            status_code: Some(400),
            message: "invalid project".into(),
        }
    );
}

#[tokio::test]
async fn test_server_error_with_empty_body_over_http() {
    init_tracing();
    let (endpoint, captured) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, "").await;

    let outcome = http_coordinator(endpoint)
        .submit(batch(), &BearerToken::new("t"))
        .await;

    assert_eq!(outcome.status_code(), Some(500));
    assert!(outcome.message().unwrap().contains("500"));
    assert_eq!(captured.requests().len(), 1);
}

#[tokio::test]
async fn test_redirect_is_a_rejection_not_followed() {
    init_tracing();
    // Expired sessions get bounced to a login page that answers GET with 200.
    let posts = Arc::new(AtomicUsize::new(0));
    let logins = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/articles",
            post({
                let posts = posts.clone();
                move || async move {
                    posts.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::FOUND, [(header::LOCATION, "/login")])
                }
            }),
        )
        .route(
            "/login",
            get({
                let logins = logins.clone();
                move || async move {
                    logins.fetch_add(1, Ordering::SeqCst);
                    "<html>Sign in</html>"
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let endpoint = Url::parse(&format!("http://{addr}/articles")).unwrap();
    let outcome = http_coordinator(endpoint)
        .submit(batch(), &BearerToken::new("expired"))
        .await;

    assert_eq!(
        outcome,
        SubmissionOutcome::TransportFailure {
            status_code: Some(302),
            message: "request failed with status 302".into(),
        }
    );
    assert_eq!(posts.load(Ordering::SeqCst), 1);
    assert_eq!(logins.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_backend() {
    init_tracing();
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Url::parse(&format!("http://{addr}/articles")).unwrap();
    let outcome = http_coordinator(endpoint)
        .submit(batch(), &BearerToken::new("t"))
        .await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::TransportFailure {
            status_code: None,
            ..
        }
    ));
    assert_eq!(outcome.user_message(), Some("could not reach server"));
}

#[tokio::test]
async fn test_coordinator_from_config() {
    init_tracing();
    let (endpoint, captured) = spawn_backend(StatusCode::CREATED, "").await;
    let config = SubmitConfig::new(endpoint.as_str())
        .unwrap()
        .with_timeout(Duration::from_secs(2))
        .with_default_project_id(4);

    let coordinator = SubmissionCoordinator::from_config(&config).unwrap();
    let raw = vec![RawArticle::new("https://example.com/one")];
    let outcome = coordinator
        .submit_raw(config.default_project_id.unwrap(), &raw, &BearerToken::new("t"))
        .await;

    assert!(outcome.is_success());
    assert_eq!(coordinator.endpoint(), &endpoint);
    assert_eq!(captured.requests()[0].1["projectId"], 4);
}

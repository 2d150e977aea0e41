//! Router-level tests for `/fake_work`

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use fakework_config::WorkDefaults;
use fakework_endpoint::{create_app, AppState, FILLER_CHAR};
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState::default(), false)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String, Duration) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let started = Instant::now();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    if status == StatusCode::OK {
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert!(response.headers().contains_key("x-runtime"));
    }
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let elapsed = started.elapsed();

    (status, String::from_utf8(body.to_vec()).unwrap(), elapsed)
}

fn filler_len(body: &str) -> usize {
    let filler = body.lines().nth(2).unwrap_or("");
    assert!(filler.chars().all(|c| c == FILLER_CHAR));
    filler.len()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_explicit_parameters() {
    let (status, body, elapsed) =
        get(app(), "/fake_work?cpu_ms=20&iowait_ms=30&response_chars=1234").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(
        "Mocked up response with 20ms cpu using, 30ms iowait, and roughly 1234 bytes response. \n\n"
    ));
    assert!(body.ends_with('\n'));
    assert_eq!(filler_len(&body), 1234);
    assert!(elapsed >= Duration::from_millis(50));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_defaults_match_explicit_defaults() {
    let (status, implicit, elapsed) = get(app(), "/fake_work").await;
    assert_eq!(status, StatusCode::OK);
    assert!(elapsed >= Duration::from_millis(300));

    let (_, explicit, _) =
        get(app(), "/fake_work?cpu_ms=50&iowait_ms=250&response_chars=20000").await;

    assert_eq!(implicit, explicit);
    assert_eq!(filler_len(&implicit), 20_000);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_numbers_never_error() {
    let (status, body, _) =
        get(app(), "/fake_work?cpu_ms=abc&iowait_ms=-5&response_chars=%ZZ").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "Mocked up response with 0ms cpu using, 0ms iowait, and roughly 0 bytes response. \n\n\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_response_chars() {
    let (status, body, _) = get(app(), "/fake_work?cpu_ms=0&iowait_ms=0&response_chars=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(filler_len(&body), 0);
    assert!(body.contains("roughly 0 bytes response"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_configured_cap_and_defaults() {
    let state = AppState {
        defaults: WorkDefaults {
            cpu_ms: 0,
            iowait_ms: 0,
            response_chars: 10,
        },
        max_response_chars: Some(100),
    };
    let app = create_app(state, true);

    let (_, body, _) = get(app.clone(), "/fake_work").await;
    assert_eq!(filler_len(&body), 10);

    let (_, body, _) = get(app, "/fake_work?response_chars=100000").await;
    assert_eq!(filler_len(&body), 100);
    assert!(body.contains("roughly 100 bytes response"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_route_is_not_found() {
    let (status, _, _) = get(app(), "/slow_work").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_independent() {
    let app = app();
    let started = Instant::now();

    let requests = (0..50u64).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            let uri = format!("/fake_work?cpu_ms=2&iowait_ms=100&response_chars={}", i * 37);
            let (status, body, _) = get(app, &uri).await;
            (i, status, body)
        })
    });

    for result in futures::future::join_all(requests).await {
        let (i, status, body) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(&format!("roughly {} bytes response", i * 37)));
        assert_eq!(filler_len(&body), (i * 37) as usize);
    }

    // Fifty 100ms waits run back to back would take five seconds
    assert!(started.elapsed() < Duration::from_secs(3));
}

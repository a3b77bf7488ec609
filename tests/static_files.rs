use std::fs;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use signbridge_backend::asr::interface::{RecognitionOutcome, SpeechRecognizer};
use signbridge_backend::config::Config;
use signbridge_backend::routes;
use signbridge_backend::state::AppState;

struct NoopRecognizer;

#[async_trait::async_trait]
impl SpeechRecognizer for NoopRecognizer {
    async fn recognize(&self, _audio: Vec<u8>) -> RecognitionOutcome {
        RecognitionOutcome::Unrecognized
    }
}

fn app(config: Config) -> Router {
    let state = AppState::new(config)
        .expect("app state builds")
        .with_recognizer(Arc::new(NoopRecognizer));
    Router::new().merge(routes::create_routes()).with_state(state)
}

#[tokio::test]
async fn gif_route_serves_an_existing_gif() {
    let tmp = tempfile::tempdir().unwrap();
    let payload = b"GIF89a-pretend-frames";
    fs::write(tmp.path().join("hello.gif"), payload).unwrap();

    let config = Config {
        gifs_dir: tmp.path().to_string_lossy().into_owned(),
        ..Config::default()
    };

    let response = app(config)
        .oneshot(Request::get("/gif/hello.gif").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/gif"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), payload);
}

#[tokio::test]
async fn gif_route_rejects_non_gif_suffix() {
    let response = app(Config::default())
        .oneshot(Request::get("/gif/foo.txt").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), b"File type not allowed.");
}

#[tokio::test]
async fn missing_gif_is_a_plain_404() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        gifs_dir: tmp.path().to_string_lossy().into_owned(),
        ..Config::default()
    };

    let response = app(config)
        .oneshot(Request::get("/gif/absent.gif").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn traversal_attempts_stay_confined() {
    let tmp = tempfile::tempdir().unwrap();
    let gifs = tmp.path().join("gifs");
    fs::create_dir(&gifs).unwrap();
    fs::write(tmp.path().join("secret.gif"), b"outside").unwrap();

    let config = Config {
        gifs_dir: gifs.to_string_lossy().into_owned(),
        ..Config::default()
    };

    let response = app(config)
        .oneshot(
            Request::get("/gif/..%2Fsecret.gif")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn image_route_only_serves_allowed_extensions() {
    let tmp = tempfile::tempdir().unwrap();
    let payload = b"RIFF-reference-clip";
    fs::write(tmp.path().join("a.wav"), payload).unwrap();

    let config = Config {
        letters_dir: tmp.path().to_string_lossy().into_owned(),
        ..Config::default()
    };
    let app = app(config);

    let ok = app
        .clone()
        .oneshot(Request::get("/image/a.wav").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let bytes = to_bytes(ok.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), payload);

    let rejected = app
        .oneshot(Request::get("/image/a.png").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

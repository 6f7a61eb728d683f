mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

use anseong_tour::config::ServerConfig;
use anseong_tour::server::{self, form, http, render};
use anseong_tour::TourError;

use common::{anseong_dispatcher, Echo, Flaky};

async fn call(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_endpoint_without_input_shows_banner_only() {
    let app = http::router(anseong_dispatcher(Box::new(Echo)));

    let (status, body) = call(app.clone(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, render::TITLE);

    let (status, body) = call(app, get("/?user_input=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, render::TITLE);
}

#[tokio::test]
async fn test_endpoint_renders_single_location() {
    let app = http::router(anseong_dispatcher(Box::new(Echo)));

    let (status, body) = call(
        app,
        get("/?user_input=tell%20me%20about%20%EC%84%9C%EC%9A%B4%EC%82%B0"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(render::TITLE));
    assert!(body.contains("<strong>서운산</strong>: 서운산은 아름다운 경관과 등산로로 유명한 산입니다.<br>"));
    assert_eq!(body.matches("<img ").count(), 1);
}

#[tokio::test]
async fn test_endpoint_renders_recommendations() {
    let app = http::router(anseong_dispatcher(Box::new(Echo)));

    let (_, body) = call(
        app,
        get("/?user_input=recommend%20me%20Anseong%27s%20tourist%20spots"),
    )
    .await;

    assert_eq!(body.matches("<img ").count(), 3);
    let farm = body.find("<strong>팜랜드</strong>").unwrap();
    let village = body.find("<strong>남사당놀이마을</strong>").unwrap();
    let land = body.find("<strong>안성맞춤랜드</strong>").unwrap();
    assert!(farm < village && village < land);
    assert!(!body.contains("서운산"));
}

#[tokio::test]
async fn test_endpoint_renders_generated_text() {
    let app = http::router(anseong_dispatcher(Box::new(Echo)));

    let (_, body) = call(app, get("/?user_input=hello%20%3Cthere%3E")).await;

    assert_eq!(
        body,
        format!(
            "{}hello &lt;there&gt; ... and the story goes on",
            render::TITLE
        )
    );
}

#[tokio::test]
async fn test_endpoint_generation_failure_is_not_a_crash() {
    let app = http::router(anseong_dispatcher(Box::new(Flaky { failures: 1 })));

    let (status, body) = call(app, get("/?user_input=hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("{}{}", render::TITLE, render::FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_endpoint_malformed_query_is_ignored() {
    let app = http::router(anseong_dispatcher(Box::new(Echo)));

    let (status, body) = call(app, get("/?user_input=a&user_input=b")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, render::TITLE);
}

#[tokio::test]
async fn test_form_page_renders() {
    let app = form::router(anseong_dispatcher(Box::new(Echo)));

    let (status, body) = call(app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(render::TITLE));
    assert!(body.contains(render::PROMPT_LABEL));
    assert!(body.contains(render::SUBMIT_LABEL));
    assert!(body.contains("<section id=\"answer\">\n</section>"));
}

#[tokio::test]
async fn test_form_submission_renders_location_cards() {
    let app = form::router(anseong_dispatcher(Box::new(Echo)));

    let (status, body) = call(
        app,
        post_form("user_input=%EB%82%A8%EC%82%AC%EB%8B%B9%EB%86%80%EC%9D%B4%EB%A7%88%EC%9D%84+%EC%96%B4%EB%95%8C%3F"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<figcaption>남사당놀이마을</figcaption>"));
    assert!(body.contains("<strong>남사당놀이마을</strong>: "));
    assert!(body.contains("value=\"남사당놀이마을 어때?\""));
}

#[tokio::test]
async fn test_form_empty_submission_generates() {
    let app = form::router(anseong_dispatcher(Box::new(Echo)));

    let (status, body) = call(app, post_form("user_input=")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p> ... and the story goes on</p>"));
}

#[tokio::test]
async fn test_form_without_content_type_shows_blank_page() {
    let app = form::router(anseong_dispatcher(Box::new(Echo)));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(Body::from("user_input=hi"))
        .unwrap();
    let (status, body) = call(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("story goes on"));
}

#[tokio::test]
async fn test_bind_reports_bad_host() {
    let result = anseong_tour::server::bind("no such host", 0).await;
    assert!(result.is_err());

    let listener = anseong_tour::server::bind("127.0.0.1", 0).await.unwrap();
    assert_ne!(listener.local_addr().unwrap().port(), 0);
}

fn server_config(http_port: u16, form_port: u16) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        http_port,
        form_port,
        enable_http: true,
        enable_form: true,
    }
}

async fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_serve_with_both_surfaces_off_fails() {
    let config = ServerConfig {
        enable_http: false,
        enable_form: false,
        ..server_config(0, 0)
    };

    let result = server::serve(anseong_dispatcher(Box::new(Echo)), &config).await;
    assert!(matches!(result, Err(TourError::Server(_))));
}

#[tokio::test]
async fn test_serve_skips_disabled_http_surface() {
    let held = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = ServerConfig {
        enable_http: false,
        ..server_config(held.local_addr().unwrap().port(), free_port().await)
    };

    // Still serving the form surface when the timeout hits.
    let outcome = tokio::time::timeout(
        Duration::from_millis(300),
        server::serve(anseong_dispatcher(Box::new(Echo)), &config),
    )
    .await;
    assert!(outcome.is_err());
}

#[tokio::test]
async fn test_serve_binds_enabled_form_surface() {
    let held = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = ServerConfig {
        enable_http: false,
        ..server_config(0, held.local_addr().unwrap().port())
    };

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        server::serve(anseong_dispatcher(Box::new(Echo)), &config),
    )
    .await
    .unwrap();
    assert!(matches!(result, Err(TourError::Server(_))));
}

#[tokio::test]
async fn test_serve_runs_both_surfaces() {
    let config = server_config(free_port().await, free_port().await);
    let dispatcher = anseong_dispatcher(Box::new(Echo));

    let serving = tokio::spawn(async move { server::serve(dispatcher, &config).await });
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!serving.is_finished());
    serving.abort();
}

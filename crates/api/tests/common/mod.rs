//! Shared harness for the API integration tests.
//!
//! Mirrors the router construction in `main.rs` so the tests exercise the
//! same middleware stack (CORS, request ID, timeout, tracing, panic
//! recovery) that production uses, plus request helpers and seed data.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use retina_api::auth::jwt::{generate_access_token, JwtConfig};
use retina_api::config::ServerConfig;
use retina_api::routes;
use retina_api::state::AppState;
use retina_core::types::DbId;
use retina_db::models::build::{Build, CreateBuild};
use retina_db::models::organization::CreateOrganization;
use retina_db::models::repository::{CreateRepository, OwnerRef, Repository};
use retina_db::models::screenshot::{CreateScreenshot, Screenshot};
use retina_db::models::screenshot_bucket::CreateScreenshotBucket;
use retina_db::models::screenshot_diff::CreateScreenshotDiff;
use retina_db::models::user::{CreateUser, User};
use retina_db::repositories::{
    BuildRepo, OrganizationRepo, RepositoryRepo, ScreenshotBucketRepo, ScreenshotDiffRepo,
    ScreenshotRepo, UserRepo,
};

/// Signing secret shared by the test app and [`token_for`].
const TEST_JWT_SECRET: &str = "retina-test-secret-that-is-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Mint an access token for the given user id, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        event_bus: Arc::new(retina_events::EventBus::default()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

/// GET without authentication.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with a Bearer token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a JSON body without authentication.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a JSON body with a Bearer token.
pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool, login: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            login: login.to_string(),
            name: None,
            email: None,
        },
    )
    .await
    .expect("user insert should succeed")
}

pub async fn seed_user_repository(
    pool: &PgPool,
    owner: &User,
    name: &str,
    private: bool,
) -> Repository {
    RepositoryRepo::create(
        pool,
        OwnerRef::User(owner.id),
        &CreateRepository {
            name: name.to_string(),
            private,
            baseline_branch: None,
        },
    )
    .await
    .expect("repository insert should succeed")
}

pub async fn seed_org_repository(
    pool: &PgPool,
    org_login: &str,
    name: &str,
    private: bool,
) -> (DbId, Repository) {
    let org = OrganizationRepo::create(
        pool,
        &CreateOrganization {
            login: org_login.to_string(),
            name: None,
        },
    )
    .await
    .expect("organization insert should succeed");

    let repository = RepositoryRepo::create(
        pool,
        OwnerRef::Organization(org.id),
        &CreateRepository {
            name: name.to_string(),
            private,
            baseline_branch: None,
        },
    )
    .await
    .expect("repository insert should succeed");

    (org.id, repository)
}

/// Create a bucket with the given screenshots, returning the bucket id and
/// the created screenshot rows in input order.
pub async fn seed_bucket(
    pool: &PgPool,
    repository_id: DbId,
    branch: &str,
    screenshot_names: &[&str],
) -> (DbId, Vec<Screenshot>) {
    let bucket = ScreenshotBucketRepo::create(
        pool,
        &CreateScreenshotBucket {
            name: "default".to_string(),
            commit_sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
            branch: branch.to_string(),
            repository_id,
        },
    )
    .await
    .expect("bucket insert should succeed");

    let inputs: Vec<CreateScreenshot> = screenshot_names
        .iter()
        .map(|name| CreateScreenshot {
            name: name.to_string(),
            s3_id: format!("s3/{name}"),
        })
        .collect();

    let screenshots = ScreenshotRepo::create_many(pool, bucket.id, &inputs)
        .await
        .expect("screenshot inserts should succeed");

    (bucket.id, screenshots)
}

pub async fn seed_build(pool: &PgPool, repository_id: DbId, compare_bucket_id: DbId) -> Build {
    BuildRepo::create(
        pool,
        &CreateBuild {
            repository_id,
            base_screenshot_bucket_id: None,
            compare_screenshot_bucket_id: compare_bucket_id,
        },
    )
    .await
    .expect("build insert should succeed")
}

pub async fn seed_diff(
    pool: &PgPool,
    build_id: DbId,
    base: Option<DbId>,
    compare: DbId,
    score: Option<f64>,
) {
    ScreenshotDiffRepo::create(
        pool,
        build_id,
        &CreateScreenshotDiff {
            base_screenshot_id: base,
            compare_screenshot_id: compare,
            score,
            s3_id: None,
        },
    )
    .await
    .expect("diff insert should succeed");
}

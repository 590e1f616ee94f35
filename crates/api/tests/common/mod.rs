#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use api::app::build_router;
use api::auth::password;
use api::config::{AppConfig, StorageBackend};
use api::state::AppState;
use infra::models::NewUser;
use infra::{MemStorage, Storage};

const SESSION_SECRET: &str =
    "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

pub const ADMIN_USERNAME: &str = "admin@club.test";
pub const ADMIN_PASSWORD: &str = "Secret1";

pub struct TestApp {
    pub router: Router,
    pub storage: Arc<dyn Storage>,
    /// Owns the on-disk upload directory for the test's lifetime.
    pub upload_dir: TempDir,
}

/// Builds a fully wired app over in-memory storage and a temporary upload
/// directory.
pub fn setup_app() -> TestApp {
    let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
    let upload_dir = tempfile::tempdir().expect("failed to create upload dir");
    let config = AppConfig {
        port: 0,
        backend: StorageBackend::Memory,
        session_secret: SESSION_SECRET.to_string(),
        upload_dir: upload_dir.path().to_path_buf(),
        bootstrap_admin: None,
    };
    let state = AppState::new(storage.clone(), &config).expect("failed to build state");

    TestApp {
        router: build_router(state),
        storage,
        upload_dir,
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

/// Body-less request, optionally authenticated with a session cookie.
pub fn request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

const BOUNDARY: &str = "test-boundary-7f9a2b";

/// Assembles a multipart/form-data request from text fields plus an
/// optional `(field, filename, content type, bytes)` file part.
pub fn multipart_request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str, &[u8])>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).expect("failed to build request")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body is not valid JSON")
}

/// The `name=value` pair of the session cookie set by a response.
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response set no cookie")
        .to_str()
        .expect("cookie is not valid UTF-8")
        .split(';')
        .next()
        .expect("empty set-cookie header")
        .to_string()
}

/// Seeds an admin directly through the storage gateway, mirroring the
/// startup bootstrap, and returns its id.
pub async fn seed_admin(app: &TestApp) -> i32 {
    let hash = password::hash_password(ADMIN_PASSWORD).expect("failed to hash password");
    let admin = app
        .storage
        .create_user(NewUser {
            username: ADMIN_USERNAME.to_string(),
            password: hash,
            full_name: "Club Administrator".to_string(),
            is_admin: true,
        })
        .await
        .expect("failed to seed admin");
    admin.id
}

pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/login",
            serde_json::json!({ "username": username, "password": password }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login failed");
    session_cookie(&response)
}

/// Seeds and logs in the admin; returns `(session cookie, admin id)`.
pub async fn admin_session(app: &TestApp) -> (String, i32) {
    let id = seed_admin(app).await;
    let cookie = login(app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    (cookie, id)
}

pub fn player_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("firstName", "Jo"),
        ("surname", "Doe"),
        ("idNumber", "Z1"),
        ("dateOfBirth", "2000-01-01"),
        ("age", "25"),
        ("nationality", "South African"),
        ("preferredFoot", "Right"),
        ("position", "Midfielder"),
        ("teamCategory", "Senior Team"),
        ("dateJoined", "2024-01-01"),
        ("registrationStatus", "Pending"),
    ]
}

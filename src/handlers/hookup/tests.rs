//! Route table tests
//!
//! Drive the real router with a mocked service. A mock without an
//! expectation panics when called, so leaving one out asserts the gate
//! stopped the request before the handler ran.

use std::path::Path as FsPath;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    config::Config,
    constants::{roles, NOT_AN_IMAGE_MESSAGE},
    error::AppError,
    handlers,
    middleware::upload::is_generated_filename,
    models::{Gender, Hookup, HookupDetails, HookupFilter, HookupPhoto, HookupStatus, HookupWinner, SortOrder},
    services::{AuthService, MockHookupService},
    state::AppState,
};

const SECRET: &str = "test-secret";
const BOUNDARY: &str = "hookup-test-boundary";

struct TestApp {
    router: Router,
    upload_dir: TempDir,
}

impl TestApp {
    fn new(mock: MockHookupService) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let state = AppState::new(Arc::new(mock), test_config(upload_dir.path()));

        Self {
            router: handlers::router(state),
            upload_dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn stored_files(&self) -> Vec<String> {
        std::fs::read_dir(self.upload_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }
}

fn test_config(upload_dir: &FsPath) -> Config {
    let upload_dir = upload_dir.display().to_string();
    Config::from_lookup(move |key: &str| match key {
        "DATABASE_URL" => Some("postgres://unused/hookups".to_string()),
        "JWT_SECRET" => Some(SECRET.to_string()),
        "HOOKUPS_UPLOAD_DIR" => Some(upload_dir.clone()),
        "MAX_IMAGE_SIZE_BYTES" => Some("1024".to_string()),
        _ => None,
    })
    .unwrap()
}

fn token_for(role: &str) -> (Uuid, String) {
    let id = Uuid::new_v4();
    let token = AuthService::issue_token(&id, "tester", role, SECRET, Duration::hours(1)).unwrap();
    (id, token)
}

fn admin() -> String {
    token_for(roles::ADMIN).1
}

fn member() -> String {
    token_for(roles::USER).1
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

fn empty(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    request(method, uri, token).body(Body::empty()).unwrap()
}

fn json_body(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request(method, uri, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// One multipart part: field name, optional filename, optional content type, bytes
struct Part<'a> {
    name: &'a str,
    filename: Option<&'a str>,
    content_type: Option<&'a str>,
    data: &'a [u8],
}

fn multipart(uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{}\"", filename));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    request(Method::PATCH, uri, token)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn image_part<'a>(data: &'a [u8]) -> Part<'a> {
    Part {
        name: "image",
        filename: Some("me.png"),
        content_type: Some("image/png"),
        data,
    }
}

fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn round_id(gender: Gender) -> Uuid {
    match gender {
        Gender::Male => Uuid::from_u128(1),
        Gender::Female => Uuid::from_u128(2),
    }
}

fn round(gender: Gender) -> HookupDetails {
    HookupDetails {
        hookup: Hookup {
            id: round_id(gender),
            gender,
            status: HookupStatus::Active,
            winner_id: None,
            winner_set_at: None,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        },
        photos: vec![HookupPhoto {
            hookup_id: round_id(gender),
            user_id: Uuid::from_u128(42),
            image: "hookup--17000000000001234.jpeg".to_string(),
            submitted_at: fixed_time(),
        }],
    }
}

fn winner(gender: Gender) -> HookupWinner {
    HookupWinner {
        hookup_id: round_id(gender),
        gender,
        user_id: Uuid::from_u128(42),
        image: Some("hookup--17000000000001234.jpeg".to_string()),
        decided_at: fixed_time(),
    }
}

fn to_json<T: serde::Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap()
}

// =============================================================================
// POST /hookup
// =============================================================================

#[tokio::test]
async fn create_requires_authentication() {
    let app = TestApp::new(MockHookupService::new());

    let (status, body) = app
        .send(json_body(Method::POST, "/api/v1/hookup", None, json!({ "gender": "male" })))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn create_rejects_non_admin() {
    let mut mock = MockHookupService::new();
    mock.expect_create().never();
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(json_body(
            Method::POST,
            "/api/v1/hookup",
            Some(&member()),
            json!({ "gender": "male" }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn create_checks_role_before_body() {
    let app = TestApp::new(MockHookupService::new());

    let (status, _) = app
        .send(json_body(
            Method::POST,
            "/api/v1/hookup",
            Some(&member()),
            json!({ "gender": "robot" }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_returns_created_envelope() {
    let mut mock = MockHookupService::new();
    mock.expect_create()
        .withf(|gender| *gender == Gender::Male)
        .times(1)
        .returning(|gender| Ok(round(gender)));
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(json_body(
            Method::POST,
            "/api/v1/hookup/",
            Some(&admin()),
            json!({ "gender": "male" }),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"], to_json(round(Gender::Male)));
}

#[tokio::test]
async fn create_rejects_invalid_body() {
    let app = TestApp::new(MockHookupService::new());

    for payload in [json!({ "gender": "robot" }), json!({}), json!({ "gender": 7 })] {
        let (status, body) = app
            .send(json_body(Method::POST, "/api/v1/hookup", Some(&admin()), payload))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::new(MockHookupService::new());
    let expired = AuthService::issue_token(
        &Uuid::new_v4(),
        "tester",
        roles::ADMIN,
        SECRET,
        Duration::hours(-2),
    )
    .unwrap();

    let (status, body) = app
        .send(json_body(
            Method::POST,
            "/api/v1/hookup",
            Some(&expired),
            json!({ "gender": "male" }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let app = TestApp::new(MockHookupService::new());
    let forged = AuthService::issue_token(
        &Uuid::new_v4(),
        "tester",
        roles::ADMIN,
        "another-secret",
        Duration::hours(1),
    )
    .unwrap();

    let (status, body) = app
        .send(empty(Method::GET, "/api/v1/hookup/active", Some(&forged)))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

// =============================================================================
// GET /hookup/active, /hookup/last_winners, /hookup/all_winners
// =============================================================================

#[tokio::test]
async fn active_defaults_to_male() {
    let mut mock = MockHookupService::new();
    mock.expect_get_active()
        .withf(|gender| *gender == Gender::Male)
        .times(1)
        .returning(|gender| Ok(round(gender)));
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(empty(Method::GET, "/api/v1/hookup/active", Some(&member())))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], to_json(round(Gender::Male)));
}

#[tokio::test]
async fn active_uses_requested_gender() {
    let mut mock = MockHookupService::new();
    mock.expect_get_active()
        .withf(|gender| *gender == Gender::Female)
        .times(1)
        .returning(|gender| Ok(round(gender)));
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(empty(
            Method::GET,
            "/api/v1/hookup/active?gender=female",
            Some(&member()),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["gender"], "female");
}

#[tokio::test]
async fn active_rejects_unknown_gender() {
    let app = TestApp::new(MockHookupService::new());

    let (status, body) = app
        .send(empty(
            Method::GET,
            "/api/v1/hookup/active?gender=robot",
            Some(&member()),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn active_requires_authentication() {
    let app = TestApp::new(MockHookupService::new());

    let (status, _) = app
        .send(empty(Method::GET, "/api/v1/hookup/active", None))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn last_winners_requires_authentication() {
    let app = TestApp::new(MockHookupService::new());

    let (status, _) = app
        .send(empty(Method::GET, "/api/v1/hookup/last_winners", None))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn last_winners_returns_service_result() {
    let mut mock = MockHookupService::new();
    mock.expect_get_last_winners()
        .times(1)
        .returning(|| Ok(vec![winner(Gender::Female), winner(Gender::Male)]));
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(empty(Method::GET, "/api/v1/hookup/last_winners", Some(&member())))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        to_json(vec![winner(Gender::Female), winner(Gender::Male)])
    );
}

#[tokio::test]
async fn all_winners_is_public() {
    let mut mock = MockHookupService::new();
    mock.expect_get_all_winners()
        .withf(|gender| *gender == Gender::Male)
        .times(2)
        .returning(|gender| Ok(vec![winner(gender)]));
    let app = TestApp::new(mock);

    let (anonymous, anonymous_body) = app
        .send(empty(Method::GET, "/api/v1/hookup/all_winners", None))
        .await;
    let (signed_in, signed_in_body) = app
        .send(empty(Method::GET, "/api/v1/hookup/all_winners", Some(&member())))
        .await;

    assert_eq!(anonymous, StatusCode::OK);
    assert_eq!(signed_in, StatusCode::OK);
    assert_eq!(anonymous_body, signed_in_body);
    assert_eq!(anonymous_body["data"], to_json(vec![winner(Gender::Male)]));
}

// =============================================================================
// GET /hookup
// =============================================================================

#[tokio::test]
async fn list_passes_filter_to_service() {
    let winner_id = Uuid::from_u128(42);
    let expected = HookupFilter {
        gender: Some(Gender::Female),
        status: Some(HookupStatus::Inactive),
        winner_id: Some(winner_id),
        page: 2,
        per_page: 5,
        order: SortOrder::Asc,
    };

    let mut mock = MockHookupService::new();
    mock.expect_get_all()
        .withf(move |filter| *filter == expected)
        .times(1)
        .returning(|_| Ok(vec![round(Gender::Female)]));
    let app = TestApp::new(mock);

    let uri = format!(
        "/api/v1/hookup?gender=female&status=inactive&winner={}&page=2&limit=5&order=asc&unknown=1",
        winner_id
    );
    let (status, body) = app.send(empty(Method::GET, &uri, Some(&member()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], to_json(vec![round(Gender::Female)]));
}

#[tokio::test]
async fn list_without_query_uses_defaults() {
    let mut mock = MockHookupService::new();
    mock.expect_get_all()
        .withf(|filter| *filter == HookupFilter::default())
        .times(1)
        .returning(|_| Ok(vec![]));
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(empty(Method::GET, "/api/v1/hookup/", Some(&member())))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn list_rejects_malformed_filter() {
    let app = TestApp::new(MockHookupService::new());

    let (status, body) = app
        .send(empty(Method::GET, "/api/v1/hookup?page=first", Some(&member())))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// PATCH /hookup/{id}/submit
// =============================================================================

#[tokio::test]
async fn submit_stores_image_and_passes_filename() {
    let (user_id, token) = token_for(roles::USER);
    let hookup_id = round_id(Gender::Female);

    let seen: Arc<Mutex<Option<(Uuid, Uuid, String)>>> = Arc::new(Mutex::new(None));
    let seen_by_mock = Arc::clone(&seen);

    let mut mock = MockHookupService::new();
    mock.expect_add().times(1).returning(move |id, user, image| {
        *seen_by_mock.lock().unwrap() = Some((id, user, image));
        Ok(round(Gender::Female))
    });
    let app = TestApp::new(mock);

    let photo = b"\x89PNG\r\n\x1a\nnot really a png";
    let (status, body) = app
        .send(multipart(
            &format!("/api/v1/hookup/{}/submit", hookup_id),
            Some(&token),
            &[
                Part {
                    name: "caption",
                    filename: None,
                    content_type: None,
                    data: b"pick me",
                },
                image_part(photo),
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let files = app.stored_files();
    assert_eq!(files.len(), 1);
    assert!(is_generated_filename(&files[0]), "unexpected name {}", files[0]);

    let (id, user, image) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(id, hookup_id);
    assert_eq!(user, user_id);
    assert_eq!(image, files[0]);

    let written = std::fs::read(app.upload_dir.path().join(&files[0])).unwrap();
    assert_eq!(written, photo);
}

#[tokio::test]
async fn submit_rejects_non_image() {
    let mut mock = MockHookupService::new();
    mock.expect_add().never();
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(multipart(
            &format!("/api/v1/hookup/{}/submit", Uuid::new_v4()),
            Some(&member()),
            &[Part {
                name: "image",
                filename: Some("notes.txt"),
                content_type: Some("text/plain"),
                data: b"hello",
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "NOT_AN_IMAGE");
    assert_eq!(body["error"]["message"], NOT_AN_IMAGE_MESSAGE);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn submit_requires_authentication() {
    let app = TestApp::new(MockHookupService::new());

    let (status, _) = app
        .send(multipart(
            &format!("/api/v1/hookup/{}/submit", Uuid::new_v4()),
            None,
            &[image_part(b"image bytes")],
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn submit_accepts_only_one_image() {
    let app = TestApp::new(MockHookupService::new());

    let (status, body) = app
        .send(multipart(
            &format!("/api/v1/hookup/{}/submit", Uuid::new_v4()),
            Some(&member()),
            &[image_part(b"first"), image_part(b"second")],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn submit_requires_an_image() {
    let app = TestApp::new(MockHookupService::new());

    let (status, body) = app
        .send(multipart(
            &format!("/api/v1/hookup/{}/submit", Uuid::new_v4()),
            Some(&member()),
            &[Part {
                name: "caption",
                filename: None,
                content_type: None,
                data: b"no photo",
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn submit_rejects_oversized_image() {
    let app = TestApp::new(MockHookupService::new());
    let oversized = vec![0u8; 2048];

    let (status, body) = app
        .send(multipart(
            &format!("/api/v1/hookup/{}/submit", Uuid::new_v4()),
            Some(&member()),
            &[image_part(&oversized)],
        ))
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn submit_keeps_file_when_service_fails() {
    let mut mock = MockHookupService::new();
    mock.expect_add().times(1).returning(|_, _, _| {
        Err(AppError::Conflict(
            "This hookup is no longer accepting photos".to_string(),
        ))
    });
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(multipart(
            &format!("/api/v1/hookup/{}/submit", Uuid::new_v4()),
            Some(&member()),
            &[image_part(b"late entry")],
        ))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"]["message"],
        "This hookup is no longer accepting photos"
    );
    assert_eq!(app.stored_files().len(), 1);
}

// =============================================================================
// PATCH /hookup/{id}, PUT /hookup/{id}
// =============================================================================

#[tokio::test]
async fn update_winner_passes_user_to_service() {
    let hookup_id = round_id(Gender::Male);
    let winner_id = Uuid::from_u128(42);

    let mut mock = MockHookupService::new();
    mock.expect_set_winner()
        .withf(move |id, user| *id == hookup_id && *user == winner_id)
        .times(1)
        .returning(|_, _| Ok(round(Gender::Male)));
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(json_body(
            Method::PATCH,
            &format!("/api/v1/hookup/{}", hookup_id),
            Some(&admin()),
            json!({ "user": winner_id }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], to_json(round(Gender::Male)));
}

#[tokio::test]
async fn update_winner_rejects_non_admin() {
    let mut mock = MockHookupService::new();
    mock.expect_set_winner().never();
    let app = TestApp::new(mock);

    let (status, _) = app
        .send(json_body(
            Method::PATCH,
            &format!("/api/v1/hookup/{}", Uuid::new_v4()),
            Some(&member()),
            json!({ "user": Uuid::new_v4() }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn set_status_passes_status_to_service() {
    let hookup_id = round_id(Gender::Female);

    let mut mock = MockHookupService::new();
    mock.expect_update_status()
        .withf(move |id, status| *id == hookup_id && *status == HookupStatus::Inactive)
        .times(1)
        .returning(|_, _| Ok(round(Gender::Female)));
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(json_body(
            Method::PUT,
            &format!("/api/v1/hookup/{}", hookup_id),
            Some(&admin()),
            json!({ "status": "inactive" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn set_status_rejects_non_admin_and_invalid_status() {
    let app = TestApp::new(MockHookupService::new());
    let uri = format!("/api/v1/hookup/{}", Uuid::new_v4());

    let (forbidden, _) = app
        .send(json_body(
            Method::PUT,
            &uri,
            Some(&member()),
            json!({ "status": "active" }),
        ))
        .await;
    let (invalid, _) = app
        .send(json_body(
            Method::PUT,
            &uri,
            Some(&admin()),
            json!({ "status": "finished" }),
        ))
        .await;

    assert_eq!(forbidden, StatusCode::FORBIDDEN);
    assert_eq!(invalid, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_id_is_rejected() {
    let app = TestApp::new(MockHookupService::new());

    let (status, body) = app
        .send(json_body(
            Method::PUT,
            "/api/v1/hookup/not-a-uuid",
            Some(&admin()),
            json!({ "status": "active" }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn service_errors_are_forwarded() {
    let mut mock = MockHookupService::new();
    mock.expect_update_status()
        .times(1)
        .returning(|_, _| Err(AppError::NotFound("No hookup found with that ID".to_string())));
    let app = TestApp::new(mock);

    let (status, body) = app
        .send(json_body(
            Method::PUT,
            &format!("/api/v1/hookup/{}", Uuid::new_v4()),
            Some(&admin()),
            json!({ "status": "active" }),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["error"]["message"], "No hookup found with that ID");
}

// =============================================================================
// Static photos and health
// =============================================================================

#[tokio::test]
async fn stored_photos_are_served() {
    let app = TestApp::new(MockHookupService::new());
    std::fs::write(app.upload_dir.path().join("hookup--17000000000001.jpeg"), b"jpeg").unwrap();

    let response = app
        .router
        .clone()
        .oneshot(empty(Method::GET, "/hookups/hookup--17000000000001.jpeg", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"jpeg");
}

#[tokio::test]
async fn readiness_pings_service() {
    let mut mock = MockHookupService::new();
    mock.expect_ping().times(1).returning(|| Ok(()));
    let app = TestApp::new(mock);

    let (status, body) = app.send(empty(Method::GET, "/health/ready", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::new(MockHookupService::new());

    let minted = app
        .router
        .clone()
        .oneshot(empty(Method::GET, "/health", None))
        .await
        .unwrap();
    assert!(minted.headers().contains_key("x-request-id"));

    let echoed = app
        .router
        .clone()
        .oneshot(
            request(Method::GET, "/health", None)
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(echoed.headers()["x-request-id"], "abc-123");
}

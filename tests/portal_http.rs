//! End-to-end: the HTTP portal client against the in-process warp stub.

use rollcall::application_impl::HttpPortalClient;
use rollcall::application_port::{AttendanceService, LoginInput, PortalAuth, PortalError};
use rollcall::domain_model::SessionId;
use rollcall::report::AttendanceSummary;
use rollcall::stub::{StubPortal, routes};
use std::sync::Arc;

const USERNAME: &str = "AP24110012177";
const PASSWORD: &str = "changeme";
const CAPTCHA_ANSWER: &str = "QX4ZD";

async fn spawn_stub() -> HttpPortalClient {
    let portal = Arc::new(StubPortal::new(USERNAME, PASSWORD, 5).with_fixed_answer(CAPTCHA_ANSWER));
    let (addr, server) = warp::serve(routes(portal)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    HttpPortalClient::new(format!("http://{addr}"))
}

#[tokio::test]
async fn captcha_login_attendance_round_trip() {
    let client = spawn_stub().await;

    let challenge = client.request_captcha().await.unwrap();
    assert!(!challenge.session_id.is_empty());
    assert!(!challenge.image.bytes.is_empty());

    // Lowercase answer; LoginInput normalizes to the portal's uppercase.
    let input = LoginInput::new(
        USERNAME,
        PASSWORD,
        &CAPTCHA_ANSWER.to_lowercase(),
        challenge.session_id.clone(),
    );
    client.login(input).await.unwrap();

    let records = client.fetch_attendance(&challenge.session_id).await.unwrap();
    assert!(!records.is_empty());
    let summary = AttendanceSummary::from_records(&records);
    assert!(summary.overall_percentage() > 0.0);

    // Read-only: a second fetch against the same session still succeeds.
    let again = client.fetch_attendance(&challenge.session_id).await.unwrap();
    assert_eq!(again.len(), records.len());
}

#[tokio::test]
async fn wrong_captcha_surfaces_backend_message_and_consumes_challenge() {
    let client = spawn_stub().await;
    let challenge = client.request_captcha().await.unwrap();

    let err = client
        .login(LoginInput::new(
            USERNAME,
            PASSWORD,
            "WRONG",
            challenge.session_id.clone(),
        ))
        .await
        .unwrap_err();
    match err {
        PortalError::Auth(message) => assert_eq!(message, "Invalid captcha. Please try again."),
        other => panic!("expected Auth, got {other:?}"),
    }

    // The failed attempt consumed the challenge.
    let err = client
        .login(LoginInput::new(
            USERNAME,
            PASSWORD,
            CAPTCHA_ANSWER,
            challenge.session_id.clone(),
        ))
        .await
        .unwrap_err();
    match err {
        PortalError::Auth(message) => {
            assert_eq!(message, "Session expired. Please refresh the captcha.")
        }
        other => panic!("expected Auth, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_password_is_auth_error() {
    let client = spawn_stub().await;
    let challenge = client.request_captcha().await.unwrap();

    let err = client
        .login(LoginInput::new(
            USERNAME,
            "not-the-password",
            CAPTCHA_ANSWER,
            challenge.session_id,
        ))
        .await
        .unwrap_err();
    match err {
        PortalError::Auth(message) => assert_eq!(message, "Invalid username or password."),
        other => panic!("expected Auth, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_session_is_auth_error_with_backend_detail() {
    let client = spawn_stub().await;

    let err = client
        .fetch_attendance(&SessionId("no-such-session".to_string()))
        .await
        .unwrap_err();
    match err {
        PortalError::Auth(message) => {
            assert_eq!(message, "Session invalid or expired. Please log in again.")
        }
        other => panic!("expected Auth, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_payload_is_backend_error() {
    use warp::Filter;

    // A "portal" that answers every GET with an unrelated JSON shape.
    let bogus = warp::get().map(|| warp::reply::json(&serde_json::json!({ "unexpected": true })));
    let (addr, server) = warp::serve(bogus).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    let client = HttpPortalClient::new(format!("http://{addr}"));

    let err = client.request_captcha().await.unwrap_err();
    assert!(matches!(err, PortalError::Backend(_)));

    let err = client
        .fetch_attendance(&SessionId("whatever".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Backend(_)));
}

#[tokio::test]
async fn unreachable_portal_is_network_error() {
    // Bind a listener to reserve a port, then drop it so connects are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpPortalClient::new(format!("http://{addr}"));
    let err = client.request_captcha().await.unwrap_err();
    assert!(matches!(err, PortalError::Network(_)));
}

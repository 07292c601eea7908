use crate::application_port::{AttendanceService, LoginInput, PortalAuth, PortalError};
use crate::domain_model::{AttendanceRecord, CaptchaChallenge, CaptchaImage, SessionId};
use crate::logger::*;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// HTTP client for the portal backend surface:
///
/// - `GET  /api/auth/captcha`
/// - `POST /api/auth/login`
/// - `GET  /api/student/attendance?session=<id>`
pub struct HttpPortalClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CaptchaPayload {
    image_base64: String,
    session_id: String,
}

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    username: &'a str,
    password: &'a str,
    captcha: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttendancePayload {
    attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: String,
}

impl HttpPortalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client, e.g. to share a connection pool.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(err: reqwest::Error) -> PortalError {
    if err.is_decode() {
        PortalError::Backend(err.to_string())
    } else {
        PortalError::Network(err.to_string())
    }
}

/// Maps a non-2xx response, preferring the backend-supplied `detail` message
/// over a generic transport string.
async fn read_error(response: reqwest::Response) -> PortalError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorPayload>(&body)
        .map(|payload| payload.detail)
        .ok();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        PortalError::Auth(detail.unwrap_or_else(|| "Session invalid or expired.".to_string()))
    } else {
        PortalError::Backend(detail.unwrap_or_else(|| format!("portal returned {status}")))
    }
}

#[async_trait::async_trait]
impl PortalAuth for HttpPortalClient {
    async fn request_captcha(&self) -> Result<CaptchaChallenge, PortalError> {
        let response = self
            .http
            .get(self.endpoint("/api/auth/captcha"))
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        let payload: CaptchaPayload = response
            .json()
            .await
            .map_err(|e| PortalError::Backend(e.to_string()))?;
        if payload.session_id.trim().is_empty() {
            return Err(PortalError::Backend(
                "captcha response carried no session id".to_string(),
            ));
        }
        let bytes = BASE64
            .decode(payload.image_base64.as_bytes())
            .map_err(|e| PortalError::Backend(format!("captcha image is not valid base64: {e}")))?;

        debug!(session = %payload.session_id, "captcha challenge received");
        Ok(CaptchaChallenge {
            session_id: SessionId(payload.session_id),
            image: CaptchaImage {
                bytes,
                media_type: "image/jpeg".to_string(),
            },
        })
    }

    async fn login(&self, input: LoginInput) -> Result<(), PortalError> {
        let body = LoginPayload {
            username: &input.username,
            password: &input.password,
            captcha: input.captcha_text(),
            session_id: &input.session_id.0,
        };
        let response = self
            .http
            .post(self.endpoint("/api/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        let reply: LoginReply = response
            .json()
            .await
            .map_err(|e| PortalError::Backend(e.to_string()))?;
        if reply.success {
            info!(user = %input.username, "portal login accepted");
            Ok(())
        } else {
            Err(PortalError::Auth(reply.message.unwrap_or_else(|| {
                "Login failed. Please check your credentials.".to_string()
            })))
        }
    }
}

#[async_trait::async_trait]
impl AttendanceService for HttpPortalClient {
    async fn fetch_attendance(
        &self,
        session: &SessionId,
    ) -> Result<Vec<AttendanceRecord>, PortalError> {
        let response = self
            .http
            .get(self.endpoint("/api/student/attendance"))
            .query(&[("session", session.0.as_str())])
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(read_error(response).await);
        }

        let payload: AttendancePayload = response
            .json()
            .await
            .map_err(|e| PortalError::Backend(e.to_string()))?;
        debug!(subjects = payload.attendance.len(), "attendance received");
        Ok(payload.attendance)
    }
}

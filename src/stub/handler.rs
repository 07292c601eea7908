use super::state::StubPortal;
use crate::logger::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;

#[derive(Debug, Serialize)]
struct CaptchaReply {
    image_base64: String,
    session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub captcha: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
struct LoginReply {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub session: String,
}

#[derive(Debug, Serialize)]
struct AttendanceReply {
    attendance: Vec<crate::domain_model::AttendanceRecord>,
}

#[derive(Debug, Serialize)]
struct ErrorReply {
    detail: String,
}

fn json_with_status<T: Serialize>(
    body: &T,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(body), status)
}

pub async fn issue_captcha(
    portal: Arc<StubPortal>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match portal.issue_captcha() {
        Ok(issued) => {
            debug!(session = %issued.session_id, "issued captcha challenge");
            Ok(json_with_status(
                &CaptchaReply {
                    image_base64: issued.image_base64,
                    session_id: issued.session_id,
                },
                StatusCode::OK,
            ))
        }
        Err(err) => {
            error!("captcha generation failed: {err}");
            Ok(json_with_status(
                &ErrorReply {
                    detail: "Captcha generation failed.".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

pub async fn login(
    body: LoginRequest,
    portal: Arc<StubPortal>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match portal.login(&body.username, &body.password, &body.captcha, &body.session_id) {
        Ok(Ok(())) => {
            info!(user = %body.username, "stub login accepted");
            Ok(json_with_status(
                &LoginReply {
                    success: true,
                    message: None,
                },
                StatusCode::OK,
            ))
        }
        // Rejections ride a 200 with success:false, like the scraped portal.
        Ok(Err(message)) => {
            warn!(user = %body.username, "stub login rejected: {message}");
            Ok(json_with_status(
                &LoginReply {
                    success: false,
                    message: Some(message),
                },
                StatusCode::OK,
            ))
        }
        Err(err) => {
            error!("login verification failed: {err}");
            Ok(json_with_status(
                &ErrorReply {
                    detail: "Login verification failed.".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

pub async fn attendance(
    query: AttendanceQuery,
    portal: Arc<StubPortal>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match portal.attendance(&query.session) {
        Some(records) => Ok(json_with_status(
            &AttendanceReply {
                attendance: records,
            },
            StatusCode::OK,
        )),
        None => Ok(json_with_status(
            &ErrorReply {
                detail: "Session invalid or expired. Please log in again.".to_string(),
            },
            StatusCode::UNAUTHORIZED,
        )),
    }
}

use super::PortalError;
use crate::domain_model::{CaptchaChallenge, SessionId};

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub session_id: SessionId,
    captcha_text: String,
}

impl LoginInput {
    /// The captcha answer is uppercased here. The portal compares answers
    /// case-sensitively against uppercase challenge text, so normalization is
    /// part of the wire contract and holds for every implementation.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        captcha_text: &str,
        session_id: SessionId,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            session_id,
            captcha_text: captcha_text.trim().to_uppercase(),
        }
    }

    pub fn captcha_text(&self) -> &str {
        &self.captcha_text
    }
}

/// Session establishment against the portal backend.
#[async_trait::async_trait]
pub trait PortalAuth: Send + Sync {
    /// Allocates a fresh backend session and returns its challenge. Each call
    /// supersedes the session tied to any prior challenge.
    async fn request_captcha(&self) -> Result<CaptchaChallenge, PortalError>;

    /// Consumes the challenge named by `input.session_id`. A rejected attempt
    /// invalidates that challenge whether or not the credentials were right.
    async fn login(&self, input: LoginInput) -> Result<(), PortalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captcha_text_is_uppercased_on_construction() {
        let input = LoginInput::new("user", "pw", " x7xqd ", SessionId("s-1".to_string()));
        assert_eq!(input.captcha_text(), "X7XQD");
    }
}

use crate::application_port::{LoginInput, PortalAuth, PortalError};
use crate::domain_model::{CaptchaChallenge, CaptchaImage, SessionId};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 1x1 transparent PNG standing in for a rendered challenge image.
const FAKE_CAPTCHA_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub const FAKE_CAPTCHA_ANSWER: &str = "12345";
pub const FAKE_PASSWORD: &str = "changeme";

/// Magic username that simulates an unreachable portal on login.
pub const FAKE_NETSPLIT_USER: &str = "netsplit";

// Minimal fake for the login flow: every challenge gets a distinct session
// id, and the answer/password are fixed constants. Extend with configurable
// responses when needed.
#[derive(Debug, Default)]
pub struct FakePortalAuth {
    captcha_requests: AtomicUsize,
}

impl FakePortalAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total challenges handed out, for asserting reissue-exactly-once.
    pub fn captcha_requests(&self) -> usize {
        self.captcha_requests.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PortalAuth for FakePortalAuth {
    async fn request_captcha(&self) -> Result<CaptchaChallenge, PortalError> {
        let n = self.captcha_requests.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CaptchaChallenge {
            session_id: SessionId(format!("fake-session-{n}")),
            image: CaptchaImage {
                bytes: FAKE_CAPTCHA_PNG.to_vec(),
                media_type: "image/png".to_string(),
            },
        })
    }

    async fn login(&self, input: LoginInput) -> Result<(), PortalError> {
        if input.username == FAKE_NETSPLIT_USER {
            return Err(PortalError::Network("connection reset by peer".to_string()));
        }
        if input.session_id.is_empty() {
            return Err(PortalError::Auth(
                "Session expired. Please refresh the captcha.".to_string(),
            ));
        }
        if input.captcha_text() != FAKE_CAPTCHA_ANSWER {
            return Err(PortalError::Auth(
                "Invalid captcha. Please try again.".to_string(),
            ));
        }
        if input.password != FAKE_PASSWORD {
            return Err(PortalError::Auth(
                "Invalid username or password.".to_string(),
            ));
        }
        Ok(())
    }
}

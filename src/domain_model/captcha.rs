use crate::domain_model::SessionId;
use std::fmt;

/// Decoded captcha image bytes. Replacing a challenge drops the previous
/// image, so repeated refreshes never accumulate.
#[derive(Clone)]
pub struct CaptchaImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl fmt::Debug for CaptchaImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptchaImage")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A short-lived challenge; the session id it carries is only good for one
/// login attempt and is superseded by the next challenge.
#[derive(Debug, Clone)]
pub struct CaptchaChallenge {
    pub session_id: SessionId,
    pub image: CaptchaImage,
}

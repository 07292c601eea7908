use crate::application_impl::sample_records;
use crate::domain_model::AttendanceRecord;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use captcha_rs::CaptchaBuilder;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use hmac::{Hmac, KeyInit, Mac};
use nanoid::nanoid;
use sha2::Sha256;

const CAPTCHA_HMAC_KEY: &str = "portal-stub-captcha-key";
const CAPTCHA_TTL_SECS: i64 = 300;

/// 1x1 transparent PNG served when a fixed answer is configured (tests).
const FIXED_MODE_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

struct PendingChallenge {
    answer_hmac_hex: String,
    issued_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct IssuedCaptcha {
    pub session_id: String,
    pub image_base64: String,
}

/// In-memory portal state: pending challenges keyed by session id (single-use,
/// HMAC of the uppercased answer), authenticated sessions, one demo account.
pub struct StubPortal {
    username: String,
    password: String,
    captcha_length: usize,
    fixed_answer: Option<String>,
    pending: DashMap<String, PendingChallenge>,
    authenticated: DashMap<String, String>,
}

impl StubPortal {
    pub fn new(username: &str, password: &str, captcha_length: usize) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            captcha_length,
            fixed_answer: None,
            pending: DashMap::new(),
            authenticated: DashMap::new(),
        }
    }

    /// Pin the challenge answer instead of generating one; tests need to know
    /// it. The image degrades to a placeholder.
    pub fn with_fixed_answer(mut self, answer: &str) -> Self {
        self.fixed_answer = Some(answer.to_uppercase());
        self
    }

    fn hmac_hex(&self, code: &str) -> anyhow::Result<String> {
        let mut mac = Hmac::<Sha256>::new_from_slice(CAPTCHA_HMAC_KEY.as_bytes())?;
        mac.update(code.as_bytes());
        let out = mac.finalize().into_bytes();
        Ok(hex::encode(out))
    }

    pub fn issue_captcha(&self) -> anyhow::Result<IssuedCaptcha> {
        let (answer, image_base64) = match &self.fixed_answer {
            Some(answer) => (answer.clone(), BASE64.encode(FIXED_MODE_PNG)),
            None => {
                let captcha = CaptchaBuilder::new()
                    .length(self.captcha_length)
                    .width(140)
                    .height(56)
                    .dark_mode(false)
                    .complexity(3)
                    .compression(40)
                    .build();
                let with_prefix = captcha.to_base64();
                let clean = with_prefix
                    .split_once(',')
                    .map(|(_, d)| d)
                    .unwrap_or(with_prefix.as_str())
                    .to_string();
                (captcha.text.to_uppercase(), clean)
            }
        };

        let session_id = nanoid!(21);
        let answer_hmac_hex = self.hmac_hex(&answer)?;
        self.pending.insert(
            session_id.clone(),
            PendingChallenge {
                answer_hmac_hex,
                issued_at: Utc::now(),
            },
        );

        Ok(IssuedCaptcha {
            session_id,
            image_base64,
        })
    }

    /// Verifies and consumes the challenge, then checks credentials. The
    /// challenge is single-use: it is removed before any comparison, so a
    /// failed attempt cannot be retried against the same session id.
    pub fn login(
        &self,
        username: &str,
        password: &str,
        captcha: &str,
        session_id: &str,
    ) -> anyhow::Result<Result<(), String>> {
        let Some((_, pending)) = self.pending.remove(session_id) else {
            return Ok(Err("Session expired. Please refresh the captcha.".to_string()));
        };
        if Utc::now() > pending.issued_at + Duration::seconds(CAPTCHA_TTL_SECS) {
            return Ok(Err(
                "Captcha expired. Please refresh and try again.".to_string()
            ));
        }

        let provided = self.hmac_hex(&captcha.to_uppercase())?;
        if provided != pending.answer_hmac_hex {
            return Ok(Err("Invalid captcha. Please try again.".to_string()));
        }
        if username != self.username || password != self.password {
            return Ok(Err("Invalid username or password.".to_string()));
        }

        self.authenticated
            .insert(session_id.to_string(), username.to_string());
        Ok(Ok(()))
    }

    /// Read-only; repeat fetches against a live session keep succeeding.
    pub fn attendance(&self, session_id: &str) -> Option<Vec<AttendanceRecord>> {
        self.authenticated
            .get(session_id)
            .map(|_| sample_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_is_single_use() {
        let portal = StubPortal::new("user", "pw", 5).with_fixed_answer("AB1CD");
        let issued = portal.issue_captcha().unwrap();

        let first = portal
            .login("user", "wrong-pw", "AB1CD", &issued.session_id)
            .unwrap();
        assert_eq!(first, Err("Invalid username or password.".to_string()));

        // Consumed by the failed attempt; correct everything no longer helps.
        let second = portal
            .login("user", "pw", "AB1CD", &issued.session_id)
            .unwrap();
        assert_eq!(
            second,
            Err("Session expired. Please refresh the captcha.".to_string())
        );
    }

    #[test]
    fn captcha_comparison_ignores_case() {
        let portal = StubPortal::new("user", "pw", 5).with_fixed_answer("AB1CD");
        let issued = portal.issue_captcha().unwrap();
        let verdict = portal.login("user", "pw", "ab1cd", &issued.session_id).unwrap();
        assert_eq!(verdict, Ok(()));
        assert!(portal.attendance(&issued.session_id).is_some());
    }

    #[test]
    fn attendance_requires_authentication() {
        let portal = StubPortal::new("user", "pw", 5).with_fixed_answer("AB1CD");
        let issued = portal.issue_captcha().unwrap();
        assert!(portal.attendance(&issued.session_id).is_none());
    }
}

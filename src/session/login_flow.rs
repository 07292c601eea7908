use crate::application_port::{LoginInput, PortalAuth, PortalError};
use crate::domain_model::{CaptchaChallenge, Session};
use crate::logger::*;
use chrono::Utc;
use std::sync::Arc;

/// Client-observed login states.
///
/// Unauthenticated -> CaptchaPending -> CaptchaReady -> SubmittingLogin
/// -> Authenticated, or -> LoginFailed -> CaptchaPending (the consumed
/// challenge cannot be retried, so a fresh one is fetched automatically).
#[derive(Debug)]
pub enum LoginState {
    Unauthenticated,
    CaptchaPending,
    CaptchaReady(CaptchaChallenge),
    SubmittingLogin,
    Authenticated(Session),
    LoginFailed { message: String },
}

/// Drives one login per process against a [`PortalAuth`] backend. All methods
/// take `&mut self`; only one captcha or login request is ever in flight.
pub struct LoginFlow {
    auth: Arc<dyn PortalAuth>,
    state: LoginState,
}

impl LoginFlow {
    pub fn new(auth: Arc<dyn PortalAuth>) -> Self {
        Self {
            auth,
            state: LoginState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn challenge(&self) -> Option<&CaptchaChallenge> {
        match &self.state {
            LoginState::CaptchaReady(challenge) => Some(challenge),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            LoginState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Fetches a fresh challenge, superseding any prior one. No-op once
    /// authenticated. On failure the flow returns to `Unauthenticated` and
    /// the error is surfaced for a manual retry.
    pub async fn load_captcha(&mut self) -> Result<(), PortalError> {
        if matches!(self.state, LoginState::Authenticated(_)) {
            return Ok(());
        }

        self.state = LoginState::CaptchaPending;
        match self.auth.request_captcha().await {
            Ok(challenge) => {
                self.state = LoginState::CaptchaReady(challenge);
                Ok(())
            }
            Err(err) => {
                self.state = LoginState::Unauthenticated;
                Err(err)
            }
        }
    }

    /// Submits credentials with the held challenge's session id.
    ///
    /// Without a usable session id this fails fast with `SessionMissing` and
    /// reissues the captcha exactly once, guarding against form state that
    /// outpaced captcha retrieval. A rejected attempt consumed the challenge,
    /// so `Auth` failures also reissue exactly once. `Network` and `Backend`
    /// failures reissue nothing; recovery there is manual.
    pub async fn submit(
        &mut self,
        username: &str,
        password: &str,
        captcha_text: &str,
    ) -> Result<Session, PortalError> {
        let session_id = match &self.state {
            LoginState::Authenticated(session) => return Ok(session.clone()),
            LoginState::CaptchaReady(challenge) if !challenge.session_id.is_empty() => {
                challenge.session_id.clone()
            }
            _ => {
                warn!("login submitted without a captcha session");
                self.reissue_captcha().await;
                return Err(PortalError::SessionMissing);
            }
        };

        self.state = LoginState::SubmittingLogin;
        let input = LoginInput::new(username, password, captcha_text, session_id.clone());
        match self.auth.login(input).await {
            Ok(()) => {
                let session = Session {
                    id: session_id,
                    username: username.to_string(),
                    established_at: Utc::now(),
                };
                self.state = LoginState::Authenticated(session.clone());
                Ok(session)
            }
            Err(err) => {
                warn!(user = %username, "login rejected: {err}");
                self.state = LoginState::LoginFailed {
                    message: err.to_string(),
                };
                if err.is_recoverable_by_reissue() {
                    self.reissue_captcha().await;
                }
                Err(err)
            }
        }
    }

    /// At most one reissue per failure; a reload already pending is never
    /// duplicated.
    async fn reissue_captcha(&mut self) {
        if matches!(self.state, LoginState::CaptchaPending) {
            return;
        }
        if let Err(err) = self.load_captcha().await {
            warn!("captcha reload failed: {err}");
        }
    }
}

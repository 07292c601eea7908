use thiserror::Error;

/// Failure taxonomy for every portal-facing call.
///
/// `Auth` and `SessionMissing` are recovered locally by reissuing the captcha
/// and re-prompting. `Network` and `Backend` are surfaced to the user and
/// retried manually only, so a broken portal never gets hammered.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("portal unreachable: {0}")]
    Network(String),
    #[error("unexpected portal response: {0}")]
    Backend(String),
    #[error("{0}")]
    Auth(String),
    #[error("Session expired. Please refresh the captcha.")]
    SessionMissing,
}

impl PortalError {
    pub fn is_recoverable_by_reissue(&self) -> bool {
        matches!(self, PortalError::Auth(_) | PortalError::SessionMissing)
    }
}

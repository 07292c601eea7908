use super::PortalError;
use crate::domain_model::{AttendanceRecord, SessionId};

/// Read-only attendance retrieval for an established session. Idempotent and
/// safely retryable; an invalid or expired session surfaces as
/// [`PortalError::Auth`].
#[async_trait::async_trait]
pub trait AttendanceService: Send + Sync {
    async fn fetch_attendance(
        &self,
        session: &SessionId,
    ) -> Result<Vec<AttendanceRecord>, PortalError>;
}

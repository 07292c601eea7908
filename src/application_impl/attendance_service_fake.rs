use crate::application_port::{AttendanceService, PortalError};
use crate::domain_model::{AttendanceRecord, SessionId};

#[derive(Debug, Default)]
pub struct FakeAttendanceService;

impl FakeAttendanceService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl AttendanceService for FakeAttendanceService {
    async fn fetch_attendance(
        &self,
        session: &SessionId,
    ) -> Result<Vec<AttendanceRecord>, PortalError> {
        if session.is_empty() {
            return Err(PortalError::Auth(
                "Session invalid or expired. Please log in again.".to_string(),
            ));
        }
        Ok(sample_records())
    }
}

/// Canned semester shared by the fake service and the portal stub. EEE204's
/// portal percentage deliberately disagrees with the raw counts; the real
/// portal weights OD/ML by its own policy and both values are kept.
pub fn sample_records() -> Vec<AttendanceRecord> {
    vec![
        AttendanceRecord {
            subject_code: "CSE201".to_string(),
            subject_name: "Data Structures and Algorithms".to_string(),
            classes_conducted: 42,
            present: 38,
            absent: 2,
            od_ml_taken: 2,
            attendance_percentage: 90.5,
        },
        AttendanceRecord {
            subject_code: "MAT202".to_string(),
            subject_name: "Probability and Statistics".to_string(),
            classes_conducted: 40,
            present: 34,
            absent: 6,
            od_ml_taken: 0,
            attendance_percentage: 85.0,
        },
        AttendanceRecord {
            subject_code: "EEE204".to_string(),
            subject_name: "Digital Logic Design".to_string(),
            classes_conducted: 36,
            present: 27,
            absent: 7,
            od_ml_taken: 2,
            attendance_percentage: 76.4,
        },
        AttendanceRecord {
            subject_code: "HUM110".to_string(),
            subject_name: "Professional Ethics".to_string(),
            classes_conducted: 30,
            present: 18,
            absent: 10,
            od_ml_taken: 2,
            attendance_percentage: 60.0,
        },
    ]
}

mod attendance_service_fake;
mod portal_auth_fake;
mod portal_http;

pub use attendance_service_fake::*;
pub use portal_auth_fake::*;
pub use portal_http::*;

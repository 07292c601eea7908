mod attendance_service;
mod error;
mod portal_auth;

pub use attendance_service::*;
pub use error::*;
pub use portal_auth::*;

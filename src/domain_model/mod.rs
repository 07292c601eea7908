mod attendance;
mod captcha;
mod session;

pub use attendance::*;
pub use captcha::*;
pub use session::*;

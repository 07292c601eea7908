//! Local stand-in for the portal backend, serving the same HTTP surface the
//! client consumes. Used by `bin/portal_stub.rs` and the integration tests.

mod handler;
mod router;
mod state;

pub use router::routes;
pub use state::*;

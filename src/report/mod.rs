mod summary;
mod table;
mod tier;

pub use summary::*;
pub use table::*;
pub use tier::*;

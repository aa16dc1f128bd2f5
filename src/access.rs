//! Access-control view-model: grant index, workflow filters, bulk grant/revoke.

mod bulk;
mod filter;
mod index;
mod matrix;

pub use self::bulk::*;
pub use self::filter::*;
pub use self::index::*;
pub use self::matrix::*;

mod config;
mod ids;
mod records;

pub use self::config::*;
pub use self::ids::*;
pub use self::records::*;

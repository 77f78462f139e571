//! File-level persistence helpers and state path resolution

mod io;
mod paths;

pub use io::{atomic_write, read_json_or_default, write_json};
pub use paths::Paths;

//! Common utility functions.

pub mod data;
pub mod process;
pub mod fs;

// Re-export commonly used items
pub use data::{deep_merge, load_yaml};
pub use process::{run, run_async, ProcessOutput};
pub use fs::{expand_path, read_if_exists, slurp, write_atomic};

//! Infrastructure utilities: platform-specific concerns with no business
//! logic.

pub mod paths;

pub use paths::{default_data_dir, default_data_file};

//! Configuration sources, lowest priority first.

pub mod env;
pub mod global_file;

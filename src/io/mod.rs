//! Filesystem helpers

pub mod paths;

pub use paths::{NamedPath, PathUtils};

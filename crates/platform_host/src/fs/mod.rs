//! Virtual-path, file-kind, and upload-source contracts for the explorer.

pub mod path;
pub mod types;
pub mod upload;

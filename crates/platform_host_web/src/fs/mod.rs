//! Browser file-access adapters.

pub mod upload;

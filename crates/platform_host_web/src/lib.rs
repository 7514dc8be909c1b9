//! Browser (`wasm32`) implementations of [`platform_host`] explorer contracts.
//!
//! - [`WebSnapshotStore`] persists explorer snapshot records in `window.localStorage`.
//! - [`WebUploadSource`] decodes user-selected files through `FileReader`.
//!
//! Non-wasm builds compile both adapters to inert fallbacks so native tests can link them.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod storage;

pub use fs::upload::WebUploadSource;
pub use storage::local_snapshot::WebSnapshotStore;

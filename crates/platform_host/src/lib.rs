//! Typed host contracts shared by the explorer core and its browser adapters.
//!
//! This crate owns the canonical [`VirtualPath`] key, the synchronous [`SnapshotStore`]
//! persistence seam, the async [`UploadSource`] decoding seam, and clock helpers. Concrete
//! browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod storage;
pub mod time;

pub use fs::path::{file_extension, VirtualPath, PATH_SEPARATOR};
pub use fs::types::{
    mime_type_for_extension, size_label, FileCategory, UploadEncoding, DEFAULT_IMAGE_EXTENSIONS,
    DEFAULT_TEXT_EXTENSIONS, FILE_CONTENTS_STORAGE_KEY, FILE_SYSTEM_STORAGE_KEY,
};
pub use fs::upload::{data_url_for, MemoryUploadSource, UploadReadFuture, UploadSource};
pub use storage::snapshot::{
    load_record_with, save_record_with, MemorySnapshotStore, SnapshotStore,
};
pub use time::{stamp_after, unix_time_ms_now};

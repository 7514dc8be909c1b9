//! Virtual file explorer core: a path-keyed directory store, navigation history, upload
//! mirroring, and a session facade that saves through an injected [`platform_host::SnapshotStore`].

pub mod config;
pub mod content;
pub mod entry;
pub mod error;
pub mod gallery;
pub mod history;
pub mod session;
pub mod snapshot;
pub mod upload;
pub mod vfs;

pub use config::{ExplorerConfig, DEFAULT_STAGING_DIR_NAME};
pub use content::content_key;
pub use entry::{DirectoryEntry, EntryKind};
pub use error::{ExplorerError, FsError};
pub use gallery::ImageGallery;
pub use history::NavigationHistory;
pub use session::ExplorerSession;
pub use snapshot::{ContentRecord, DirectoryRecord};
pub use upload::{upload_files, UploadFailure, UploadReport};
pub use vfs::VirtualFs;

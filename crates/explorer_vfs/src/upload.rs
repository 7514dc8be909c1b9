//! Batch upload of user-selected files into a directory.

use log::{debug, warn};
use platform_host::{UploadSource, VirtualPath};

use crate::config::ExplorerConfig;
use crate::error::FsError;
use crate::vfs::VirtualFs;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file the batch could not store.
pub struct UploadFailure {
    /// Name of the rejected file.
    pub name: String,
    /// Why it was rejected.
    pub error: FsError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Outcome of one upload batch.
pub struct UploadReport {
    /// Names stored successfully, in selection order.
    pub uploaded: Vec<String>,
    /// Files that were rejected, in selection order.
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn success_count(&self) -> usize {
        self.uploaded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Notification text, e.g. `"2 file(s) uploaded, 1 file(s) failed"`.
    pub fn summary(&self) -> String {
        let mut text = format!("{} file(s) uploaded", self.success_count());
        if self.failure_count() > 0 {
            text.push_str(&format!(", {} file(s) failed", self.failure_count()));
        }
        text
    }
}

/// Uploads every file in `files` into `dir`, never stopping at the first failure.
///
/// Each file is checked against the allow-list and the directory's visible names before it is
/// decoded, then stored with [`VirtualFs::insert_upload`], which re-checks the name. A file is
/// either fully stored or not stored at all.
pub async fn upload_files<U: UploadSource>(
    fs: &mut VirtualFs,
    config: &ExplorerConfig,
    dir: &VirtualPath,
    files: &[U],
) -> UploadReport {
    let mut report = UploadReport::default();
    for file in files {
        let name = file.name().to_string();
        match upload_one(fs, config, dir, file).await {
            Ok(()) => {
                debug!("uploaded `{name}` into `{dir}`");
                report.uploaded.push(name);
            }
            Err(error) => {
                warn!("upload of `{name}` into `{dir}` rejected: {error}");
                report.failures.push(UploadFailure { name, error });
            }
        }
    }
    report
}

async fn upload_one<U: UploadSource>(
    fs: &mut VirtualFs,
    config: &ExplorerConfig,
    dir: &VirtualPath,
    file: &U,
) -> Result<(), FsError> {
    let name = file.name();
    let category = config
        .category_for(name)
        .ok_or_else(|| FsError::UnsupportedType {
            name: name.to_string(),
        })?;
    fs.ensure_writable_directory(dir)?;
    fs.ensure_name_free(dir, name)?;

    let content = file
        .read(category.upload_encoding())
        .await
        .map_err(|reason| FsError::ReadFailure {
            name: name.to_string(),
            reason,
        })?;
    fs.insert_upload(dir, name, file.size_bytes(), content)?;
    Ok(())
}

//! Explorer command facade: current directory, history, and persist-after-every-mutation.

use log::{debug, error, info};
use platform_host::{load_record_with, save_record_with, SnapshotStore, UploadSource, VirtualPath};

use crate::config::ExplorerConfig;
use crate::entry::DirectoryEntry;
use crate::error::{ExplorerError, FsError};
use crate::gallery::ImageGallery;
use crate::history::NavigationHistory;
use crate::snapshot::{ContentRecord, DirectoryRecord};
use crate::upload::{upload_files, UploadReport};
use crate::vfs::VirtualFs;

/// One explorer window's state bound to a durable [`SnapshotStore`].
///
/// Commands that change the tree save both snapshot records before returning. A failed save is
/// reported as [`ExplorerError::Persistence`]; the in-memory change is kept.
pub struct ExplorerSession<S: SnapshotStore> {
    config: ExplorerConfig,
    fs: VirtualFs,
    history: NavigationHistory,
    store: S,
}

impl<S: SnapshotStore> ExplorerSession<S> {
    /// Loads the stored snapshot, or starts a fresh tree and saves it.
    ///
    /// # Errors
    ///
    /// - [`ExplorerError::Config`] when the staging name is not a single path segment.
    /// - [`ExplorerError::CorruptSnapshot`] when stored records cannot be decoded.
    /// - [`ExplorerError::Persistence`] when the initial save fails.
    pub fn open(mut config: ExplorerConfig, store: S) -> Result<Self, ExplorerError> {
        config.validate()?;
        let directories: Option<DirectoryRecord> = load_record_with(&store, &config.file_system_key)
            .map_err(ExplorerError::CorruptSnapshot)?;
        let contents: Option<ContentRecord> = load_record_with(&store, &config.file_contents_key)
            .map_err(ExplorerError::CorruptSnapshot)?;

        let (fs, fresh) = match directories {
            Some(directories) => (
                VirtualFs::from_records(
                    directories,
                    contents.unwrap_or_default(),
                    &config.staging_dir_name,
                )
                .map_err(ExplorerError::CorruptSnapshot)?,
                false,
            ),
            None if config.seed_default_tree => {
                (VirtualFs::seeded(&config.staging_dir_name)?, true)
            }
            None => (VirtualFs::new(&config.staging_dir_name)?, true),
        };

        let session = Self {
            config,
            fs,
            history: NavigationHistory::default(),
            store,
        };
        if fresh {
            info!("no stored explorer snapshot; starting a new tree");
            session.persist()?;
        }
        Ok(session)
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Read-only view of the underlying store.
    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Directory currently shown.
    pub fn current_path(&self) -> &VirtualPath {
        self.history.current()
    }

    /// Visible entries of the current directory.
    pub fn listing(&self) -> Result<Vec<DirectoryEntry>, FsError> {
        self.fs.list_directory(self.current_path())
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Opens `path` and records it in history.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidOperation`] when `path` names a file.
    /// - [`FsError::NotFound`] when nothing navigable exists at `path`. Staging directories
    ///   count as missing.
    pub fn navigate(&mut self, path: &VirtualPath) -> Result<(), FsError> {
        self.ensure_navigable(path)?;
        self.history.navigate_to(path.clone());
        debug!("navigated to `{path}`");
        Ok(())
    }

    /// Opens the child folder `name` of the current directory.
    ///
    /// # Errors
    ///
    /// [`FsError::NotFound`] for a missing entry, [`FsError::InvalidOperation`] for files.
    pub fn open_folder(&mut self, name: &str) -> Result<(), FsError> {
        let current = self.current_path().clone();
        if !self.fs.entry(&current, name)?.is_folder() {
            return Err(FsError::InvalidOperation(format!(
                "`{}` is not a folder",
                current.join(name)
            )));
        }
        self.navigate(&current.join(name))
    }

    /// Opens the parent directory; a no-op at the root.
    pub fn navigate_up(&mut self) -> Result<(), FsError> {
        match self.current_path().parent() {
            Some(parent) => self.navigate(&parent),
            None => Ok(()),
        }
    }

    /// Steps back in history. Returns `Ok(false)` when already at the oldest slot.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] without moving when the previous path was deleted since.
    pub fn go_back(&mut self) -> Result<bool, FsError> {
        let Some(target) = self.history.peek_back() else {
            return Ok(false);
        };
        self.ensure_navigable(target)?;
        self.history.go_back();
        Ok(true)
    }

    /// Steps forward in history. Returns `Ok(false)` when already at the newest slot.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] without moving when the next path was deleted since.
    pub fn go_forward(&mut self) -> Result<bool, FsError> {
        let Some(target) = self.history.peek_forward() else {
            return Ok(false);
        };
        self.ensure_navigable(target)?;
        self.history.go_forward();
        Ok(true)
    }

    /// Creates a folder in the current directory.
    pub fn create_folder(&mut self, name: &str) -> Result<DirectoryEntry, ExplorerError> {
        let current = self.current_path().clone();
        let entry = self.fs.create_folder(&current, name.trim())?;
        self.persist()?;
        Ok(entry)
    }

    /// Creates a file holding `content` in the current directory.
    pub fn create_file(
        &mut self,
        name: &str,
        content: Vec<u8>,
    ) -> Result<DirectoryEntry, ExplorerError> {
        let current = self.current_path().clone();
        let size = content.len() as u64;
        let entry = self.fs.create_file(&current, name.trim(), content, size)?;
        self.persist()?;
        Ok(entry)
    }

    /// Deletes `name` from the current directory.
    pub fn delete(&mut self, name: &str) -> Result<(), ExplorerError> {
        let current = self.current_path().clone();
        self.fs.delete_entry(&current, name)?;
        self.persist()
    }

    /// Renames `old_name` in the current directory.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<(), ExplorerError> {
        let current = self.current_path().clone();
        self.fs.rename_entry(&current, old_name, new_name.trim())?;
        self.persist()
    }

    /// Moves `name` from the current directory into `target` (the drop target).
    ///
    /// Returns `Ok(false)` when `target` is the current directory.
    pub fn move_entry(&mut self, name: &str, target: &VirtualPath) -> Result<bool, ExplorerError> {
        let current = self.current_path().clone();
        let moved = self.fs.move_entry(name, &current, target)?;
        if moved {
            self.persist()?;
        }
        Ok(moved)
    }

    /// Reads a file of the current directory.
    pub fn read_content(&self, name: &str) -> Result<Vec<u8>, FsError> {
        let entry = self.fs.entry(self.current_path(), name)?;
        if entry.is_folder() {
            return Err(FsError::InvalidOperation(format!(
                "`{}` is a folder",
                self.current_path().join(name)
            )));
        }
        self.fs.read_content(self.current_path(), name)
    }

    /// Saves new content for a file of the current directory.
    pub fn write_content(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), ExplorerError> {
        let current = self.current_path().clone();
        self.fs.write_content(&current, name, bytes)?;
        self.persist()
    }

    /// Uploads `files` into the current directory and saves once after the batch.
    ///
    /// Per-file problems are reported in the [`UploadReport`]; only a failed save is an `Err`.
    pub async fn upload<U: UploadSource>(
        &mut self,
        files: &[U],
    ) -> Result<UploadReport, ExplorerError> {
        let current = self.current_path().clone();
        let report = upload_files(&mut self.fs, &self.config, &current, files).await;
        if report.success_count() > 0 {
            self.persist()?;
        }
        Ok(report)
    }

    /// Opens the image viewer on `name` within the current directory's images.
    pub fn open_gallery(&self, name: &str) -> Option<ImageGallery> {
        let listing = self.listing().ok()?;
        ImageGallery::open(&listing, name, &self.config)
    }

    fn ensure_navigable(&self, path: &VirtualPath) -> Result<(), FsError> {
        if self.fs.is_navigable(path) {
            return Ok(());
        }
        let names_file = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => self
                .fs
                .entry(&parent, name)
                .is_ok_and(|entry| !entry.is_folder()),
            _ => false,
        };
        if names_file {
            return Err(FsError::InvalidOperation(format!(
                "`{path}` is a file, not a folder"
            )));
        }
        Err(FsError::NotFound(path.to_string()))
    }

    fn persist(&self) -> Result<(), ExplorerError> {
        save_record_with(
            &self.store,
            &self.config.file_system_key,
            &self.fs.directory_record(),
        )
        .and_then(|()| {
            save_record_with(
                &self.store,
                &self.config.file_contents_key,
                &self.fs.content_record(),
            )
        })
        .map_err(|err| {
            error!("explorer snapshot save failed; in-memory changes are not durable: {err}");
            ExplorerError::Persistence(err)
        })
    }
}

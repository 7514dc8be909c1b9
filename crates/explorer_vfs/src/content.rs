//! Content addressing: where a file's blob lives and how upload mirrors follow their entry.
//!
//! A plain file stores its blob at `dir/name`. An uploaded file is listed in `dir` but its blob
//! and a hidden mirror entry live in the staging directory `dir/<staging>`; the visible entry's
//! `content_location` names that staging directory. Moves and renames keep the mirror in the
//! staging directory of the entry's current parent.

use log::debug;
use platform_host::VirtualPath;

use crate::entry::DirectoryEntry;
use crate::error::FsError;
use crate::vfs::VirtualFs;

/// Returns the content key of `entry` listed in `dir`.
pub fn content_key(dir: &VirtualPath, entry: &DirectoryEntry) -> VirtualPath {
    entry.content_location().unwrap_or(dir).join(entry.name())
}

impl VirtualFs {
    /// Staging directory used for uploads into `dir`.
    pub fn staging_directory_for(&self, dir: &VirtualPath) -> VirtualPath {
        dir.join(&self.staging_dir_name)
    }

    /// Stores an uploaded file: a hidden mirror plus the blob in `dir`'s staging directory, and a
    /// visible entry in `dir` pointing at it.
    ///
    /// # Errors
    ///
    /// Same as [`VirtualFs::create_file`]; nothing is written on error.
    pub fn insert_upload(
        &mut self,
        dir: &VirtualPath,
        name: &str,
        size_bytes: u64,
        content: Vec<u8>,
    ) -> Result<DirectoryEntry, FsError> {
        self.validate_name(name)?;
        self.ensure_writable_directory(dir)?;
        self.ensure_name_free(dir, name)?;

        let staging = self.staging_directory_for(dir);
        let visible = DirectoryEntry::uploaded(name, size_bytes, staging.clone());
        self.entries_mut(dir)?.push(visible.clone());
        self.push_mirror(&staging, DirectoryEntry::staging_mirror(name, size_bytes));
        self.blobs.insert(staging.join(name), content);
        debug!("stored upload `{}` under `{staging}`", dir.join(name));
        Ok(visible)
    }

    /// Drops the blob of a removed file entry and, for uploads, its staging mirror.
    pub(crate) fn discard_content(&mut self, dir: &VirtualPath, entry: &DirectoryEntry) {
        self.blobs.remove(&content_key(dir, entry));
        if let Some(staging) = entry.content_location() {
            self.take_mirror(staging, entry.name());
        }
    }

    /// Moves a file's blob (and mirror) so it is addressed as `to_dir/new_name`.
    ///
    /// Returns the entry's new `content_location`.
    pub(crate) fn relocate_content(
        &mut self,
        from_dir: &VirtualPath,
        entry: &DirectoryEntry,
        to_dir: &VirtualPath,
        new_name: &str,
    ) -> Option<VirtualPath> {
        let blob = self.blobs.remove(&content_key(from_dir, entry));
        let Some(old_staging) = entry.content_location() else {
            if let Some(blob) = blob {
                self.blobs.insert(to_dir.join(new_name), blob);
            }
            return None;
        };

        let size = entry.size_bytes().unwrap_or_default();
        let mut mirror = self
            .take_mirror(old_staging, entry.name())
            .unwrap_or_else(|| DirectoryEntry::staging_mirror(new_name, size));
        mirror.set_name(new_name);
        let new_staging = self.staging_directory_for(to_dir);
        self.push_mirror(&new_staging, mirror);
        if let Some(blob) = blob {
            self.blobs.insert(new_staging.join(new_name), blob);
        }
        Some(new_staging)
    }

    pub(crate) fn mirror_mut(
        &mut self,
        staging: &VirtualPath,
        name: &str,
    ) -> Option<&mut DirectoryEntry> {
        self.directories
            .get_mut(staging)?
            .iter_mut()
            .find(|entry| entry.is_hidden() && entry.name() == name)
    }

    /// Appends a mirror, creating the staging directory on first use.
    fn push_mirror(&mut self, staging: &VirtualPath, mirror: DirectoryEntry) {
        let mirrors = self.directories.entry(staging.clone()).or_default();
        mirrors.retain(|entry| !(entry.is_hidden() && entry.name() == mirror.name()));
        mirrors.push(mirror);
    }

    /// Removes a mirror; an emptied staging directory is removed with it.
    fn take_mirror(&mut self, staging: &VirtualPath, name: &str) -> Option<DirectoryEntry> {
        let mirrors = self.directories.get_mut(staging)?;
        let idx = mirrors
            .iter()
            .position(|entry| entry.is_hidden() && entry.name() == name)?;
        let mirror = mirrors.remove(idx);
        if mirrors.is_empty() {
            self.directories.remove(staging);
        }
        Some(mirror)
    }
}

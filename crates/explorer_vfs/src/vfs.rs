//! In-memory virtual filesystem: ordered directory listings and content blobs keyed by
//! canonical path.
//!
//! Every public mutation validates first and mutates second, so an `Err` always leaves the store
//! exactly as it was. Subtree operations (delete, rename, move of folders) select keys with
//! [`VirtualPath::starts_with`], which compares whole segments.

use std::collections::BTreeMap;

use log::debug;
use platform_host::VirtualPath;

use crate::config::{checked_staging_dir_name, DEFAULT_STAGING_DIR_NAME};
use crate::content::content_key;
use crate::entry::{DirectoryEntry, EntryKind};
use crate::error::FsError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Owns every directory listing and content blob of one explorer namespace.
pub struct VirtualFs {
    pub(crate) directories: BTreeMap<VirtualPath, Vec<DirectoryEntry>>,
    pub(crate) blobs: BTreeMap<VirtualPath, Vec<u8>>,
    pub(crate) staging_dir_name: String,
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::empty(DEFAULT_STAGING_DIR_NAME.to_string())
    }
}

impl VirtualFs {
    /// Creates a store holding only the empty root directory.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::InvalidOperation`] when `staging_dir_name` is not a single path
    /// segment, since staging keys built from it would not survive a snapshot round trip.
    pub fn new(staging_dir_name: &str) -> Result<Self, FsError> {
        checked_staging_dir_name(staging_dir_name)
            .map(Self::empty)
            .map_err(FsError::InvalidOperation)
    }

    fn empty(staging_dir_name: String) -> Self {
        let mut directories = BTreeMap::new();
        directories.insert(VirtualPath::root(), Vec::new());
        Self {
            directories,
            blobs: BTreeMap::new(),
            staging_dir_name,
        }
    }

    /// Creates a store with the starter tree shown on first launch.
    ///
    /// ```text
    /// /Users/Desktop/Projeler/
    /// /Users/Desktop/notlar.txt
    /// /Users/Documents/
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`VirtualFs::new`].
    pub fn seeded(staging_dir_name: &str) -> Result<Self, FsError> {
        let mut fs = Self::new(staging_dir_name)?;
        let root = VirtualPath::root();
        let users = root.join("Users");
        let desktop = users.join("Desktop");
        fs.push_folder(&root, "Users");
        fs.push_folder(&users, "Desktop");
        fs.push_folder(&users, "Documents");
        fs.push_folder(&desktop, "Projeler");
        if let Some(entries) = fs.directories.get_mut(&desktop) {
            entries.push(DirectoryEntry::file("notlar.txt", 0));
        }
        Ok(fs)
    }

    fn push_folder(&mut self, parent: &VirtualPath, name: &str) {
        if let Some(entries) = self.directories.get_mut(parent) {
            entries.push(DirectoryEntry::folder(name));
            self.directories.insert(parent.join(name), Vec::new());
        }
    }

    /// Reserved name of per-directory upload staging directories.
    pub fn staging_dir_name(&self) -> &str {
        &self.staging_dir_name
    }

    /// Returns `true` when a directory node exists at `path`.
    pub fn contains_directory(&self, path: &VirtualPath) -> bool {
        self.directories.contains_key(path)
    }

    /// Returns `true` when `path` names an upload staging directory.
    pub fn is_staging_directory(&self, path: &VirtualPath) -> bool {
        path.file_name() == Some(self.staging_dir_name.as_str())
    }

    /// Returns `true` for directories a user may open.
    pub fn is_navigable(&self, path: &VirtualPath) -> bool {
        self.contains_directory(path) && !self.is_staging_directory(path)
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    /// Returns `true` when a blob is stored under the content key `key`.
    pub fn has_blob(&self, key: &VirtualPath) -> bool {
        self.blobs.contains_key(key)
    }

    /// Lists the visible entries of `path` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] when no directory node exists at `path`.
    pub fn list_directory(&self, path: &VirtualPath) -> Result<Vec<DirectoryEntry>, FsError> {
        Ok(self
            .entries(path)?
            .iter()
            .filter(|entry| !entry.is_hidden())
            .cloned()
            .collect())
    }

    /// Lists only the hidden staging mirrors stored in `path`.
    pub fn hidden_entries(&self, path: &VirtualPath) -> Result<Vec<DirectoryEntry>, FsError> {
        Ok(self
            .entries(path)?
            .iter()
            .filter(|entry| entry.is_hidden())
            .cloned()
            .collect())
    }

    /// Looks up a visible entry by name.
    pub fn entry(&self, path: &VirtualPath, name: &str) -> Result<&DirectoryEntry, FsError> {
        let entries = self.entries(path)?;
        visible_position(entries, name)
            .map(|idx| &entries[idx])
            .ok_or_else(|| FsError::NotFound(path.join(name).to_string()))
    }

    /// Adds a folder entry to `parent` and creates its empty directory node.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] when `parent` does not exist.
    /// - [`FsError::AlreadyExists`] when a visible entry already uses `name`.
    /// - [`FsError::InvalidOperation`] for malformed or reserved names.
    pub fn create_folder(
        &mut self,
        parent: &VirtualPath,
        name: &str,
    ) -> Result<DirectoryEntry, FsError> {
        self.validate_name(name)?;
        self.ensure_writable_directory(parent)?;
        self.ensure_name_free(parent, name)?;
        let child = parent.join(name);
        if self.directories.contains_key(&child) {
            return Err(already_exists(parent, name));
        }

        let entry = DirectoryEntry::folder(name);
        self.entries_mut(parent)?.push(entry.clone());
        self.directories.insert(child, Vec::new());
        debug!("created folder `{}`", parent.join(name));
        Ok(entry)
    }

    /// Adds a file entry to `parent` and stores `content` next to it.
    ///
    /// # Errors
    ///
    /// Same as [`VirtualFs::create_folder`].
    pub fn create_file(
        &mut self,
        parent: &VirtualPath,
        name: &str,
        content: Vec<u8>,
        size_bytes: u64,
    ) -> Result<DirectoryEntry, FsError> {
        self.validate_name(name)?;
        self.ensure_writable_directory(parent)?;
        self.ensure_name_free(parent, name)?;

        let entry = DirectoryEntry::file(name, size_bytes);
        self.entries_mut(parent)?.push(entry.clone());
        self.blobs.insert(parent.join(name), content);
        debug!("created file `{}` ({size_bytes} bytes)", parent.join(name));
        Ok(entry)
    }

    /// Deletes a visible entry.
    ///
    /// Folders take their whole subtree with them: every directory node and blob at or below
    /// `path/name`. Files drop their blob and, for uploads, their staging mirror.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] when the directory or entry does not exist.
    pub fn delete_entry(&mut self, path: &VirtualPath, name: &str) -> Result<(), FsError> {
        let entries = self.entries_mut(path)?;
        let idx = visible_position(entries, name)
            .ok_or_else(|| FsError::NotFound(path.join(name).to_string()))?;
        let entry = entries.remove(idx);

        match entry.kind() {
            EntryKind::Folder => {
                let folder = path.join(name);
                self.directories.retain(|key, _| !key.starts_with(&folder));
                self.blobs.retain(|key, _| !key.starts_with(&folder));
                debug!("deleted folder `{folder}` and its subtree");
            }
            EntryKind::File => {
                self.discard_content(path, &entry);
                debug!("deleted file `{}`", path.join(name));
            }
        }
        Ok(())
    }

    /// Renames a visible entry in place.
    ///
    /// Renaming a folder rewrites the keys of its whole subtree; renaming an uploaded file also
    /// renames its staging mirror and blob key.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] when the directory or `old_name` does not exist.
    /// - [`FsError::AlreadyExists`] when `new_name` is taken.
    /// - [`FsError::InvalidOperation`] for malformed or reserved names.
    pub fn rename_entry(
        &mut self,
        path: &VirtualPath,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), FsError> {
        let idx = visible_position(self.entries(path)?, old_name)
            .ok_or_else(|| FsError::NotFound(path.join(old_name).to_string()))?;
        if old_name == new_name {
            return Ok(());
        }
        self.validate_name(new_name)?;
        self.ensure_name_free(path, new_name)?;

        let entry = self.entries(path)?[idx].clone();
        let location = match entry.kind() {
            EntryKind::Folder => {
                let to = path.join(new_name);
                if self.directories.contains_key(&to) {
                    return Err(already_exists(path, new_name));
                }
                self.rebase_subtree(&path.join(old_name), &to);
                None
            }
            EntryKind::File => self.relocate_content(path, &entry, path, new_name),
        };

        let renamed = &mut self.entries_mut(path)?[idx];
        renamed.set_name(new_name);
        if !renamed.is_folder() {
            renamed.set_content_location(location);
        }
        debug!("renamed `{}` to `{new_name}`", path.join(old_name));
        Ok(())
    }

    /// Moves a visible entry from `source` into `target`, appending it to the target listing.
    ///
    /// Returns `Ok(false)` without touching anything when `source == target`.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] when either directory or the entry does not exist.
    /// - [`FsError::AlreadyExists`] when `target` already has a visible entry named `name`.
    /// - [`FsError::InvalidOperation`] when moving a folder into itself or a descendant, or into
    ///   a staging directory.
    pub fn move_entry(
        &mut self,
        name: &str,
        source: &VirtualPath,
        target: &VirtualPath,
    ) -> Result<bool, FsError> {
        if source == target {
            debug!("move of `{name}` skipped: source and target are both `{source}`");
            return Ok(false);
        }
        let idx = visible_position(self.entries(source)?, name)
            .ok_or_else(|| FsError::NotFound(source.join(name).to_string()))?;
        self.ensure_writable_directory(target)?;

        let from = source.join(name);
        let to = target.join(name);
        let is_folder = self.entries(source)?[idx].is_folder();
        if is_folder && *target == from {
            return Err(FsError::InvalidOperation(format!(
                "cannot move `{from}` into itself"
            )));
        }
        if is_folder && target.is_descendant_of(&from) {
            return Err(FsError::InvalidOperation(format!(
                "cannot move `{from}` into its own subfolder `{target}`"
            )));
        }
        self.ensure_name_free(target, name)?;
        if is_folder && self.directories.contains_key(&to) {
            return Err(already_exists(target, name));
        }

        let mut entry = self.entries_mut(source)?.remove(idx);
        if is_folder {
            self.rebase_subtree(&from, &to);
        } else {
            let location = self.relocate_content(source, &entry, target, name);
            entry.set_content_location(location);
        }
        self.entries_mut(target)?.push(entry);
        debug!("moved `{from}` to `{to}`");
        Ok(true)
    }

    /// Reads a file's content, following the upload indirection.
    ///
    /// Hidden mirrors can be read through their staging directory. A file whose content was
    /// never written reads as empty.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] when the directory or entry does not exist.
    /// - [`FsError::InvalidOperation`] when `name` is a folder.
    pub fn read_content(&self, path: &VirtualPath, name: &str) -> Result<Vec<u8>, FsError> {
        let entries = self.entries(path)?;
        let entry = visible_position(entries, name)
            .or_else(|| entries.iter().position(|entry| entry.name() == name))
            .map(|idx| &entries[idx])
            .ok_or_else(|| FsError::NotFound(path.join(name).to_string()))?;
        if entry.is_folder() {
            return Err(FsError::InvalidOperation(format!(
                "`{}` is a folder",
                path.join(name)
            )));
        }
        Ok(self
            .blobs
            .get(&content_key(path, entry))
            .cloned()
            .unwrap_or_default())
    }

    /// Replaces a file's content and refreshes its size and modification time.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] when the directory or entry does not exist.
    /// - [`FsError::InvalidOperation`] when `name` is a folder.
    pub fn write_content(
        &mut self,
        path: &VirtualPath,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), FsError> {
        let entries = self.entries(path)?;
        let idx = visible_position(entries, name)
            .ok_or_else(|| FsError::NotFound(path.join(name).to_string()))?;
        let entry = &entries[idx];
        if entry.is_folder() {
            return Err(FsError::InvalidOperation(format!(
                "`{}` is a folder",
                path.join(name)
            )));
        }

        let key = content_key(path, entry);
        let staging = entry.content_location().cloned();
        let size = bytes.len() as u64;
        self.blobs.insert(key, bytes);
        self.entries_mut(path)?[idx].record_write(size);
        if let Some(staging) = staging {
            if let Some(mirror) = self.mirror_mut(&staging, name) {
                mirror.record_write(size);
            }
        }
        debug!("wrote {size} bytes to `{}`", path.join(name));
        Ok(())
    }

    pub(crate) fn entries(&self, path: &VirtualPath) -> Result<&Vec<DirectoryEntry>, FsError> {
        self.directories
            .get(path)
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    pub(crate) fn entries_mut(
        &mut self,
        path: &VirtualPath,
    ) -> Result<&mut Vec<DirectoryEntry>, FsError> {
        self.directories
            .get_mut(path)
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    pub(crate) fn validate_name(&self, name: &str) -> Result<(), FsError> {
        if name.is_empty() || name != name.trim() {
            return Err(FsError::InvalidOperation(format!(
                "`{name}` is not a valid name"
            )));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(FsError::InvalidOperation(format!(
                "`{name}` is not a single path segment"
            )));
        }
        if name == self.staging_dir_name {
            return Err(FsError::InvalidOperation(format!(
                "`{name}` is reserved for uploads"
            )));
        }
        Ok(())
    }

    /// Fails unless `path` exists and is not a staging directory.
    pub(crate) fn ensure_writable_directory(&self, path: &VirtualPath) -> Result<(), FsError> {
        if !self.directories.contains_key(path) {
            return Err(FsError::NotFound(path.to_string()));
        }
        if self.is_staging_directory(path) {
            return Err(FsError::InvalidOperation(format!(
                "`{path}` is an upload staging directory"
            )));
        }
        Ok(())
    }

    pub(crate) fn ensure_name_free(&self, path: &VirtualPath, name: &str) -> Result<(), FsError> {
        if visible_position(self.entries(path)?, name).is_some() {
            return Err(already_exists(path, name));
        }
        Ok(())
    }

    /// Re-keys every directory node, blob, and content location at or below `from` onto `to`.
    fn rebase_subtree(&mut self, from: &VirtualPath, to: &VirtualPath) {
        let moved = self
            .directories
            .keys()
            .filter(|key| key.starts_with(from))
            .cloned()
            .collect::<Vec<_>>();
        for key in moved {
            if let (Some(entries), Some(new_key)) =
                (self.directories.remove(&key), key.rebase(from, to))
            {
                self.directories.insert(new_key, entries);
            }
        }

        let moved = self
            .blobs
            .keys()
            .filter(|key| key.starts_with(from))
            .cloned()
            .collect::<Vec<_>>();
        for key in moved {
            if let (Some(blob), Some(new_key)) = (self.blobs.remove(&key), key.rebase(from, to)) {
                self.blobs.insert(new_key, blob);
            }
        }

        for entry in self.directories.values_mut().flatten() {
            let rebased = entry
                .content_location()
                .and_then(|location| location.rebase(from, to));
            if rebased.is_some() {
                entry.set_content_location(rebased);
            }
        }
    }
}

pub(crate) fn visible_position(entries: &[DirectoryEntry], name: &str) -> Option<usize> {
    entries
        .iter()
        .position(|entry| !entry.is_hidden() && entry.name() == name)
}

fn already_exists(path: &VirtualPath, name: &str) -> FsError {
    FsError::AlreadyExists {
        directory: path.to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn path(raw: &str) -> VirtualPath {
        VirtualPath::parse(raw)
    }

    fn names(fs: &VirtualFs, dir: &str) -> Vec<String> {
        fs.list_directory(&path(dir))
            .expect("list")
            .iter()
            .map(|entry| entry.name().to_string())
            .collect()
    }

    #[test]
    fn seeded_tree_matches_starter_layout() {
        let fs = VirtualFs::seeded("uploads").expect("seeded");
        assert_eq!(names(&fs, "/"), vec!["Users"]);
        assert_eq!(names(&fs, "/Users"), vec!["Desktop", "Documents"]);
        assert_eq!(names(&fs, "/Users/Desktop"), vec!["Projeler", "notlar.txt"]);
        assert!(fs.contains_directory(&path("/Users/Desktop/Projeler")));
        assert_eq!(
            fs.read_content(&path("/Users/Desktop"), "notlar.txt")
                .expect("read"),
            Vec::<u8>::new()
        );
    }

    #[test]
    fn staging_name_must_be_one_segment() {
        for bad in ["", "  ", "a/b", "a\\b", ".", ".."] {
            assert!(
                matches!(VirtualFs::new(bad), Err(FsError::InvalidOperation(_))),
                "name={bad:?}"
            );
        }
        let fs = VirtualFs::new(" inbox ").expect("trimmed");
        assert_eq!(fs.staging_dir_name(), "inbox");
    }

    #[test]
    fn created_entries_list_once_in_insertion_order() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "b").expect("folder b");
        fs.create_file(&root, "a.txt", b"x".to_vec(), 1)
            .expect("file a");
        fs.create_folder(&root, "c").expect("folder c");
        assert_eq!(names(&fs, "/"), vec!["b", "a.txt", "c"]);
        assert!(fs.contains_directory(&path("/b")));
        assert!(!fs.contains_directory(&path("/a.txt")));
    }

    #[test]
    fn folder_named_like_existing_file_is_rejected_without_changes() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_file(&root, "report", Vec::new(), 0)
            .expect("file");
        let before = fs.clone();

        let err = fs.create_folder(&root, "report").expect_err("collision");
        assert_eq!(
            err,
            FsError::AlreadyExists {
                directory: "/".to_string(),
                name: "report".to_string()
            }
        );
        assert_eq!(fs, before);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "Docs").expect("Docs");
        fs.create_folder(&root, "docs").expect("docs");
        assert_eq!(names(&fs, "/"), vec!["Docs", "docs"]);
    }

    #[test]
    fn invalid_and_reserved_names_are_rejected() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        for bad in ["", " padded", "a/b", "a\\b", ".", "..", "uploads"] {
            assert!(
                matches!(
                    fs.create_folder(&root, bad),
                    Err(FsError::InvalidOperation(_))
                ),
                "name={bad:?}"
            );
        }
        assert_eq!(fs.directory_count(), 1);
    }

    #[test]
    fn create_in_missing_parent_is_not_found() {
        let mut fs = VirtualFs::default();
        assert_eq!(
            fs.create_folder(&path("/missing"), "x"),
            Err(FsError::NotFound("/missing".to_string()))
        );
        assert_eq!(
            fs.list_directory(&path("/missing")),
            Err(FsError::NotFound("/missing".to_string()))
        );
    }

    #[test]
    fn deleting_folder_keeps_sibling_with_shared_prefix() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "Foo").expect("Foo");
        fs.create_folder(&root, "Foo2").expect("Foo2");
        fs.create_folder(&path("/Foo"), "inner").expect("inner");
        fs.create_file(&path("/Foo/inner"), "a.txt", b"a".to_vec(), 1)
            .expect("a");
        fs.create_file(&path("/Foo2"), "b.txt", b"b".to_vec(), 1)
            .expect("b");

        fs.delete_entry(&root, "Foo").expect("delete Foo");

        assert_eq!(names(&fs, "/"), vec!["Foo2"]);
        assert!(!fs.contains_directory(&path("/Foo")));
        assert!(!fs.contains_directory(&path("/Foo/inner")));
        assert!(!fs.has_blob(&path("/Foo/inner/a.txt")));
        assert!(fs.contains_directory(&path("/Foo2")));
        assert_eq!(
            fs.read_content(&path("/Foo2"), "b.txt").expect("read"),
            b"b".to_vec()
        );
    }

    #[test]
    fn deleting_missing_entry_is_not_found() {
        let mut fs = VirtualFs::default();
        assert_eq!(
            fs.delete_entry(&VirtualPath::root(), "ghost"),
            Err(FsError::NotFound("/ghost".to_string()))
        );
    }

    #[test]
    fn deleting_file_drops_its_blob() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_file(&root, "a.txt", b"a".to_vec(), 1).expect("a");
        fs.delete_entry(&root, "a.txt").expect("delete");
        assert_eq!(fs.blob_count(), 0);
        assert!(names(&fs, "/").is_empty());
    }

    #[test]
    fn renaming_folder_preserves_subtree_content() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "Old").expect("Old");
        fs.create_folder(&root, "Older").expect("Older");
        fs.create_folder(&path("/Old"), "sub").expect("sub");
        fs.create_file(&path("/Old/sub"), "bin.dat", vec![0, 159, 255], 3)
            .expect("bin");
        fs.create_file(&path("/Older"), "keep.txt", b"k".to_vec(), 1)
            .expect("keep");

        fs.rename_entry(&root, "Old", "New").expect("rename");

        assert_eq!(names(&fs, "/"), vec!["New", "Older"]);
        assert_eq!(names(&fs, "/New"), vec!["sub"]);
        assert_eq!(
            fs.read_content(&path("/New/sub"), "bin.dat").expect("read"),
            vec![0, 159, 255]
        );
        assert!(!fs.contains_directory(&path("/Old")));
        assert!(!fs.contains_directory(&path("/Old/sub")));
        assert_eq!(
            fs.read_content(&path("/Older"), "keep.txt").expect("read"),
            b"k".to_vec()
        );
    }

    #[test]
    fn renaming_file_moves_its_blob() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_file(&root, "a.txt", b"hello".to_vec(), 5)
            .expect("a");
        fs.rename_entry(&root, "a.txt", "b.txt").expect("rename");
        assert_eq!(
            fs.read_content(&root, "b.txt").expect("read"),
            b"hello".to_vec()
        );
        assert!(!fs.has_blob(&path("/a.txt")));
    }

    #[test]
    fn rename_collision_leaves_store_unchanged() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "a").expect("a");
        fs.create_file(&root, "b", Vec::new(), 0).expect("b");
        let before = fs.clone();
        assert!(matches!(
            fs.rename_entry(&root, "a", "b"),
            Err(FsError::AlreadyExists { .. })
        ));
        assert_eq!(fs, before);
        fs.rename_entry(&root, "a", "a")
            .expect("same-name rename is a no-op");
        assert_eq!(fs, before);
    }

    #[test]
    fn moving_folder_rekeys_subtree_across_directories() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "src").expect("src");
        fs.create_folder(&root, "dst").expect("dst");
        fs.create_folder(&path("/src"), "pkg").expect("pkg");
        fs.create_file(&path("/src/pkg"), "lib.txt", b"lib".to_vec(), 3)
            .expect("lib");

        assert!(fs
            .move_entry("pkg", &path("/src"), &path("/dst"))
            .expect("move"));

        assert!(names(&fs, "/src").is_empty());
        assert_eq!(names(&fs, "/dst"), vec!["pkg"]);
        assert_eq!(
            fs.read_content(&path("/dst/pkg"), "lib.txt").expect("read"),
            b"lib".to_vec()
        );
        assert!(!fs.contains_directory(&path("/src/pkg")));
    }

    #[test]
    fn moving_into_same_directory_is_a_noop() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "a").expect("a");
        let before = fs.clone();
        assert!(!fs.move_entry("a", &root, &root).expect("noop"));
        assert_eq!(fs, before);
    }

    #[test]
    fn moving_folder_into_itself_or_descendant_is_invalid() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "a").expect("a");
        fs.create_folder(&path("/a"), "b").expect("b");
        let before = fs.clone();

        assert!(matches!(
            fs.move_entry("a", &root, &path("/a")),
            Err(FsError::InvalidOperation(_))
        ));
        assert_eq!(
            fs.move_entry("a", &root, &path("/a/b")),
            Err(FsError::InvalidOperation(
                "cannot move `/a` into its own subfolder `/a/b`".to_string()
            ))
        );
        assert_eq!(fs, before);

        fs.create_folder(&root, "a2").expect("a2");
        assert_eq!(fs.move_entry("a", &root, &path("/a2")), Ok(true));
        assert!(fs.contains_directory(&path("/a2/a/b")));
    }

    #[test]
    fn moving_onto_taken_name_or_missing_target_fails() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "dst").expect("dst");
        fs.create_file(&root, "x.txt", Vec::new(), 0).expect("x");
        fs.create_file(&path("/dst"), "x.txt", Vec::new(), 0)
            .expect("dst x");
        let before = fs.clone();

        assert!(matches!(
            fs.move_entry("x.txt", &root, &path("/dst")),
            Err(FsError::AlreadyExists { .. })
        ));
        assert_eq!(
            fs.move_entry("x.txt", &root, &path("/nowhere")),
            Err(FsError::NotFound("/nowhere".to_string()))
        );
        assert_eq!(
            fs.move_entry("ghost", &root, &path("/dst")),
            Err(FsError::NotFound("/ghost".to_string()))
        );
        assert_eq!(fs, before);
    }

    #[test]
    fn write_then_read_round_trips_arbitrary_bytes() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_file(&root, "blob.bin", Vec::new(), 0)
            .expect("file");
        let payload = (0..=255).collect::<Vec<u8>>();

        fs.write_content(&root, "blob.bin", payload.clone())
            .expect("write");

        assert_eq!(fs.read_content(&root, "blob.bin").expect("read"), payload);
        assert_eq!(
            fs.entry(&root, "blob.bin").expect("entry").size_bytes(),
            Some(256)
        );
    }

    #[test]
    fn content_operations_reject_folders() {
        let mut fs = VirtualFs::default();
        let root = VirtualPath::root();
        fs.create_folder(&root, "dir").expect("dir");
        assert!(matches!(
            fs.read_content(&root, "dir"),
            Err(FsError::InvalidOperation(_))
        ));
        assert!(matches!(
            fs.write_content(&root, "dir", Vec::new()),
            Err(FsError::InvalidOperation(_))
        ));
    }
}

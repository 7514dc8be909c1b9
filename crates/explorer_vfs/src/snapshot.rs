//! Conversion between [`VirtualFs`] and its two persisted records.
//!
//! The directory record maps canonical directory paths to their entry lists. The content
//! record maps content keys to base64-encoded blobs.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::warn;
use platform_host::VirtualPath;

use crate::entry::DirectoryEntry;
use crate::vfs::VirtualFs;

/// Persisted directory map: canonical path -> ordered entries.
pub type DirectoryRecord = BTreeMap<String, Vec<DirectoryEntry>>;
/// Persisted content map: content key -> base64 blob.
pub type ContentRecord = BTreeMap<String, String>;

impl VirtualFs {
    /// Builds the persisted directory record.
    pub fn directory_record(&self) -> DirectoryRecord {
        self.directories
            .iter()
            .map(|(path, entries)| (path.to_string(), entries.clone()))
            .collect()
    }

    /// Builds the persisted content record.
    pub fn content_record(&self) -> ContentRecord {
        self.blobs
            .iter()
            .map(|(key, blob)| (key.to_string(), STANDARD.encode(blob)))
            .collect()
    }

    /// Rebuilds a store from its persisted records.
    ///
    /// A missing root is recreated, and folder entries whose directory node is missing get an
    /// empty one, so a partially written snapshot still opens.
    ///
    /// # Errors
    ///
    /// Returns an error when two keys normalize to the same path or a blob is not valid base64.
    pub fn from_records(
        directories: DirectoryRecord,
        contents: ContentRecord,
        staging_dir_name: &str,
    ) -> Result<Self, String> {
        let mut fs = Self::new(staging_dir_name).map_err(|err| err.to_string())?;
        fs.directories.clear();

        for (raw, entries) in directories {
            let path = VirtualPath::parse(&raw);
            if fs.directories.insert(path.clone(), entries).is_some() {
                return Err(format!("duplicate directory key `{raw}` (as `{path}`)"));
            }
        }
        fs.directories.entry(VirtualPath::root()).or_default();

        let missing = fs
            .directories
            .iter()
            .flat_map(|(path, entries)| {
                entries
                    .iter()
                    .filter(|entry| entry.is_folder())
                    .map(move |entry| path.join(entry.name()))
            })
            .filter(|child| !fs.directories.contains_key(child))
            .collect::<Vec<_>>();
        for child in missing {
            warn!("snapshot is missing directory node `{child}`; recreating it empty");
            fs.directories.insert(child, Vec::new());
        }

        for (raw, encoded) in contents {
            let blob = STANDARD
                .decode(encoded.as_bytes())
                .map_err(|err| format!("content `{raw}` is not valid base64: {err}"))?;
            fs.blobs.insert(VirtualPath::parse(&raw), blob);
        }
        Ok(fs)
    }
}

//! Directory entry records stored in each directory listing.

use platform_host::{size_label, stamp_after, unix_time_ms_now, VirtualPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Entry kind without kind-specific data.
pub enum EntryKind {
    /// A folder backed by its own directory node.
    Folder,
    /// A file backed by a content blob.
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
/// One file or folder inside a directory listing.
pub enum DirectoryEntry {
    /// Folder entry.
    Folder {
        /// Name, unique among visible entries of the parent.
        name: String,
        /// Creation time in unix milliseconds.
        modified_at_unix_ms: u64,
    },
    /// File entry.
    File {
        /// Name, unique among visible entries of the parent.
        name: String,
        /// Creation or last content write time in unix milliseconds.
        modified_at_unix_ms: u64,
        /// Content size in bytes.
        size_bytes: u64,
        /// Staging directory holding the content blob, for uploaded files.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_location: Option<VirtualPath>,
        /// Marks staging mirrors that never appear in listings.
        #[serde(default, skip_serializing_if = "is_false")]
        hidden_from_listing: bool,
    },
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl DirectoryEntry {
    /// Builds a folder entry stamped with the current time.
    pub fn folder(name: impl Into<String>) -> Self {
        Self::Folder {
            name: name.into(),
            modified_at_unix_ms: unix_time_ms_now(),
        }
    }

    /// Builds a visible file entry whose content lives next to it.
    pub fn file(name: impl Into<String>, size_bytes: u64) -> Self {
        Self::File {
            name: name.into(),
            modified_at_unix_ms: unix_time_ms_now(),
            size_bytes,
            content_location: None,
            hidden_from_listing: false,
        }
    }

    /// Builds a visible file entry whose content lives in `staging`.
    pub fn uploaded(name: impl Into<String>, size_bytes: u64, staging: VirtualPath) -> Self {
        Self::File {
            name: name.into(),
            modified_at_unix_ms: unix_time_ms_now(),
            size_bytes,
            content_location: Some(staging),
            hidden_from_listing: false,
        }
    }

    /// Builds the hidden staging mirror of an uploaded file.
    pub fn staging_mirror(name: impl Into<String>, size_bytes: u64) -> Self {
        Self::File {
            name: name.into(),
            modified_at_unix_ms: unix_time_ms_now(),
            size_bytes,
            content_location: None,
            hidden_from_listing: true,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name, .. } | Self::File { name, .. } => name,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Folder { .. } => EntryKind::Folder,
            Self::File { .. } => EntryKind::File,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    pub fn modified_at_unix_ms(&self) -> u64 {
        match self {
            Self::Folder {
                modified_at_unix_ms,
                ..
            }
            | Self::File {
                modified_at_unix_ms,
                ..
            } => *modified_at_unix_ms,
        }
    }

    /// Content size for files, `None` for folders.
    pub fn size_bytes(&self) -> Option<u64> {
        match self {
            Self::Folder { .. } => None,
            Self::File { size_bytes, .. } => Some(*size_bytes),
        }
    }

    /// Display size (`"3 KB"`) for files.
    pub fn size_label(&self) -> Option<String> {
        self.size_bytes().map(size_label)
    }

    /// Staging directory holding this file's content, when it was uploaded.
    pub fn content_location(&self) -> Option<&VirtualPath> {
        match self {
            Self::File {
                content_location, ..
            } => content_location.as_ref(),
            Self::Folder { .. } => None,
        }
    }

    /// Returns `true` for staging mirrors.
    pub fn is_hidden(&self) -> bool {
        matches!(
            self,
            Self::File {
                hidden_from_listing: true,
                ..
            }
        )
    }

    pub(crate) fn set_name(&mut self, new_name: &str) {
        match self {
            Self::Folder { name, .. } | Self::File { name, .. } => *name = new_name.to_string(),
        }
    }

    pub(crate) fn set_content_location(&mut self, location: Option<VirtualPath>) {
        if let Self::File {
            content_location, ..
        } = self
        {
            *content_location = location;
        }
    }

    /// Records a content rewrite: new size and a modification stamp later than the previous one.
    pub(crate) fn record_write(&mut self, new_size: u64) {
        if let Self::File {
            size_bytes,
            modified_at_unix_ms,
            ..
        } = self
        {
            *size_bytes = new_size;
            *modified_at_unix_ms = stamp_after(*modified_at_unix_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn folder_serializes_with_type_tag() {
        let entry = DirectoryEntry::Folder {
            name: "Users".to_string(),
            modified_at_unix_ms: 7,
        };
        assert_eq!(
            serde_json::to_value(&entry).expect("serialize"),
            json!({"type": "folder", "name": "Users", "modified_at_unix_ms": 7})
        );
    }

    #[test]
    fn plain_file_omits_upload_fields() {
        let entry = DirectoryEntry::File {
            name: "notlar.txt".to_string(),
            modified_at_unix_ms: 1,
            size_bytes: 12,
            content_location: None,
            hidden_from_listing: false,
        };
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(
            value,
            json!({
                "type": "file",
                "name": "notlar.txt",
                "modified_at_unix_ms": 1,
                "size_bytes": 12,
            })
        );
        let back: DirectoryEntry = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, entry);
    }

    #[test]
    fn uploaded_file_keeps_content_location() {
        let entry = DirectoryEntry::uploaded("a.png", 2048, VirtualPath::parse("/Docs/uploads"));
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["content_location"], json!("/Docs/uploads"));
        assert_eq!(entry.size_label().as_deref(), Some("2 KB"));
        assert!(!entry.is_hidden());
        assert!(DirectoryEntry::staging_mirror("a.png", 2048).is_hidden());
    }

    #[test]
    fn record_write_updates_size_and_stamp() {
        let mut entry = DirectoryEntry::file("a.txt", 1);
        let before = entry.modified_at_unix_ms();
        entry.record_write(99);
        assert_eq!(entry.size_bytes(), Some(99));
        assert!(entry.modified_at_unix_ms() > before);

        let mut folder = DirectoryEntry::folder("f");
        folder.record_write(5);
        assert_eq!(folder.size_bytes(), None);
    }

    #[test]
    fn rewrite_stamp_advances_past_a_future_stamp() {
        let future = unix_time_ms_now() + 60_000;
        let mut entry = DirectoryEntry::File {
            name: "skewed.txt".to_string(),
            modified_at_unix_ms: future,
            size_bytes: 0,
            content_location: None,
            hidden_from_listing: false,
        };
        entry.record_write(3);
        assert_eq!(entry.modified_at_unix_ms(), future + 1);
    }
}

//! Explorer file-kind and storage-key definitions shared across host contracts and adapters.

use serde::{Deserialize, Serialize};

/// localStorage key holding the serialized directory map.
pub const FILE_SYSTEM_STORAGE_KEY: &str = "fileSystem";
/// localStorage key holding the serialized content-blob map.
pub const FILE_CONTENTS_STORAGE_KEY: &str = "fileContents";

/// Image extensions accepted for upload and preview.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "avif", "webp", "gif"];
/// Text extensions accepted for upload and editing.
pub const DEFAULT_TEXT_EXTENSIONS: [&str; 1] = ["txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Preview category derived from a file extension.
pub enum FileCategory {
    /// Raster image, previewed in the image viewer.
    Image,
    /// Plain text, opened in the editor.
    Text,
}

impl FileCategory {
    /// Encoding used when decoding an uploaded file of this category.
    pub fn upload_encoding(self) -> UploadEncoding {
        match self {
            Self::Image => UploadEncoding::DataUrl,
            Self::Text => UploadEncoding::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// How an upload source should decode its bytes before they are stored.
pub enum UploadEncoding {
    /// UTF-8 text, stored as-is.
    Text,
    /// `data:<mime>;base64,<payload>` URL, directly usable as an image source.
    DataUrl,
}

/// Returns the MIME type used for `data:` URLs of the given (lower-case) extension.
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "avif" => "image/avif",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Formats a byte count the way the explorer displays file sizes (`ceil(bytes / 1024) KB`).
pub fn size_label(size_bytes: u64) -> String {
    format!("{} KB", size_bytes.div_ceil(1024))
}

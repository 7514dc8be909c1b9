//! Upload-source contracts used to decode user-selected files into storable content.

use std::{future::Future, pin::Pin};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::path::file_extension;
use super::types::{mime_type_for_extension, UploadEncoding};

/// Object-safe boxed future used by [`UploadSource`] async methods.
pub type UploadReadFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A single user-selected file waiting to be decoded.
pub trait UploadSource {
    /// Base name of the selected file.
    fn name(&self) -> &str;

    /// Size of the original file in bytes.
    fn size_bytes(&self) -> u64;

    /// Decodes the file contents with the requested encoding.
    fn read<'a>(
        &'a self,
        encoding: UploadEncoding,
    ) -> UploadReadFuture<'a, Result<Vec<u8>, String>>;
}

impl<U: UploadSource + ?Sized> UploadSource for Box<U> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn size_bytes(&self) -> u64 {
        (**self).size_bytes()
    }

    fn read<'a>(
        &'a self,
        encoding: UploadEncoding,
    ) -> UploadReadFuture<'a, Result<Vec<u8>, String>> {
        (**self).read(encoding)
    }
}

/// Builds a `data:` URL for `bytes`, picking the MIME type from `name`'s extension.
pub fn data_url_for(name: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type_for_extension(&file_extension(name)),
        STANDARD.encode(bytes)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// In-memory upload source for tests and non-browser hosts.
pub struct MemoryUploadSource {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryUploadSource {
    /// Creates an upload source holding `bytes` under `name`.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl UploadSource for MemoryUploadSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read<'a>(
        &'a self,
        encoding: UploadEncoding,
    ) -> UploadReadFuture<'a, Result<Vec<u8>, String>> {
        Box::pin(async move {
            match encoding {
                UploadEncoding::Text => String::from_utf8(self.bytes.clone())
                    .map(String::into_bytes)
                    .map_err(|err| format!("`{}` is not valid UTF-8 text: {err}", self.name)),
                UploadEncoding::DataUrl => Ok(data_url_for(&self.name, &self.bytes).into_bytes()),
            }
        })
    }
}

//! Error types for explorer commands.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Recoverable filesystem errors. The store is left unchanged whenever one is returned.
pub enum FsError {
    /// The path or entry does not exist.
    #[error("`{0}` was not found")]
    NotFound(String),
    /// The name is already taken by a visible entry in the directory.
    #[error("an entry named `{name}` already exists in `{directory}`")]
    AlreadyExists {
        /// Directory that already holds the name.
        directory: String,
        /// Conflicting entry name.
        name: String,
    },
    /// The request is well-formed but not allowed (wrong kind, reserved name, self-move).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// The file extension is not on the upload allow-list.
    #[error("unsupported file type for `{name}`")]
    UnsupportedType {
        /// Rejected file name.
        name: String,
    },
    /// Decoding an uploaded file's content failed.
    #[error("failed to read `{name}`: {reason}")]
    ReadFailure {
        /// File that could not be read.
        name: String,
        /// Reader error message.
        reason: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors returned by [`crate::ExplorerSession`] commands.
pub enum ExplorerError {
    /// A user-level filesystem error; nothing was changed.
    #[error(transparent)]
    Fs(#[from] FsError),
    /// The in-memory change succeeded but could not be written to durable storage.
    #[error("persisting explorer snapshot failed: {0}")]
    Persistence(String),
    /// The stored snapshot could not be decoded at startup.
    #[error("stored explorer snapshot is unreadable: {0}")]
    CorruptSnapshot(String),
    /// Configuration could not be parsed.
    #[error("invalid explorer config: {0}")]
    Config(String),
}

impl ExplorerError {
    /// Returns `true` for storage-layer failures that a user cannot fix by retrying the command.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Fs(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_item() {
        let err = FsError::AlreadyExists {
            directory: "/Users".to_string(),
            name: "Desktop".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "an entry named `Desktop` already exists in `/Users`"
        );
        assert_eq!(
            FsError::NotFound("/nope".to_string()).to_string(),
            "`/nope` was not found"
        );
    }

    #[test]
    fn only_storage_errors_are_fatal() {
        assert!(!ExplorerError::from(FsError::NotFound("/x".to_string())).is_fatal());
        assert!(ExplorerError::Persistence("quota".to_string()).is_fatal());
        assert!(ExplorerError::CorruptSnapshot("bad json".to_string()).is_fatal());
    }
}

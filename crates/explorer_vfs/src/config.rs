//! Explorer configuration: storage keys, staging directory, and the upload allow-list.

use platform_host::{
    file_extension, FileCategory, DEFAULT_IMAGE_EXTENSIONS, DEFAULT_TEXT_EXTENSIONS,
    FILE_CONTENTS_STORAGE_KEY, FILE_SYSTEM_STORAGE_KEY,
};
use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

/// Default name of the per-directory upload staging directory.
pub const DEFAULT_STAGING_DIR_NAME: &str = "uploads";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Explorer settings. Every field has a default, so partial TOML documents are accepted.
pub struct ExplorerConfig {
    /// Storage key of the directory-map record.
    pub file_system_key: String,
    /// Storage key of the content-blob record.
    pub file_contents_key: String,
    /// Reserved name of the hidden staging directory created inside upload targets.
    pub staging_dir_name: String,
    /// Lower-case image extensions accepted for upload.
    pub image_extensions: Vec<String>,
    /// Lower-case text extensions accepted for upload.
    pub text_extensions: Vec<String>,
    /// Seed the starter folder tree when no snapshot is stored yet.
    pub seed_default_tree: bool,
}

/// Returns the trimmed staging name, or an error when it cannot be one path segment.
pub(crate) fn checked_staging_dir_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(format!(
            "staging_dir_name `{raw}` is not a single path segment"
        ));
    }
    Ok(name.to_string())
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            file_system_key: FILE_SYSTEM_STORAGE_KEY.to_string(),
            file_contents_key: FILE_CONTENTS_STORAGE_KEY.to_string(),
            staging_dir_name: DEFAULT_STAGING_DIR_NAME.to_string(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.map(String::from).to_vec(),
            text_extensions: DEFAULT_TEXT_EXTENSIONS.map(String::from).to_vec(),
            seed_default_tree: true,
        }
    }
}

impl ExplorerConfig {
    /// Parses a TOML document, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Config`] for malformed TOML or an unusable staging name.
    pub fn from_toml_str(raw: &str) -> Result<Self, ExplorerError> {
        let mut config: Self =
            toml::from_str(raw).map_err(|err| ExplorerError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Trims the staging name and lower-cases the extension lists in place.
    ///
    /// Configs built in code go through this when a session opens.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Config`] when the staging name is not a single path segment.
    pub fn validate(&mut self) -> Result<(), ExplorerError> {
        self.staging_dir_name =
            checked_staging_dir_name(&self.staging_dir_name).map_err(ExplorerError::Config)?;
        for ext in self
            .image_extensions
            .iter_mut()
            .chain(self.text_extensions.iter_mut())
        {
            *ext = ext.trim_start_matches('.').to_ascii_lowercase();
        }
        Ok(())
    }

    /// Classifies `name` by extension, or `None` when it is not on the allow-list.
    pub fn category_for(&self, name: &str) -> Option<FileCategory> {
        let ext = file_extension(name);
        if ext.is_empty() {
            return None;
        }
        if self.image_extensions.iter().any(|allowed| *allowed == ext) {
            Some(FileCategory::Image)
        } else if self.text_extensions.iter().any(|allowed| *allowed == ext) {
            Some(FileCategory::Text)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_builtin_allow_list() {
        let config = ExplorerConfig::default();
        assert_eq!(config.staging_dir_name, "uploads");
        assert_eq!(config.file_system_key, "fileSystem");
        assert_eq!(config.category_for("cat.GIF"), Some(FileCategory::Image));
        assert_eq!(config.category_for("notes.txt"), Some(FileCategory::Text));
        assert_eq!(config.category_for("setup.exe"), None);
        assert_eq!(config.category_for("Makefile"), None);
    }

    #[test]
    fn partial_toml_keeps_defaults_and_normalizes_extensions() {
        let config = ExplorerConfig::from_toml_str(
            r#"
staging_dir_name = "  .staging "
text_extensions = [".TXT", "md"]
"#,
        )
        .expect("parse config");
        assert_eq!(config.staging_dir_name, ".staging");
        assert_eq!(
            config.text_extensions,
            vec!["txt".to_string(), "md".to_string()]
        );
        assert_eq!(config.image_extensions.len(), 6);
        assert!(config.seed_default_tree);
        assert_eq!(config.category_for("README.md"), Some(FileCategory::Text));
    }

    #[test]
    fn rejects_multi_segment_staging_name() {
        let err = ExplorerConfig::from_toml_str("staging_dir_name = \"a/b\"")
            .expect_err("nested staging name");
        assert!(matches!(err, ExplorerError::Config(_)));
    }

    #[test]
    fn validate_catches_configs_built_in_code() {
        let mut config = ExplorerConfig {
            staging_dir_name: String::new(),
            ..ExplorerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ExplorerError::Config(_))));

        let mut config = ExplorerConfig {
            staging_dir_name: " inbox ".to_string(),
            image_extensions: vec![".PNG".to_string()],
            ..ExplorerConfig::default()
        };
        config.validate().expect("valid");
        assert_eq!(config.staging_dir_name, "inbox");
        assert_eq!(config.category_for("a.png"), Some(FileCategory::Image));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ExplorerConfig::from_toml_str("seed_default_tree = maybe").is_err());
    }
}

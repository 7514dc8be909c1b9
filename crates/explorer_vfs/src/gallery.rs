//! Image viewer cursor over the images of one directory listing.

use platform_host::FileCategory;

use crate::config::ExplorerConfig;
use crate::entry::DirectoryEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered image names from one listing and the one currently shown.
pub struct ImageGallery {
    names: Vec<String>,
    index: usize,
}

impl ImageGallery {
    /// Collects the image files of `listing` and selects `selected`.
    ///
    /// Returns `None` when `selected` is not one of those images.
    pub fn open(
        listing: &[DirectoryEntry],
        selected: &str,
        config: &ExplorerConfig,
    ) -> Option<Self> {
        let names = listing
            .iter()
            .filter(|entry| {
                !entry.is_folder() && config.category_for(entry.name()) == Some(FileCategory::Image)
            })
            .map(|entry| entry.name().to_string())
            .collect::<Vec<_>>();
        let index = names.iter().position(|name| name == selected)?;
        Some(Self { names, index })
    }

    pub fn current(&self) -> &str {
        &self.names[self.index]
    }

    /// One-based position and total count, e.g. `(2, 5)` for "2 / 5".
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.names.len())
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.names.len()
    }

    /// Steps back; stays on the first image.
    pub fn previous(&mut self) -> Option<&str> {
        if !self.has_previous() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Steps forward; stays on the last image.
    pub fn next(&mut self) -> Option<&str> {
        if !self.has_next() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}

//! Back/forward navigation history.

use platform_host::VirtualPath;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Visited paths plus a cursor that always points at a valid slot.
///
/// Paths are plain values; a path may stop existing after it was visited, so callers check the
/// store before moving the cursor (see [`NavigationHistory::peek_back`]).
pub struct NavigationHistory {
    entries: Vec<VirtualPath>,
    cursor: usize,
}

impl NavigationHistory {
    /// Starts a history positioned at `start`.
    pub fn new(start: VirtualPath) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    /// Path under the cursor.
    pub fn current(&self) -> &VirtualPath {
        &self.entries[self.cursor]
    }

    /// Drops forward entries and appends `path`.
    ///
    /// Navigating to the path already under the cursor still appends a new slot.
    pub fn navigate_to(&mut self, path: VirtualPath) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path);
        self.cursor = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Path one step back, without moving.
    pub fn peek_back(&self) -> Option<&VirtualPath> {
        self.cursor
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
    }

    /// Path one step forward, without moving.
    pub fn peek_forward(&self) -> Option<&VirtualPath> {
        self.entries.get(self.cursor + 1)
    }

    /// Moves one step back and returns the new current path.
    pub fn go_back(&mut self) -> Option<&VirtualPath> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Moves one step forward and returns the new current path.
    pub fn go_forward(&mut self) -> Option<&VirtualPath> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// All slots, oldest first.
    pub fn entries(&self) -> &[VirtualPath] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(VirtualPath::root())
    }
}

//! Canonical virtual-path keys shared by the explorer store and its persistence adapters.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used by canonical virtual paths.
pub const PATH_SEPARATOR: char = '/';

/// Returns the lower-cased extension of `name`, or an empty string when there is none.
///
/// Only the text after the final `.` counts, and a leading dot (`.profile`) is not an extension.
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Canonical virtual path stored as an ordered list of segments.
///
/// Ancestor checks compare whole segments, so `/Foo` is never treated as a prefix of `/FooBar`.
pub struct VirtualPath {
    segments: Vec<String>,
}

impl VirtualPath {
    /// Returns the root path (`/`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses and normalizes a raw path string.
    ///
    /// Trims whitespace, converts backslashes to `/`, and resolves `.` and `..`. Empty or
    /// fully-collapsed input parses as the root.
    pub fn parse(raw: &str) -> Self {
        let mut segments: Vec<String> = Vec::new();
        for segment in raw.trim().replace('\\', "/").split(PATH_SEPARATOR) {
            let segment = segment.trim();
            if segment.is_empty() || segment == "." {
                continue;
            }
            if segment == ".." {
                segments.pop();
                continue;
            }
            segments.push(segment.to_string());
        }
        Self { segments }
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the path segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns a new path with `name` appended as a single segment.
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Returns the parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Returns the final segment, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns the lower-cased extension of the final segment.
    pub fn extension(&self) -> String {
        self.file_name().map(file_extension).unwrap_or_default()
    }

    /// Returns `true` when `self` equals `ancestor` or lies below it.
    pub fn starts_with(&self, ancestor: &VirtualPath) -> bool {
        self.segments.len() >= ancestor.segments.len()
            && self.segments[..ancestor.segments.len()] == ancestor.segments[..]
    }

    /// Returns `true` when `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &VirtualPath) -> bool {
        self.segments.len() > ancestor.segments.len() && self.starts_with(ancestor)
    }

    /// Replaces the `from` prefix with `to`.
    ///
    /// Returns `None` when `self` is not `from` or one of its descendants.
    pub fn rebase(&self, from: &VirtualPath, to: &VirtualPath) -> Option<Self> {
        if !self.starts_with(from) {
            return None;
        }
        let mut segments = to.segments.clone();
        segments.extend_from_slice(&self.segments[from.segments.len()..]);
        Some(Self { segments })
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "{PATH_SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for VirtualPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VirtualPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

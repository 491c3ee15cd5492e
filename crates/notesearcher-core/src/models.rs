//! Core data models shared by the index, the link graph and the orchestration layer.
//!
//! Paths are plain strings in the host's convention. Nothing here normalizes
//! them; equality between paths is exact string equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Extensions (without the dot) of files that are indexed as notes.
///
/// Matching is case-sensitive: `notes.MD` is not a note.
pub const NOTE_EXTENSIONS: [&str; 3] = ["md", "txt", "log"];

/// Whether a path names a note file that should be indexed.
pub fn is_note_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| NOTE_EXTENSIONS.contains(&ext))
}

/// A note loaded from the corpus.
///
/// `tags` is derived from `text` during indexing, deduplicated and in
/// first-seen order. It is never authored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub path: String,
    pub text: String,
    pub tags: Vec<String>,
}

impl Document {
    /// Create a document with precomputed tags
    pub fn new(path: impl Into<String>, text: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            tags,
        }
    }
}

/// A link found in a note.
///
/// Before resolution `target_path` holds the destination exactly as authored;
/// after resolution it is an absolute path in the active [`PathStyle`](crate::PathStyle).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source_path: String,
    pub target_path: String,
    /// 1-based line of the link in the source note
    pub source_line: usize,
}

impl Link {
    pub fn new(
        source_path: impl Into<String>,
        target_path: impl Into<String>,
        source_line: usize,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
            source_line,
        }
    }
}

/// A resolved link whose target is not a known document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeadLink {
    pub source_path: String,
    pub target_path: String,
    pub source_line: usize,
}

impl From<Link> for DeadLink {
    fn from(link: Link) -> Self {
        Self {
            source_path: link.source_path,
            target_path: link.target_path,
            source_line: link.source_line,
        }
    }
}

impl fmt::Display for DeadLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: dead link to {}",
            self.source_path, self.source_line, self.target_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_extensions_are_case_sensitive() {
        assert!(is_note_path("/a/b.md"));
        assert!(is_note_path("/a/b.txt"));
        assert!(is_note_path("c.log"));
        assert!(!is_note_path("/a/b.MD"));
        assert!(!is_note_path("/a/b.md.bak"));
        assert!(!is_note_path("/a/image.png"));
        assert!(!is_note_path("/a/md"));
    }

    #[test]
    fn test_dead_link_display() {
        let dead = DeadLink::from(Link::new("/a.md", "/b.txt", 3));
        assert_eq!(dead.to_string(), "/a.md:3: dead link to /b.txt");
    }
}

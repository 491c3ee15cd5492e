//! Lexical path resolution for link targets.
//!
//! Links in notes are authored either as absolute paths or relative to the
//! note that contains them. Resolution here never touches the file system and
//! works for targets that do not exist. A [`PathStyle`] is picked once, normally with
//! [`PathStyle::host`], and used for every resolution in the process.
//!
//! ```
//! use notesearcher_core::PathStyle;
//!
//! let posix = PathStyle::Posix;
//! assert_eq!(posix.resolve("/b/c", "../../a.md"), "/a.md");
//! assert_eq!(posix.resolve("/a", "c/d.txt"), "/a/c/d.txt");
//!
//! let windows = PathStyle::Windows;
//! assert_eq!(windows.resolve("c:\\b\\c", "..\\..\\a.md"), "c:\\a.md");
//! ```

use serde::{Deserialize, Serialize};

/// Path convention used to resolve and compare paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStyle {
    /// `/`-separated paths rooted at `/`
    Posix,
    /// `\`-separated paths rooted at a drive, e.g. `c:\`. `/` is accepted on input.
    Windows,
}

impl PathStyle {
    /// The convention of the platform this process runs on.
    pub fn host() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }

    /// Canonical separator for this style
    pub fn separator(self) -> char {
        match self {
            PathStyle::Posix => '/',
            PathStyle::Windows => '\\',
        }
    }

    fn is_separator(self, c: char) -> bool {
        match self {
            PathStyle::Posix => c == '/',
            PathStyle::Windows => c == '\\' || c == '/',
        }
    }

    /// Whether `path` is absolute in this style.
    pub fn is_absolute(self, path: &str) -> bool {
        match self {
            PathStyle::Posix => path.starts_with('/'),
            PathStyle::Windows => drive_prefix(path).is_some_and(|drive| {
                path[drive.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| self.is_separator(c))
            }),
        }
    }

    /// Resolve `target` against `source_dir`.
    ///
    /// Absolute targets are returned untouched. Relative targets are joined to
    /// `source_dir` and normalized: `.` segments are dropped and `..` removes
    /// the previous segment without ever climbing above the root.
    pub fn resolve(self, source_dir: &str, target: &str) -> String {
        if self.is_absolute(target) {
            return target.to_string();
        }

        let (root, base) = self.split_root(source_dir);
        let mut segments: Vec<&str> = self.segments(base).collect();

        for segment in self.segments(target) {
            match segment {
                "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }

        self.assemble(root, &segments)
    }

    /// Directory part of `path`; the root itself for top-level entries.
    pub fn dirname(self, path: &str) -> String {
        let (root, rest) = self.split_root(path);
        let mut segments: Vec<&str> = self.segments(rest).collect();
        segments.pop();
        if segments.is_empty() && root.is_empty() {
            return ".".to_string();
        }
        self.assemble(root, &segments)
    }

    /// Final segment of `path`.
    pub fn basename(self, path: &str) -> String {
        self.segments(path).last().unwrap_or_default().to_string()
    }

    /// Join `name` onto `dir`, resolving any relative segments in `name`.
    pub fn join(self, dir: &str, name: &str) -> String {
        if self.split_root(dir).0.is_empty() {
            let mut joined = dir.trim_end_matches(|c: char| self.is_separator(c)).to_string();
            if !joined.is_empty() {
                joined.push(self.separator());
            }
            joined.push_str(name);
            return joined;
        }
        self.resolve(dir, name)
    }

    /// Relative path from `from_dir` to `to`, always `/`-separated.
    ///
    /// This is the form markdown links are written in, whatever the platform.
    /// Paths on different roots (drives) fall back to `to` unchanged.
    pub fn relative(self, from_dir: &str, to: &str) -> String {
        let (from_root, from_rest) = self.split_root(from_dir);
        let (to_root, to_rest) = self.split_root(to);
        if !from_root.eq_ignore_ascii_case(to_root) {
            return to.to_string();
        }

        let from: Vec<&str> = self.segments(from_rest).collect();
        let to_segments: Vec<&str> = self.segments(to_rest).collect();
        let common = from
            .iter()
            .zip(to_segments.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = vec![".."; from.len() - common];
        parts.extend_from_slice(&to_segments[common..]);
        parts.join("/")
    }

    fn segments<'a>(self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        path.split(move |c: char| self.is_separator(c))
            .filter(|s| !s.is_empty())
    }

    /// Split into (root, remainder). The root is `/` or `c:\` for absolute
    /// paths, `c:` for drive-relative ones, and empty otherwise.
    fn split_root(self, path: &str) -> (&str, &str) {
        match self {
            PathStyle::Posix => {
                if path.starts_with('/') {
                    (&path[..1], &path[1..])
                } else {
                    ("", path)
                }
            }
            PathStyle::Windows => match drive_prefix(path) {
                Some(drive) => {
                    let after = &path[drive.len()..];
                    match after.chars().next() {
                        Some(c) if self.is_separator(c) => {
                            (&path[..drive.len() + 1], &after[1..])
                        }
                        _ => (drive, after),
                    }
                }
                None => ("", path),
            },
        }
    }

    fn assemble(self, root: &str, segments: &[&str]) -> String {
        let sep = self.separator();
        let mut out = match self {
            PathStyle::Posix => root.to_string(),
            // Normalize `c:/` roots to `c:\`
            PathStyle::Windows => root
                .chars()
                .map(|c| if self.is_separator(c) { sep } else { c })
                .collect(),
        };
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.push_str(segment);
        }
        out
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::host()
    }
}

/// `c:` style drive prefix, if present.
fn drive_prefix(path: &str) -> Option<&str> {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        Some(&path[..2])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_absolute_is_untouched() {
        let style = PathStyle::Posix;
        assert!(style.is_absolute("/b.txt"));
        assert!(!style.is_absolute("b.txt"));
        assert_eq!(style.resolve("/x/y", "/b.txt"), "/b.txt");
        // No normalization is applied to absolute targets
        assert_eq!(style.resolve("/x", "/a/../b.txt"), "/a/../b.txt");
    }

    #[test]
    fn test_posix_relative_resolution() {
        let style = PathStyle::Posix;
        assert_eq!(style.resolve("/b/c", "../../a.md"), "/a.md");
        assert_eq!(style.resolve("/a", "c/d.txt"), "/a/c/d.txt");
        assert_eq!(style.resolve("/a", "./c/./d.txt"), "/a/c/d.txt");
        assert_eq!(style.resolve("/a/b", "../c/../d.md"), "/a/d.md");
        assert_eq!(style.resolve("/", "a.md"), "/a.md");
    }

    #[test]
    fn test_posix_parent_traversal_stops_at_root() {
        let style = PathStyle::Posix;
        assert_eq!(style.resolve("/a", "../../../b.md"), "/b.md");
    }

    #[test]
    fn test_relative_and_absolute_forms_agree() {
        let style = PathStyle::Posix;
        assert_eq!(
            style.resolve("/notes/daily", "../topics/rust.md"),
            style.resolve("/notes/daily", "/notes/topics/rust.md")
        );
    }

    #[test]
    fn test_windows_absolute() {
        let style = PathStyle::Windows;
        assert!(style.is_absolute("c:\\b.txt"));
        assert!(style.is_absolute("C:/b.txt"));
        assert!(!style.is_absolute("c:b.txt"));
        assert!(!style.is_absolute("b\\c.txt"));
        assert_eq!(style.resolve("c:\\a", "c:\\b.txt"), "c:\\b.txt");
    }

    #[test]
    fn test_windows_relative_resolution() {
        let style = PathStyle::Windows;
        assert_eq!(style.resolve("c:\\b\\c", "..\\..\\a.md"), "c:\\a.md");
        assert_eq!(style.resolve("c:\\a", "c\\d.txt"), "c:\\a\\c\\d.txt");
        assert_eq!(style.resolve("c:\\a", "c/d.txt"), "c:\\a\\c\\d.txt");
        assert_eq!(style.resolve("c:/a", "d.txt"), "c:\\a\\d.txt");
    }

    #[test]
    fn test_dirname_and_basename() {
        let style = PathStyle::Posix;
        assert_eq!(style.dirname("/a/b/c.md"), "/a/b");
        assert_eq!(style.dirname("/a.md"), "/");
        assert_eq!(style.dirname("a.md"), ".");
        assert_eq!(style.basename("/a/b/c.md"), "c.md");

        let style = PathStyle::Windows;
        assert_eq!(style.dirname("c:\\a\\b.md"), "c:\\a");
        assert_eq!(style.dirname("c:\\b.md"), "c:\\");
        assert_eq!(style.basename("c:\\a\\b.md"), "b.md");
    }

    #[test]
    fn test_join() {
        let style = PathStyle::Posix;
        assert_eq!(style.join("/a/b", "note.md"), "/a/b/note.md");
        assert_eq!(style.join("/a/b/", "note.md"), "/a/b/note.md");
        assert_eq!(style.join("rel/dir", "note.md"), "rel/dir/note.md");
    }

    #[test]
    fn test_relative() {
        let style = PathStyle::Posix;
        assert_eq!(style.relative("/a/b", "/a/b/c/d.md"), "c/d.md");
        assert_eq!(style.relative("/a/b", "/a/x.md"), "../x.md");
        assert_eq!(style.relative("/a/b", "/z/y/x.md"), "../../z/y/x.md");

        let style = PathStyle::Windows;
        assert_eq!(style.relative("c:\\a\\b", "c:\\a\\c\\d.md"), "../c/d.md");
        assert_eq!(style.relative("c:\\a", "d:\\x.md"), "d:\\x.md");
    }
}

//! File system access used to load a note corpus.
//!
//! The index and the link graph never touch `std::fs` directly; they go
//! through [`FileSystem`] so tests can swap in [`MemoryFileSystem`].

use crate::error::{Error, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only view of the files under a directory.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Every file (not directory) under `dir`, recursively, in a stable order.
    fn all_files_under_path(&self, dir: &str) -> Result<Vec<String>>;

    /// Read a file as UTF-8 text.
    async fn read_file(&self, path: &str) -> Result<String>;
}

/// The real file system.
///
/// Paths are made absolute (lexically, without resolving symlinks) so that
/// relative links can be resolved against them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    fn all_files_under_path(&self, dir: &str) -> Result<Vec<String>> {
        let root = std::path::absolute(Path::new(dir)).map_err(Error::io)?;
        let mut files = Vec::new();

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::walk(&root, e.to_string()))?;
            if entry.file_type().is_file() {
                files.push(entry.path().to_string_lossy().into_owned());
            }
        }

        log::debug!("Found {} files under {}", files.len(), root.display());
        Ok(files)
    }

    async fn read_file(&self, path: &str) -> Result<String> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(PathBuf::from(path))
            } else {
                Error::io(e)
            }
        })
    }
}

/// In-memory file system, in insertion order.
///
/// `all_files_under_path` returns the files whose path starts with `dir`.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<Vec<(String, String)>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(path, text)` pairs
    pub fn with_files<P, T>(files: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        let fs = Self::new();
        fs.set_files(files);
        fs
    }

    /// Replace the whole file set
    pub fn set_files<P, T>(&self, files: impl IntoIterator<Item = (P, T)>)
    where
        P: Into<String>,
        T: Into<String>,
    {
        *self.files.write() = files
            .into_iter()
            .map(|(p, t)| (p.into(), t.into()))
            .collect();
    }

    /// Add or overwrite a single file
    pub fn insert(&self, path: impl Into<String>, text: impl Into<String>) {
        let path = path.into();
        let text = text.into();
        let mut files = self.files.write();
        match files.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = text,
            None => files.push((path, text)),
        }
    }

    pub fn remove(&self, path: &str) {
        self.files.write().retain(|(p, _)| p != path);
    }
}

/// `path` is `dir` itself or lies below it, matching whole path segments.
fn is_under(path: &str, dir: &str) -> bool {
    let Some(rest) = path.strip_prefix(dir) else {
        return false;
    };
    rest.is_empty()
        || dir.ends_with(['/', '\\'])
        || rest.starts_with(['/', '\\'])
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    fn all_files_under_path(&self, dir: &str) -> Result<Vec<String>> {
        Ok(self
            .files
            .read()
            .iter()
            .filter(|(path, _)| is_under(path, dir))
            .map(|(path, _)| path.clone())
            .collect())
    }

    async fn read_file(&self, path: &str) -> Result<String> {
        self.files
            .read()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| Error::file_not_found(PathBuf::from(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_walk_is_recursive_and_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("b.md"), "b").unwrap();
        std::fs::write(root.join("a.txt"), "a").unwrap();
        std::fs::write(root.join("sub").join("c.log"), "c").unwrap();

        let fs = LocalFileSystem::new();
        let files = fs
            .all_files_under_path(root.to_str().unwrap())
            .expect("walk failed");

        let names: Vec<String> = files
            .iter()
            .map(|f| Path::new(f).file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.md", "c.log"]);
        assert!(files.iter().all(|f| Path::new(f).is_absolute()));

        let text = fs.read_file(&files[1]).await.expect("read failed");
        assert_eq!(text, "b");
    }

    #[tokio::test]
    async fn test_local_read_missing_file() {
        let fs = LocalFileSystem::new();
        let err = fs.read_file("/definitely/not/here.md").await.unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_memory_fs() {
        let fs = MemoryFileSystem::with_files([("/a/b.md", "one"), ("/c.md", "two")]);
        assert_eq!(fs.all_files_under_path("/a").unwrap(), vec!["/a/b.md"]);
        assert_eq!(fs.all_files_under_path("/").unwrap().len(), 2);

        fs.insert("/a/b.md", "changed");
        assert_eq!(fs.read_file("/a/b.md").await.unwrap(), "changed");

        fs.remove("/c.md");
        assert!(fs.read_file("/c.md").await.is_err());
    }

    #[test]
    fn test_memory_fs_matches_whole_segments() {
        let fs = MemoryFileSystem::with_files([
            ("/a/x.md", ""),
            ("/ab/x.md", ""),
            ("/a", ""),
            ("C:\\notes\\y.md", ""),
            ("C:\\notes2\\y.md", ""),
        ]);

        assert_eq!(fs.all_files_under_path("/a").unwrap(), vec!["/a/x.md", "/a"]);
        assert_eq!(fs.all_files_under_path("/a/").unwrap(), vec!["/a/x.md"]);
        assert_eq!(
            fs.all_files_under_path("C:\\notes").unwrap(),
            vec!["C:\\notes\\y.md"]
        );
        assert_eq!(fs.all_files_under_path("/").unwrap().len(), 3);
    }
}

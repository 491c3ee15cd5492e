//! # Note Searcher Core
//!
//! Core data models, error types, path resolution and collaborator traits for
//! the note index and link graph. This crate defines the canonical types that
//! all other crates depend on.
//!
//! ## Core Modules
//!
//! - [`models`] - Notes, links and dead links
//! - [`error`] - Error type and Result alias
//! - [`paths`] - Platform-aware lexical path resolution
//! - [`fs`] - File system access (real and in-memory)
//! - [`config`] - Per-directory configuration and its stores
//!
//! ## Usage Examples
//!
//! ### Resolving link targets
//!
//! ```
//! use notesearcher_core::prelude::*;
//!
//! let style = PathStyle::Posix;
//! let dir = style.dirname("/notes/daily/today.md");
//! assert_eq!(style.resolve(&dir, "../ideas.md"), "/notes/ideas.md");
//! ```
//!
//! ### Error Handling
//!
//! ```
//! use notesearcher_core::prelude::*;
//!
//! fn build() -> Result<()> {
//!     Err(Error::index_error("writer unavailable"))
//! }
//! assert!(build().is_err());
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod models;
pub mod paths;

pub use config::{
    ConfigProvider, ConfigStore, DeadLinksConfig, JsonFileConfigStore, MemoryConfigStore,
    NoteSearcherConfig, SearchConfig,
};
pub use error::{Error, Result};
pub use fs::{FileSystem, LocalFileSystem, MemoryFileSystem};
pub use models::{DeadLink, Document, Link, NOTE_EXTENSIONS, is_note_path};
pub use paths::PathStyle;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ConfigProvider, ConfigStore, NoteSearcherConfig};
    pub use crate::error::{Error, Result};
    pub use crate::fs::{FileSystem, LocalFileSystem, MemoryFileSystem};
    pub use crate::models::{DeadLink, Document, Link, is_note_path};
    pub use crate::paths::PathStyle;
}

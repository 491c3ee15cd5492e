//! # Note Searcher Index
//!
//! Full-text search over a directory of notes, together with the link graph
//! and tag list derived from the same directory walk.
//!
//! Two backends implement [`NoteIndex`]:
//! - [`TantivyNoteIndex`]: in-process, in-memory tantivy index
//! - [`CliNoteIndex`]: delegates search to an external program
//!
//! [`create_note_index`] picks one from configuration, once.
//!
//! ## Query language
//!
//! - `ham good`: either term (OR)
//! - `+ham +good`: both terms required
//! - `ham -pizza`: exclude a term
//! - `#beef`: notes tagged `beef` (rewritten to `tags:beef`)
//! - `text:ham`, `tags:beef`: restrict a term to one field
//!
//! Terms are lowercased, stop-word filtered and stemmed. There are no phrase
//! queries; quote characters stay attached to their term.
//!
//! ## Example
//!
//! ```
//! use notesearcher_core::{MemoryFileSystem, PathStyle};
//! use notesearcher_index::{NoteIndex, TantivyNoteIndex};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let fs = MemoryFileSystem::with_files([("/notes/a.md", "the ham is good #food")]);
//! let index = TantivyNoteIndex::with_style(Arc::new(fs), PathStyle::Posix);
//!
//! index.index("/notes").await.unwrap();
//! assert_eq!(index.search("+ham +good").await.unwrap(), vec!["/notes/a.md"]);
//! assert_eq!(index.search("#food").await.unwrap(), vec!["/notes/a.md"]);
//! assert_eq!(index.all_tags(), vec!["food"]);
//! # }
//! ```

use async_trait::async_trait;
use notesearcher_core::prelude::*;
use notesearcher_core::NoteSearcherConfig;
use notesearcher_graph::DeadLinkFinder;
use std::sync::Arc;

pub mod cli_index;
pub mod corpus;
pub mod query;
pub mod tantivy_index;
pub mod tokenizer;

pub use cli_index::{CliCommand, CliNoteIndex};
pub use corpus::{Corpus, LinkSnapshot};
pub use tantivy_index::{MAX_RESULTS, SearchIndex, TantivyNoteIndex};

/// Full-text index plus the link queries answered from the same build.
#[async_trait]
pub trait NoteIndex: Send + Sync {
    /// Paths of the best matches for `query`, best first.
    async fn search(&self, query: &str) -> Result<Vec<String>>;

    /// Rebuild everything from the files under `dir`.
    ///
    /// On failure the previous build stays in place.
    async fn index(&self, dir: &str) -> Result<()>;

    /// Notes containing a link that resolves to `path`.
    async fn links_to(&self, path: &str) -> Result<Vec<String>>;

    /// Tags of the current build, first seen first.
    fn all_tags(&self) -> Vec<String>;
}

/// The backend chosen by [`create_note_index`].
pub enum NoteIndexBackend {
    Tantivy(TantivyNoteIndex),
    Cli(CliNoteIndex),
}

impl NoteIndexBackend {
    fn inner(&self) -> &dyn Backend {
        match self {
            NoteIndexBackend::Tantivy(index) => index,
            NoteIndexBackend::Cli(index) => index,
        }
    }
}

trait Backend: NoteIndex + DeadLinkFinder {}
impl<T: NoteIndex + DeadLinkFinder> Backend for T {}

#[async_trait]
impl NoteIndex for NoteIndexBackend {
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        self.inner().search(query).await
    }

    async fn index(&self, dir: &str) -> Result<()> {
        self.inner().index(dir).await
    }

    async fn links_to(&self, path: &str) -> Result<Vec<String>> {
        self.inner().links_to(path).await
    }

    fn all_tags(&self) -> Vec<String> {
        self.inner().all_tags()
    }
}

#[async_trait]
impl DeadLinkFinder for NoteIndexBackend {
    async fn find_all_dead_links(&self) -> Result<Vec<DeadLink>> {
        self.inner().find_all_dead_links().await
    }
}

/// Choose a backend from `config`.
///
/// `search.use_lucene` selects the external program, which needs a
/// `cli_command`; without one the in-process index is used instead.
pub fn create_note_index(
    config: &NoteSearcherConfig,
    cli_command: Option<CliCommand>,
    fs: Arc<dyn FileSystem>,
) -> NoteIndexBackend {
    match (config.search.use_lucene, cli_command) {
        (true, Some(command)) => {
            log::debug!("Using external search backend: {}", command);
            NoteIndexBackend::Cli(CliNoteIndex::new(command, fs))
        }
        (true, None) => {
            log::warn!("External search requested but no command configured, using tantivy");
            NoteIndexBackend::Tantivy(TantivyNoteIndex::new(fs))
        }
        (false, _) => NoteIndexBackend::Tantivy(TantivyNoteIndex::new(fs)),
    }
}

pub mod prelude {
    pub use crate::{
        CliCommand, CliNoteIndex, NoteIndex, NoteIndexBackend, TantivyNoteIndex,
        create_note_index,
    };
    pub use notesearcher_graph::DeadLinkFinder;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(use_lucene: bool) -> NoteSearcherConfig {
        let mut config = NoteSearcherConfig::default();
        config.search.use_lucene = use_lucene;
        config
    }

    #[test]
    fn test_factory_defaults_to_tantivy() {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
        let backend = create_note_index(&config(false), Some(CliCommand::java_jar("x.jar")), fs);
        assert!(matches!(backend, NoteIndexBackend::Tantivy(_)));
    }

    #[test]
    fn test_factory_uses_cli_when_configured() {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
        let backend = create_note_index(&config(true), Some(CliCommand::java_jar("x.jar")), fs);
        match backend {
            NoteIndexBackend::Cli(index) => assert_eq!(index.command().program, "java"),
            NoteIndexBackend::Tantivy(_) => panic!("expected the CLI backend"),
        }
    }

    #[test]
    fn test_factory_falls_back_without_command() {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
        let backend = create_note_index(&config(true), None, fs);
        assert!(matches!(backend, NoteIndexBackend::Tantivy(_)));
    }
}

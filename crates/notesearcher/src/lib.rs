//! # Note Searcher
//!
//! Full-text search over a directory of notes, inline `#tags`, dead link
//! detection and backlinks, coordinated by [`NoteSearcher`].
//!
//! The engine lives in the sibling crates:
//! - `notesearcher-core`: models, errors, paths, file system and config
//! - `notesearcher-parser`: tag, link and query text processing
//! - `notesearcher-graph`: link graph, dead links and backlinks
//! - `notesearcher-index`: the full-text index backends
//!
//! This crate adds the orchestration layer and its seams: the UI
//! ([`NoteSearcherUi`]), debounced execution ([`DelayedExecutor`]) and the
//! clock ([`Clock`]), plus a console UI and logging setup for the binary.

pub mod clock;
pub mod console;
pub mod executor;
pub mod logging;
pub mod searcher;
pub mod ui;

pub use clock::{Clock, NOTE_ID_FORMAT, SystemClock, note_id};
pub use console::{ConsoleAnswers, ConsoleUi};
pub use executor::{DelayedExecutor, TokioDelayedExecutor};
pub use searcher::{NoteSearcher, RELATED_FILES_DELAY};
pub use ui::NoteSearcherUi;

pub use notesearcher_core::prelude::*;
pub use notesearcher_core::{JsonFileConfigStore, MemoryConfigStore};
pub use notesearcher_graph::DeadLinkFinder;
pub use notesearcher_index::{
    CliCommand, NoteIndex, NoteIndexBackend, TantivyNoteIndex, create_note_index,
};
pub use notesearcher_parser::{FrequencyKeywordExtractor, KeywordExtractor};

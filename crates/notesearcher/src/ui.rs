//! The user interface seam.
//!
//! [`NoteSearcher`](crate::NoteSearcher) never talks to an editor or a
//! terminal directly. Everything it shows or asks goes through
//! [`NoteSearcherUi`], so hosts and tests plug in their own.

use async_trait::async_trait;
use notesearcher_core::{DeadLink, Error};

#[async_trait]
pub trait NoteSearcherUi: Send + Sync {
    /// Root of the notes directory the user has open, if any
    fn currently_open_dir(&self) -> Option<String>;

    /// Path of the note being viewed, if any
    fn current_file(&self) -> Option<String>;

    /// Ask for a search query. `None` or an empty string means cancelled.
    async fn prompt_for_search(&self, prefill: &str) -> Option<String>;

    async fn show_search_results(&self, files: &[String]);

    async fn show_related_files(&self, files: &[String]);

    async fn show_dead_links(&self, links: &[DeadLink]);

    async fn show_backlinks(&self, files: &[String]);

    async fn show_tags(&self, tags: &[String]);

    async fn show_notification(&self, message: &str);

    async fn show_error(&self, error: &Error);

    /// Ask whether to enable note searching in the open directory
    async fn prompt_to_enable(&self) -> bool;

    /// Ask for a new note's file name, prefilled with a generated id
    async fn prompt_for_new_note_name(&self, note_id: &str) -> Option<String>;

    async fn start_new_note(&self, path: &str);

    async fn copy_to_clipboard(&self, text: &str);

    /// An index build of `dir` has started
    async fn notify_indexing_started(&self, dir: &str);
}

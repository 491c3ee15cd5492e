//! The orchestration service.
//!
//! [`NoteSearcher`] reacts to user commands and editor events: it drives index
//! rebuilds, debounces "related notes" lookups while the user types, reports
//! dead links on save and keeps per-directory enable/disable state. Every
//! collaborator is injected.

use notesearcher_core::prelude::*;
use notesearcher_core::NoteSearcherConfig;
use notesearcher_graph::DeadLinkFinder;
use notesearcher_index::NoteIndex;
use notesearcher_parser::{
    FrequencyKeywordExtractor, KeywordExtractor, create_tag_and_keyword_query, extract_tags,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock, note_id};
use crate::executor::{DelayedExecutor, TokioDelayedExecutor};
use crate::ui::NoteSearcherUi;

/// Quiet period after the last edit before related notes are recomputed
pub const RELATED_FILES_DELAY: Duration = Duration::from_millis(500);

const OPEN_FOLDER_FIRST: &str = "open a folder first";
const OPEN_DIRECTORY_FIRST: &str = "open a directory first!";

pub struct NoteSearcher {
    ui: Arc<dyn NoteSearcherUi>,
    note_index: Arc<dyn NoteIndex>,
    dead_link_finder: Arc<dyn DeadLinkFinder>,
    config: ConfigProvider,
    executor: Arc<dyn DelayedExecutor>,
    clock: Arc<dyn Clock>,
    keywords: Arc<dyn KeywordExtractor>,
    style: PathStyle,
    previous_query: Mutex<String>,
}

impl NoteSearcher {
    /// Create a searcher with the default executor, clock and keyword extractor.
    pub fn new(
        ui: Arc<dyn NoteSearcherUi>,
        note_index: Arc<dyn NoteIndex>,
        dead_link_finder: Arc<dyn DeadLinkFinder>,
        config: ConfigProvider,
    ) -> Self {
        Self {
            ui,
            note_index,
            dead_link_finder,
            config,
            executor: Arc::new(TokioDelayedExecutor::new()),
            clock: Arc::new(SystemClock),
            keywords: Arc::new(FrequencyKeywordExtractor::default()),
            style: PathStyle::host(),
            previous_query: Mutex::new(String::new()),
        }
    }

    pub fn with_executor(mut self, executor: Arc<dyn DelayedExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_keyword_extractor(mut self, keywords: Arc<dyn KeywordExtractor>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    fn is_enabled_in_current_dir(&self) -> bool {
        self.ui
            .currently_open_dir()
            .is_some_and(|dir| self.config.is_enabled_in_dir(&dir))
    }

    fn current_config(&self) -> NoteSearcherConfig {
        self.ui
            .currently_open_dir()
            .map(|dir| self.config.config_for(&dir))
            .unwrap_or_default()
    }

    pub async fn notify_extension_activated(&self) {
        if self.ui.currently_open_dir().is_none() {
            return;
        }

        if self.is_enabled_in_current_dir() {
            self.index().await;
            self.show_tags().await;
        } else {
            self.prompt_user_to_enable().await;
        }
    }

    pub async fn prompt_user_to_enable(&self) {
        if self.ui.prompt_to_enable().await {
            self.enable().await;
        }
    }

    pub async fn enable(&self) {
        log::trace!("enable");
        let Some(dir) = self.ui.currently_open_dir() else {
            self.ui.show_notification(OPEN_DIRECTORY_FIRST).await;
            return;
        };

        if let Err(e) = self.config.enable_in_dir(&dir) {
            self.ui.show_error(&e).await;
            return;
        }
        self.index().await;
    }

    pub async fn disable(&self) {
        log::trace!("disable");
        let Some(dir) = self.ui.currently_open_dir() else {
            self.ui.show_notification(OPEN_DIRECTORY_FIRST).await;
            return;
        };

        if let Err(e) = self.config.disable_in_dir(&dir) {
            self.ui.show_error(&e).await;
        }
    }

    /// Prompt for a query and show its results.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self) {
        log::trace!("search");
        let prefill = self.previous_query.lock().clone();
        let input = match self.ui.prompt_for_search(&prefill).await {
            Some(input) if !input.is_empty() => input,
            _ => return,
        };
        *self.previous_query.lock() = input.clone();

        match self.note_index.search(&input).await {
            Ok(results) => {
                self.ui.show_search_results(&results).await;
                log::trace!("search complete");
            }
            Err(e) => self.ui.show_error(&e).await,
        }
    }

    /// Rebuild the index of the open directory.
    #[tracing::instrument(skip(self))]
    pub async fn index(&self) {
        log::trace!("index");
        let Some(dir) = self.ui.currently_open_dir() else {
            self.ui.show_notification(OPEN_FOLDER_FIRST).await;
            log::trace!("index: no directory open");
            return;
        };

        self.ui.notify_indexing_started(&dir).await;
        match self.note_index.index(&dir).await {
            Ok(()) => log::trace!("indexing complete"),
            Err(e) => self.ui.show_error(&e).await,
        }
    }

    pub fn create_note_id(&self) -> String {
        note_id(&self.clock.now())
    }

    pub async fn create_note(&self) {
        let dir = match self.ui.current_file() {
            Some(file) => Some(self.style.dirname(&file)),
            None => self.ui.currently_open_dir(),
        };
        let Some(dir) = dir else {
            self.ui.show_notification(OPEN_FOLDER_FIRST).await;
            return;
        };

        let note_id = self.create_note_id();
        let name = match self.ui.prompt_for_new_note_name(&note_id).await {
            Some(name) if !name.is_empty() => name,
            _ => return,
        };

        let path = self.style.join(&dir, &name);
        self.ui.start_new_note(&path).await;
    }

    /// Schedule a related-notes update for the edited document.
    ///
    /// Each call cancels the previous schedule, so a burst of edits leads to
    /// one update with the latest text.
    pub fn notify_current_document_changed(self: &Arc<Self>, path: &str, text: &str) {
        if text.is_empty() || !self.is_enabled_in_current_dir() {
            return;
        }

        self.executor.cancel_all();

        let searcher = Arc::clone(self);
        let path = path.to_string();
        let text = text.to_string();
        self.executor.execute_in(
            RELATED_FILES_DELAY,
            Box::pin(async move {
                searcher.update_related_files(&path, &text).await;
            }),
        );
    }

    /// Show notes related to `text` by its tags and keywords, minus `path` itself.
    pub async fn update_related_files(&self, path: &str, text: &str) {
        if text.is_empty() {
            return;
        }

        let tags = extract_tags(text);
        let keywords = match self.keywords.extract(text).await {
            Ok(keywords) => keywords,
            Err(e) => {
                self.ui.show_error(&e).await;
                return;
            }
        };

        let query = create_tag_and_keyword_query(&tags, &keywords);
        match self.note_index.search(&query).await {
            Ok(results) => {
                let related: Vec<String> = results.into_iter().filter(|r| r != path).collect();
                self.ui.show_related_files(&related).await;
            }
            Err(e) => self.ui.show_error(&e).await,
        }
    }

    /// Reindex, then report dead links unless turned off for this directory.
    pub async fn notify_note_saved(&self, path: &str) {
        log::trace!("note saved: {}", path);
        if !self.is_enabled_in_current_dir() {
            log::trace!("updates disabled, doing nothing");
            return;
        }

        self.index().await;
        if self.current_config().dead_links.show_on_save {
            self.show_dead_links().await;
        }
    }

    pub async fn show_dead_links(&self) {
        log::trace!("show dead links");
        if self.ui.currently_open_dir().is_none() {
            return;
        }

        match self.dead_link_finder.find_all_dead_links().await {
            Ok(links) if links.is_empty() => {}
            Ok(links) => self.ui.show_dead_links(&links).await,
            Err(e) => self.ui.show_error(&e).await,
        }
    }

    pub async fn notify_moved_view_to_different_note(&self, path: &str) {
        self.show_backlinks_of(path).await;
    }

    /// Backlinks of the note currently open.
    pub async fn show_backlinks(&self) {
        if let Some(file) = self.ui.current_file() {
            self.show_backlinks_of(&file).await;
        }
    }

    async fn show_backlinks_of(&self, path: &str) {
        match self.note_index.links_to(path).await {
            Ok(backlinks) => self.ui.show_backlinks(&backlinks).await,
            Err(e) => self.ui.show_error(&e).await,
        }
    }

    pub async fn show_tags(&self) {
        let tags = self.note_index.all_tags();
        self.ui.show_tags(&tags).await;
    }

    /// `[](target)`, relative to the current note's directory when one is open.
    pub fn generate_markdown_link_to(&self, target: &str) -> String {
        let link_path = match self.ui.current_file() {
            Some(file) => self.style.relative(&self.style.dirname(&file), target),
            None => self.style.basename(target),
        };
        format!("[]({})", link_path)
    }

    pub async fn markdown_link_to_clipboard(&self, target: &str) {
        let link = self.generate_markdown_link_to(target);
        self.ui.copy_to_clipboard(&link).await;
    }
}

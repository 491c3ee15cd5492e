//! Terminal implementation of [`NoteSearcherUi`] used by the binary.
//!
//! Prompts are answered up front from the command line, so nothing here
//! blocks on stdin. Results go to the configured writer (stdout by default),
//! errors and notifications to the log and stderr.

use async_trait::async_trait;
use notesearcher_core::{DeadLink, Error};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ui::NoteSearcherUi;

/// Answers the console gives to prompts.
#[derive(Debug, Clone, Default)]
pub struct ConsoleAnswers {
    pub open_dir: Option<String>,
    pub current_file: Option<String>,
    pub query: Option<String>,
    /// New note name; `None` accepts the generated id
    pub new_note_name: Option<String>,
    pub enable: bool,
}

pub struct ConsoleUi {
    answers: ConsoleAnswers,
    out: Mutex<Box<dyn Write + Send>>,
    errors: AtomicUsize,
}

impl ConsoleUi {
    pub fn new(answers: ConsoleAnswers) -> Self {
        Self::with_writer(answers, Box::new(std::io::stdout()))
    }

    pub fn with_writer(answers: ConsoleAnswers, out: Box<dyn Write + Send>) -> Self {
        Self {
            answers,
            out: Mutex::new(out),
            errors: AtomicUsize::new(0),
        }
    }

    /// Number of errors shown so far
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    fn print(&self, text: &str) {
        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            log::warn!("Failed to write output: {}", e);
        }
    }
}

/// One line per item, or `none` for an empty list
pub fn render_list(items: &[String]) -> String {
    if items.is_empty() {
        return "none\n".to_string();
    }
    items.iter().map(|item| format!("{}\n", item)).collect()
}

/// One `source:line: dead link to target` line per dead link
pub fn render_dead_links(links: &[DeadLink]) -> String {
    links.iter().map(|link| format!("{}\n", link)).collect()
}

#[async_trait]
impl NoteSearcherUi for ConsoleUi {
    fn currently_open_dir(&self) -> Option<String> {
        self.answers.open_dir.clone()
    }

    fn current_file(&self) -> Option<String> {
        self.answers.current_file.clone()
    }

    async fn prompt_for_search(&self, _prefill: &str) -> Option<String> {
        self.answers.query.clone()
    }

    async fn show_search_results(&self, files: &[String]) {
        self.print(&render_list(files));
    }

    async fn show_related_files(&self, files: &[String]) {
        self.print(&render_list(files));
    }

    async fn show_dead_links(&self, links: &[DeadLink]) {
        self.print(&render_dead_links(links));
    }

    async fn show_backlinks(&self, files: &[String]) {
        self.print(&render_list(files));
    }

    async fn show_tags(&self, tags: &[String]) {
        let tags: Vec<String> = tags.iter().map(|tag| format!("#{}", tag)).collect();
        self.print(&render_list(&tags));
    }

    async fn show_notification(&self, message: &str) {
        log::info!("{}", message);
        eprintln!("{}", message);
    }

    async fn show_error(&self, error: &Error) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        log::error!("{}", error);
    }

    async fn prompt_to_enable(&self) -> bool {
        self.answers.enable
    }

    async fn prompt_for_new_note_name(&self, note_id: &str) -> Option<String> {
        Some(
            self.answers
                .new_note_name
                .clone()
                .unwrap_or_else(|| format!("{}.md", note_id)),
        )
    }

    async fn start_new_note(&self, path: &str) {
        let created = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await;

        match created {
            Ok(_) => self.print(&format!("{}\n", path)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                log::warn!("{} already exists", path);
                self.print(&format!("{}\n", path));
            }
            Err(e) => self.show_error(&Error::io(e)).await,
        }
    }

    async fn copy_to_clipboard(&self, text: &str) {
        self.print(&format!("{}\n", text));
    }

    async fn notify_indexing_started(&self, dir: &str) {
        log::info!("Indexing {}", dir);
    }
}

//! Note Searcher CLI

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use notesearcher::{
    CliCommand, ConfigProvider, ConsoleAnswers, ConsoleUi, JsonFileConfigStore, LocalFileSystem,
    NoteSearcher, NoteSearcherUi, create_note_index, logging,
};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "~/.notesearcher.json";

/// Note Searcher - search notes, tags, dead links and backlinks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Per-directory settings file
    #[arg(long, env = "NOTESEARCHER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Jar of the external search backend, used when `search.useLucene` is set
    #[arg(long, env = "NOTESEARCHER_LUCENE_JAR")]
    lucene_jar: Option<String>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the notes in a directory
    Search {
        dir: String,
        /// Query terms: `+must`, `-exclude`, `#tag`, `text:term`
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Build the index and report problems
    Index { dir: String },
    /// List links whose target does not exist
    DeadLinks { dir: String },
    /// List notes linking to a note
    Backlinks { dir: String, file: String },
    /// List every tag in the directory
    Tags { dir: String },
    /// List notes related to a note by its tags and keywords
    Related { dir: String, file: String },
    /// Print a markdown link from one note to another file
    Link {
        dir: String,
        from: String,
        target: String,
    },
    /// Create a new, empty note named after the current time
    NewNote { dir: String, name: Option<String> },
    /// Turn note searching on for a directory
    Enable { dir: String },
    /// Turn note searching off for a directory
    Disable { dir: String },
}

impl Command {
    fn dir(&self) -> &str {
        match self {
            Command::Search { dir, .. }
            | Command::Index { dir }
            | Command::DeadLinks { dir }
            | Command::Backlinks { dir, .. }
            | Command::Tags { dir }
            | Command::Related { dir, .. }
            | Command::Link { dir, .. }
            | Command::NewNote { dir, .. }
            | Command::Enable { dir }
            | Command::Disable { dir } => dir,
        }
    }
}

/// Expand `~` and environment variables, then make the path absolute.
fn expand_path(path: &str) -> anyhow::Result<String> {
    let expanded = shellexpand::full(path).with_context(|| format!("Cannot expand {}", path))?;
    let absolute = std::path::absolute(PathBuf::from(expanded.as_ref()))
        .with_context(|| format!("Cannot resolve {}", path))?;
    Ok(absolute.to_string_lossy().into_owned())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let dir = expand_path(args.command.dir())?;
    let config_path = expand_path(&args.config)?;
    let store = JsonFileConfigStore::open(&config_path)
        .with_context(|| format!("Cannot open settings {}", config_path))?;
    let config = ConfigProvider::new(Arc::new(store));

    let mut answers = ConsoleAnswers {
        open_dir: Some(dir.clone()),
        ..ConsoleAnswers::default()
    };
    match &args.command {
        Command::Search { query, .. } => answers.query = Some(query.join(" ")),
        Command::Backlinks { file, .. } | Command::Related { file, .. } => {
            answers.current_file = Some(expand_path(file)?)
        }
        Command::Link { from, .. } => answers.current_file = Some(expand_path(from)?),
        Command::NewNote { name, .. } => answers.new_note_name = name.clone(),
        _ => {}
    }

    let ui = Arc::new(ConsoleUi::new(answers));
    let backend = Arc::new(create_note_index(
        &config.config_for(&dir),
        args.lucene_jar.map(CliCommand::java_jar),
        Arc::new(LocalFileSystem::new()),
    ));
    let searcher = NoteSearcher::new(ui.clone(), backend.clone(), backend, config);

    match &args.command {
        Command::Search { .. } => {
            searcher.index().await;
            searcher.search().await;
        }
        Command::Index { .. } => {
            searcher.index().await;
            searcher.show_dead_links().await;
        }
        Command::DeadLinks { .. } => {
            searcher.index().await;
            searcher.show_dead_links().await;
        }
        Command::Backlinks { .. } => {
            searcher.index().await;
            searcher.show_backlinks().await;
        }
        Command::Tags { .. } => {
            searcher.index().await;
            searcher.show_tags().await;
        }
        Command::Related { .. } => {
            searcher.index().await;
            if let Some(file) = ui.current_file() {
                let text = tokio::fs::read_to_string(&file)
                    .await
                    .with_context(|| format!("Cannot read {}", file))?;
                searcher.update_related_files(&file, &text).await;
            }
        }
        Command::Link { target, .. } => {
            searcher
                .markdown_link_to_clipboard(&expand_path(target)?)
                .await;
        }
        Command::NewNote { .. } => searcher.create_note().await,
        Command::Enable { .. } => searcher.enable().await,
        Command::Disable { .. } => searcher.disable().await,
    }

    if ui.error_count() > 0 {
        bail!("{} error(s) occurred", ui.error_count());
    }
    Ok(())
}

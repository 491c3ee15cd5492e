//! Note index delegating search to an external command-line program.
//!
//! The program is run as `<program> <args...> index <dir>` and
//! `<program> <args...> search <query>`. Search results are the lines it
//! prints on stdout. The link graph and tag list are still built in-process.

use async_trait::async_trait;
use notesearcher_core::prelude::*;
use notesearcher_graph::DeadLinkFinder;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tokio::process::Command;
use tracing::instrument;

use crate::NoteIndex;
use crate::corpus::{Corpus, LinkSnapshot};

/// External program and its leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CliCommand {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `java -jar <jar_path>`
    pub fn java_jar(jar_path: impl Into<String>) -> Self {
        Self::new("java", ["-jar".to_string(), jar_path.into()])
    }
}

impl fmt::Display for CliCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Note index backed by an external search program.
pub struct CliNoteIndex {
    command: CliCommand,
    fs: Arc<dyn FileSystem>,
    style: PathStyle,
    links: RwLock<Option<Arc<LinkSnapshot>>>,
}

impl CliNoteIndex {
    pub fn new(command: CliCommand, fs: Arc<dyn FileSystem>) -> Self {
        Self::with_style(command, fs, PathStyle::host())
    }

    pub fn with_style(command: CliCommand, fs: Arc<dyn FileSystem>, style: PathStyle) -> Self {
        Self {
            command,
            fs,
            style,
            links: RwLock::new(None),
        }
    }

    pub fn command(&self) -> &CliCommand {
        &self.command
    }

    fn current(&self) -> Option<Arc<LinkSnapshot>> {
        self.links.read().clone()
    }

    /// Run the program with `extra` appended; non-empty stdout lines on success.
    async fn run(&self, extra: &[&str]) -> Result<Vec<String>> {
        let description = format!("{} {}", self.command, extra.join(" "));
        log::debug!("Running {}", description);

        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .args(extra)
            .output()
            .await
            .map_err(|e| Error::subprocess(&description, e.to_string()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            return Err(Error::subprocess(&description, stderr.trim_end()));
        }
        if !output.status.success() {
            return Err(Error::subprocess(
                &description,
                format!("exited with {}", output.status),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl NoteIndex for CliNoteIndex {
    #[instrument(skip(self), name = "cli_search")]
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        self.run(&["search", query]).await
    }

    #[instrument(skip(self), name = "cli_index")]
    async fn index(&self, dir: &str) -> Result<()> {
        self.run(&["index", dir]).await?;

        let corpus = Corpus::load(self.fs.as_ref(), dir).await?;
        *self.links.write() = Some(Arc::new(corpus.link_snapshot(self.style)));
        log::info!("Indexed {} with {}", dir, self.command.program);
        Ok(())
    }

    async fn links_to(&self, path: &str) -> Result<Vec<String>> {
        Ok(self
            .current()
            .map(|snapshot| snapshot.graph.links_to(path))
            .unwrap_or_default())
    }

    fn all_tags(&self) -> Vec<String> {
        self.current()
            .map(|snapshot| snapshot.tags.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DeadLinkFinder for CliNoteIndex {
    async fn find_all_dead_links(&self) -> Result<Vec<DeadLink>> {
        Ok(self
            .current()
            .map(|snapshot| snapshot.graph.dead_links())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_jar_command() {
        let command = CliCommand::java_jar("/opt/search.jar");
        assert_eq!(command.program, "java");
        assert_eq!(command.args, vec!["-jar", "/opt/search.jar"]);
        assert_eq!(command.to_string(), "java -jar /opt/search.jar");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_lines_are_results() {
        let command = CliCommand::new("sh", ["-c", "printf '/a.md\\n\\n/b.md\\n'", "sh"]);
        let index = CliNoteIndex::new(command, Arc::new(MemoryFileSystem::new()));
        assert_eq!(index.search("anything").await.unwrap(), vec!["/a.md", "/b.md"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stderr_is_failure() {
        let command = CliCommand::new("sh", ["-c", "echo broken >&2", "sh"]);
        let index = CliNoteIndex::new(command, Arc::new(MemoryFileSystem::new()));
        let err = index.search("anything").await.unwrap_err();
        assert!(matches!(err, Error::SubprocessError { .. }));
        assert!(err.to_string().contains("broken"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let command = CliCommand::new("sh", ["-c", "exit 3", "sh"]);
        let index = CliNoteIndex::new(command, Arc::new(MemoryFileSystem::new()));
        assert!(index.index("/notes").await.is_err());
        assert!(index.all_tags().is_empty());
    }

    #[tokio::test]
    async fn test_missing_program_is_failure() {
        let command = CliCommand::new("notesearcher-no-such-program", Vec::<String>::new());
        let index = CliNoteIndex::new(command, Arc::new(MemoryFileSystem::new()));
        assert!(index.search("x").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_index_builds_links_in_process() {
        let fs = MemoryFileSystem::with_files([("/n/a.md", "#tag [](b.md)")]);
        let command = CliCommand::new("true", Vec::<String>::new());
        let index = CliNoteIndex::with_style(command, Arc::new(fs), PathStyle::Posix);

        index.index("/n").await.unwrap();
        assert_eq!(index.all_tags(), vec!["tag"]);
        assert_eq!(index.links_to("/n/b.md").await.unwrap(), vec!["/n/a.md"]);
        assert_eq!(index.find_all_dead_links().await.unwrap().len(), 1);
    }
}

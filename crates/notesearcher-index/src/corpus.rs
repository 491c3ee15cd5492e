//! Loading a directory into memory for one index build.

use notesearcher_core::prelude::*;
use notesearcher_graph::LinkGraph;
use notesearcher_parser::extract_tags;
use std::collections::HashSet;

/// Everything one directory walk produced.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Every file found, notes or not, in walk order
    pub files: Vec<String>,
    /// The notes among `files`, read and tagged, in walk order
    pub documents: Vec<Document>,
}

impl Corpus {
    /// Walk `root_dir` and read every note under it.
    ///
    /// Any read failure aborts the load.
    pub async fn load(fs: &dyn FileSystem, root_dir: &str) -> Result<Self> {
        let files = fs.all_files_under_path(root_dir)?;
        let mut documents = Vec::new();

        for path in files.iter().filter(|path| is_note_path(path)) {
            let text = fs.read_file(path).await?;
            let tags = extract_tags(&text);
            documents.push(Document::new(path.as_str(), text, tags));
        }

        log::debug!(
            "Loaded {} notes out of {} files under {}",
            documents.len(),
            files.len(),
            root_dir
        );
        Ok(Self { files, documents })
    }

    /// Distinct tags across all notes, first seen first
    pub fn all_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.documents
            .iter()
            .flat_map(|document| document.tags.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }

    /// Link graph and tag list for this corpus
    pub fn link_snapshot(&self, style: PathStyle) -> LinkSnapshot {
        LinkSnapshot {
            graph: LinkGraph::build(
                style,
                self.files.iter().map(String::as_str),
                &self.documents,
            ),
            tags: self.all_tags(),
        }
    }
}

/// The parts of an index build that do not depend on the search backend.
pub struct LinkSnapshot {
    pub graph: LinkGraph,
    pub tags: Vec<String>,
}

impl LinkSnapshot {
    pub fn empty(style: PathStyle) -> Self {
        Self {
            graph: LinkGraph::new(style),
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_keeps_only_notes() {
        let fs = MemoryFileSystem::with_files([
            ("/n/a.md", "#one"),
            ("/n/b.MD", "#ignored"),
            ("/n/c.png", "binary"),
            ("/n/d.log", "#two #one"),
        ]);
        let corpus = Corpus::load(&fs, "/n").await.unwrap();

        assert_eq!(corpus.files.len(), 4);
        let paths: Vec<&str> = corpus.documents.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["/n/a.md", "/n/d.log"]);
        assert_eq!(corpus.all_tags(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_link_snapshot_knows_attachments() {
        let fs = MemoryFileSystem::with_files([("/n/a.md", "![](c.png) [](gone.md)"), ("/n/c.png", "")]);
        let corpus = Corpus::load(&fs, "/n").await.unwrap();
        let snapshot = corpus.link_snapshot(PathStyle::Posix);

        let dead: Vec<String> = snapshot
            .graph
            .dead_links()
            .into_iter()
            .map(|d| d.target_path)
            .collect();
        assert_eq!(dead, vec!["/n/gone.md"]);
    }
}

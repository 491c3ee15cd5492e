//! In-process full-text index powered by tantivy
//!
//! Every build creates a fresh in-memory index from one corpus load. The
//! finished index, link graph and tag list are published together as one
//! snapshot; readers always see either the previous snapshot or the new one.

use async_trait::async_trait;
use notesearcher_core::prelude::*;
use notesearcher_graph::DeadLinkFinder;
use notesearcher_parser::expand_query_tags;
use parking_lot::RwLock;
use std::sync::Arc;
use tantivy::collector::TopDocs;
use tantivy::schema::Value;
use tantivy::tokenizer::TextAnalyzer;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, TantivyError, doc};
use tracing::instrument;

use crate::NoteIndex;
use crate::corpus::{Corpus, LinkSnapshot};
use crate::query::{NoteSchema, parse_query};
use crate::tokenizer::{
    NOTES_TOKENIZER, TAGS_TOKENIZER, index_analyzer, query_analyzer, tags_analyzer,
};

/// Maximum number of paths a search returns
pub const MAX_RESULTS: usize = 10;

const WRITER_MEMORY_BUDGET: usize = 50_000_000;

fn index_error(context: &str, err: TantivyError) -> Error {
    Error::index_error(format!("{}: {}", context, err))
}

/// A built, searchable tantivy index.
pub struct SearchIndex {
    reader: IndexReader,
    schema: NoteSchema,
    query_analyzer: TextAnalyzer,
}

impl SearchIndex {
    /// Index `documents` in order.
    pub fn build(documents: &[Document]) -> Result<Self> {
        let schema = NoteSchema::new();
        let index = Index::create_in_ram(schema.schema.clone());
        index
            .tokenizers()
            .register(NOTES_TOKENIZER, index_analyzer());
        index
            .tokenizers()
            .register(TAGS_TOKENIZER, tags_analyzer());

        // A single indexing thread keeps doc ids, and so tie order, in insertion order
        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, WRITER_MEMORY_BUDGET)
            .map_err(|e| index_error("Failed to create index writer", e))?;

        for document in documents {
            writer
                .add_document(doc!(
                    schema.path => document.path.clone(),
                    schema.text => document.text.clone(),
                    schema.tags => document.tags.join(" "),
                ))
                .map_err(|e| index_error("Failed to add document", e))?;
        }

        writer
            .commit()
            .map_err(|e| index_error("Failed to commit index", e))?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| index_error("Failed to open index reader", e))?;

        Ok(Self {
            reader,
            schema,
            query_analyzer: query_analyzer(),
        })
    }

    /// Top `limit` paths for `query`, best first.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let expanded = expand_query_tags(query);
        let mut analyzer = self.query_analyzer.clone();
        let Some(parsed) = parse_query(&expanded, &self.schema, &mut analyzer) else {
            log::debug!("Query {:?} has no searchable terms", query);
            return Ok(Vec::new());
        };

        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(&*parsed, &TopDocs::with_limit(limit))
            .map_err(|e| index_error("Search failed", e))?;

        let mut paths = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let retrieved: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| index_error("Failed to load document", e))?;
            if let Some(path) = retrieved.get_first(self.schema.path).and_then(|v| v.as_str()) {
                paths.push(path.to_string());
            }
        }
        Ok(paths)
    }
}

/// Everything one successful build produced.
struct Snapshot {
    search: SearchIndex,
    links: LinkSnapshot,
}

/// Note index backed by an in-memory tantivy index.
pub struct TantivyNoteIndex {
    fs: Arc<dyn FileSystem>,
    style: PathStyle,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl TantivyNoteIndex {
    /// Create an index that has not been built yet
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_style(fs, PathStyle::host())
    }

    /// Create an index resolving link targets in `style`
    pub fn with_style(fs: Arc<dyn FileSystem>, style: PathStyle) -> Self {
        Self {
            fs,
            style,
            snapshot: RwLock::new(None),
        }
    }

    fn current(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().clone()
    }
}

#[async_trait]
impl NoteIndex for TantivyNoteIndex {
    #[instrument(skip(self), name = "tantivy_search")]
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        match self.current() {
            Some(snapshot) => snapshot.search.search(query, MAX_RESULTS),
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self), name = "tantivy_index")]
    async fn index(&self, dir: &str) -> Result<()> {
        let corpus = Corpus::load(self.fs.as_ref(), dir).await?;
        let search = SearchIndex::build(&corpus.documents)?;
        let links = corpus.link_snapshot(self.style);

        *self.snapshot.write() = Some(Arc::new(Snapshot { search, links }));
        log::info!(
            "Indexed {} notes under {}",
            corpus.documents.len(),
            dir
        );
        Ok(())
    }

    async fn links_to(&self, path: &str) -> Result<Vec<String>> {
        Ok(self
            .current()
            .map(|snapshot| snapshot.links.graph.links_to(path))
            .unwrap_or_default())
    }

    fn all_tags(&self) -> Vec<String> {
        self.current()
            .map(|snapshot| snapshot.links.tags.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DeadLinkFinder for TantivyNoteIndex {
    async fn find_all_dead_links(&self) -> Result<Vec<DeadLink>> {
        Ok(self
            .current()
            .map(|snapshot| snapshot.links.graph.dead_links())
            .unwrap_or_default())
    }
}

//! Link graph using petgraph for note relationship analysis

use notesearcher_core::prelude::*;
use notesearcher_parser::extract_links;
use petgraph::prelude::*;
use std::collections::{HashMap, HashSet};

/// Node index type for graph
type NodeIndex = petgraph::graph::NodeIndex;

/// Directed graph of links between notes.
///
/// Nodes are path strings: every known file plus every resolved link target,
/// whether or not a file exists there. Edges are links, carrying the resolved
/// target path, and are never removed, so edge order is insertion order.
pub struct LinkGraph {
    style: PathStyle,

    /// Directed graph: nodes are paths, edges are resolved links
    graph: DiGraph<String, Link>,

    /// Map from path to node index (for quick lookups)
    path_index: HashMap<String, NodeIndex>,

    /// Paths of files that exist in the corpus
    known_paths: HashSet<String>,
}

impl LinkGraph {
    /// Create an empty graph resolving paths in `style`
    pub fn new(style: PathStyle) -> Self {
        Self {
            style,
            graph: DiGraph::new(),
            path_index: HashMap::new(),
            known_paths: HashSet::new(),
        }
    }

    /// Build a graph from one corpus load.
    ///
    /// `known_paths` is every walked file; `documents` are the notes whose
    /// links are extracted, in indexing order.
    pub fn build<'a>(
        style: PathStyle,
        known_paths: impl IntoIterator<Item = &'a str>,
        documents: impl IntoIterator<Item = &'a Document>,
    ) -> Self {
        let mut graph = Self::new(style);
        for path in known_paths {
            graph.add_known_path(path);
        }
        for document in documents {
            graph.add_document(&document.path, &document.text);
        }

        log::debug!(
            "Built link graph: {} known paths, {} links",
            graph.known_paths.len(),
            graph.edge_count()
        );
        graph
    }

    /// Record that a file exists at `path`
    pub fn add_known_path(&mut self, path: &str) {
        self.known_paths.insert(path.to_string());
        self.node(path);
    }

    /// Add a note: it becomes a known path and its links become edges.
    pub fn add_document(&mut self, path: &str, text: &str) {
        self.add_known_path(path);

        let source_dir = self.style.dirname(path);
        let source_idx = self.node(path);

        for link in extract_links(path, text) {
            let resolved = self.style.resolve(&source_dir, &link.target_path);
            let target_idx = self.node(&resolved);
            let edge = Link::new(link.source_path, resolved, link.source_line);
            self.graph.add_edge(source_idx, target_idx, edge);
        }
    }

    /// Get or create the node for `path`
    fn node(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.path_index.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.to_string());
        self.path_index.insert(path.to_string(), idx);
        idx
    }

    /// Whether a file exists at exactly `path`
    pub fn is_known(&self, path: &str) -> bool {
        self.known_paths.contains(path)
    }

    /// Every link whose resolved target is not a known path.
    ///
    /// Ordered by source document in indexing order, then by source line.
    pub fn dead_links(&self) -> Vec<DeadLink> {
        self.graph
            .edge_indices()
            .filter_map(|idx| self.graph.edge_weight(idx))
            .filter(|link| !self.is_known(&link.target_path))
            .cloned()
            .map(DeadLink::from)
            .collect()
    }

    /// Distinct source paths of links resolving exactly to `path`, in link
    /// insertion order. Works for dead targets too.
    pub fn links_to(&self, path: &str) -> Vec<String> {
        let Some(&target_idx) = self.path_index.get(path) else {
            return Vec::new();
        };

        // petgraph walks incoming edges newest first
        let mut incoming: Vec<EdgeIndex> = self
            .graph
            .edges_directed(target_idx, Incoming)
            .map(|edge| edge.id())
            .collect();
        incoming.sort();

        let mut seen = HashSet::new();
        incoming
            .into_iter()
            .filter_map(|idx| self.graph.edge_endpoints(idx))
            .map(|(source, _)| &self.graph[source])
            .filter(|source| seen.insert(*source))
            .cloned()
            .collect()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new(PathStyle::host())
    }
}

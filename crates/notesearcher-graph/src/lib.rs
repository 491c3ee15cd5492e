//! # Link Graph Analysis
//!
//! Link graph over a note corpus using petgraph.
//!
//! Provides:
//! - Directed graph of notes and the links between them
//! - Link target resolution against the source note's directory
//! - Dead link detection
//! - Backlink queries
//!
//! ## Quick Start
//!
//! ```
//! use notesearcher_graph::LinkGraph;
//! use notesearcher_core::PathStyle;
//!
//! let mut graph = LinkGraph::new(PathStyle::Posix);
//! graph.add_document("/notes/a.md", "See [b](b.md) and [gone](../gone.md)");
//! graph.add_document("/notes/b.md", "");
//!
//! let dead = graph.dead_links();
//! assert_eq!(dead.len(), 1);
//! assert_eq!(dead[0].target_path, "/gone.md");
//!
//! assert_eq!(graph.links_to("/notes/b.md"), vec!["/notes/a.md"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Known paths**: every file found by the directory walk, notes or not.
//!   Links to images and attachments are live as long as the file exists.
//! - **Edges**: one per extracted link, pointing at the resolved target path.
//!   Several edges may leave the same note for the same target.
//! - **Dead link**: an edge whose resolved target is not a known path, by
//!   exact string comparison.
//!
//! ## Modules
//!
//! - [`graph`] - Main LinkGraph implementation
//! - [`dead_links`] - The dead link finder seam

pub mod dead_links;
pub mod graph;

pub use dead_links::DeadLinkFinder;
pub use graph::LinkGraph;

pub mod prelude {
    pub use crate::dead_links::DeadLinkFinder;
    pub use crate::graph::LinkGraph;
    pub use notesearcher_core::prelude::*;
}

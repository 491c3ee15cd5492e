//! Dead link reporting.

use crate::graph::LinkGraph;
use async_trait::async_trait;
use notesearcher_core::{DeadLink, Result};

/// Source of the dead links in the most recently indexed corpus.
#[async_trait]
pub trait DeadLinkFinder: Send + Sync {
    async fn find_all_dead_links(&self) -> Result<Vec<DeadLink>>;
}

#[async_trait]
impl DeadLinkFinder for LinkGraph {
    async fn find_all_dead_links(&self) -> Result<Vec<DeadLink>> {
        Ok(self.dead_links())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notesearcher_core::PathStyle;

    #[tokio::test]
    async fn test_finds_dead_link() {
        let mut graph = LinkGraph::new(PathStyle::Posix);
        graph.add_document("/a.md", "[](/b.txt)");

        let finder: &dyn DeadLinkFinder = &graph;
        let dead = finder.find_all_dead_links().await.unwrap();
        assert_eq!(dead.len(), 1);
        assert_eq!(dead[0].to_string(), "/a.md:1: dead link to /b.txt");
    }

    #[tokio::test]
    async fn test_no_dead_links_once_target_exists() {
        let mut graph = LinkGraph::new(PathStyle::Posix);
        graph.add_document("/a.md", "[](/b.txt)");
        graph.add_document("/b.txt", "");

        assert!(graph.find_all_dead_links().await.unwrap().is_empty());
    }
}

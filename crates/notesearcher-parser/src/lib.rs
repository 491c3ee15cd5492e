//! # Note Searcher Parser
//!
//! Tag, link and query text processing for plain-text notes.
//!
//! This crate provides:
//! - Inline tag extraction: `#tag`, `#meat-pie`
//! - Markdown link extraction with 1-based source lines: `[label](target)`
//! - Query rewriting from `#tag` to the `tags:` field
//! - "Related notes" query construction from tags and keywords
//! - A pluggable keyword extractor
//!
//! ## Quick Start
//!
//! ```
//! use notesearcher_parser::{extract_links, extract_tags, expand_query_tags};
//!
//! let text = "Notes on #rust\nSee [the guide](guide.md) and [](../b.txt)";
//!
//! assert_eq!(extract_tags(text), vec!["rust"]);
//!
//! let links = extract_links("/notes/a.md", text);
//! assert_eq!(links.len(), 2);
//! assert_eq!(links[0].target_path, "guide.md");
//! assert_eq!(links[1].source_line, 2);
//!
//! assert_eq!(expand_query_tags("+#rust -draft"), "+tags:rust -draft");
//! ```
//!
//! ## Link targets
//!
//! Targets are returned exactly as authored. Resolving them against the
//! source note's directory is the link graph's job, since it depends on the
//! host path style.

pub mod parsers;

pub use parsers::{
    FrequencyKeywordExtractor, KeywordExtractor, TAGS_FIELD, create_tag_and_keyword_query,
    expand_query_tags, extract_links, extract_tags,
};

// Re-export core types for consumers
pub use notesearcher_core::Link;

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::{
        FrequencyKeywordExtractor, KeywordExtractor, Link, TAGS_FIELD,
        create_tag_and_keyword_query, expand_query_tags, extract_links, extract_tags,
    };
}

//! Inline link extractor: `[label](destination)`
//!
//! Text is scanned one line at a time, so a link never spans lines. The label
//! may be empty (`[](other.md)` is the form the link generator writes). Only
//! links to files are emitted: URLs and same-document anchors are skipped, as
//! are destinations that are empty after cleaning.

use regex::Regex;
use std::sync::LazyLock;

use notesearcher_core::Link;

use super::link_utils::{LinkTarget, classify_destination, clean_destination};

/// Matches `[label](destination)`, with one level of nested brackets in the label.
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<label>[^\[\]]*(?:\[[^\[\]]*\][^\[\]]*)*)\]\((?P<dest>[^()]*)\)").unwrap()
});

/// Fast pre-filter: skip regex if no markdown link pattern exists.
#[inline]
fn has_markdown_link(content: &str) -> bool {
    content.contains("](")
}

/// Extract file links from `text`, with targets exactly as authored.
///
/// Lines are numbered from 1. Links are returned in line order, then in order
/// of appearance within the line.
pub fn extract_links(source_path: &str, text: &str) -> Vec<Link> {
    if !has_markdown_link(text) {
        return Vec::new();
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| has_markdown_link(line))
        .flat_map(|(i, line)| {
            MARKDOWN_LINK
                .captures_iter(line)
                .filter_map(|caps| caps.name("dest"))
                .map(|dest| clean_destination(dest.as_str()))
                .filter(|dest| !dest.is_empty())
                .filter(|dest| classify_destination(dest) == LinkTarget::File)
                .map(move |dest| Link::new(source_path, dest, i + 1))
                .collect::<Vec<_>>()
        })
        .collect()
}

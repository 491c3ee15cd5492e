//! Inline tag parser: `#tag`, `#meat-pie`
//!
//! A tag starts with `#` at the start of the text or after whitespace and runs
//! to the next whitespace, punctuation included: `#v1.2`, `#c++`, `#todo/done`.
//! This is the same token `expand_query_tags` rewrites, so `#<tag>` in a query
//! finds the note. A `#` inside a word (`no#t`) is not a tag.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#(\S+)").unwrap());

/// Extract the tags of `text`, deduplicated, in first-seen order.
pub fn extract_tags(text: &str) -> Vec<String> {
    if !text.contains('#') {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    TAG_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tag() {
        assert_eq!(extract_tags("This is #rust code"), vec!["rust"]);
    }

    #[test]
    fn test_multiple_tags() {
        assert_eq!(
            extract_tags("The tags are #beef and #chowder"),
            vec!["beef", "chowder"]
        );
    }

    #[test]
    fn test_hyphenated_tag() {
        assert_eq!(extract_tags("I want a #meat-pie"), vec!["meat-pie"]);
    }

    #[test]
    fn test_tag_at_line_start() {
        assert_eq!(extract_tags("#first\n#second line"), vec!["first", "second"]);
    }

    #[test]
    fn test_tag_is_whole_non_whitespace_run() {
        assert_eq!(
            extract_tags("release #v1.2 in #c++ for #todo/done"),
            vec!["v1.2", "c++", "todo/done"]
        );
        assert_eq!(extract_tags("(#one, #two)"), vec!["two)"]);
    }

    #[test]
    fn test_tags_match_query_expansion() {
        use crate::parsers::query::expand_query_tags;

        for tag in ["meat-pie", "v1.2", "c++", "todo/done"] {
            let text = format!("note about #{} here", tag);
            assert_eq!(extract_tags(&text), vec![tag]);
            assert_eq!(expand_query_tags(&format!("#{}", tag)), format!("tags:{}", tag));
        }
    }

    #[test]
    fn test_embedded_hash_is_not_a_tag() {
        assert!(extract_tags("this is no#t a tag").is_empty());
        assert!(extract_tags("# Heading").is_empty());
    }

    #[test]
    fn test_tags_are_deduplicated() {
        assert_eq!(extract_tags("#tag and #tag again #other"), vec!["tag", "other"]);
    }

    #[test]
    fn test_no_tags() {
        assert!(extract_tags("now there are no tags").is_empty());
    }
}

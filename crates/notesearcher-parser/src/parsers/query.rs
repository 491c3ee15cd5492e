//! Query text rewriting.
//!
//! Tags live in their own `tags` field of the index, so `#tag` in a query is
//! rewritten to the field-qualified `tags:tag` before the query is parsed.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Name of the index field that holds a note's tags
pub const TAGS_FIELD: &str = "tags";

/// `#` at the start, after whitespace, or right after a `+`/`-` operator.
static QUERY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(^|\s|\+|-)#(\S+)").unwrap());

/// Rewrite every `#tag` in `query` to `tags:tag`.
///
/// ```
/// use notesearcher_parser::expand_query_tags;
///
/// assert_eq!(expand_query_tags("hello #tag boy"), "hello tags:tag boy");
/// assert_eq!(expand_query_tags("dont include this -#tag"), "dont include this -tags:tag");
/// assert_eq!(expand_query_tags("this is no#t a tag"), "this is no#t a tag");
/// ```
pub fn expand_query_tags(query: &str) -> String {
    QUERY_TAG
        .replace_all(query, format!("${{1}}{}:${{2}}", TAGS_FIELD).as_str())
        .into_owned()
}

/// Build a "related notes" query from a note's tags and keywords.
///
/// Every tag becomes `#tag`, in order. Keywords follow in order, minus any
/// that are also tags since the tag term already covers them.
pub fn create_tag_and_keyword_query(tags: &[String], keywords: &[String]) -> String {
    let tag_set: HashSet<&str> = tags.iter().map(String::as_str).collect();

    tags.iter()
        .map(|tag| format!("#{}", tag))
        .chain(
            keywords
                .iter()
                .filter(|keyword| !tag_set.contains(keyword.as_str()))
                .cloned(),
        )
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_replaces_tag_at_start() {
        assert_eq!(expand_query_tags("#tag"), "tags:tag");
    }

    #[test]
    fn test_replaces_tag_in_middle() {
        assert_eq!(expand_query_tags("hello #tag boy"), "hello tags:tag boy");
    }

    #[test]
    fn test_replaces_multiple_tags() {
        assert_eq!(expand_query_tags("hello #tag #boy"), "hello tags:tag tags:boy");
    }

    #[test]
    fn test_does_not_replace_non_tag() {
        let query = "this is no#t a tag";
        assert_eq!(expand_query_tags(query), query);
    }

    #[test]
    fn test_works_with_operators() {
        assert_eq!(
            expand_query_tags("dont include this -#tag"),
            "dont include this -tags:tag"
        );
        assert_eq!(expand_query_tags("+#must -#not"), "+tags:must -tags:not");
    }

    #[test]
    fn test_keeps_hyphenated_tag_whole() {
        assert_eq!(expand_query_tags("#meat-pie"), "tags:meat-pie");
    }

    #[test]
    fn test_tag_and_keyword_query() {
        let query = create_tag_and_keyword_query(&strings(&["a", "b", "c"]), &strings(&["d", "e"]));
        assert_eq!(query, "#a #b #c d e");
    }

    #[test]
    fn test_tag_and_keyword_query_removes_overlap() {
        let query = create_tag_and_keyword_query(&strings(&["a", "b", "c"]), &strings(&["c", "d"]));
        assert_eq!(query, "#a #b #c d");
    }

    #[test]
    fn test_tag_and_keyword_query_empty() {
        assert_eq!(create_tag_and_keyword_query(&[], &[]), "");
        assert_eq!(create_tag_and_keyword_query(&[], &strings(&["x"])), "x");
    }
}

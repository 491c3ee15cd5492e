//! Text processing for notes and queries.
//!
//! Each submodule is a self-contained, regex-based extractor. Nothing here
//! touches the file system; callers hand in the text they already read.

pub mod keywords;
pub mod link_utils;
pub mod links;
pub mod query;
pub mod tags;

pub use self::keywords::{FrequencyKeywordExtractor, KeywordExtractor};
pub use self::links::extract_links;
pub use self::query::{TAGS_FIELD, create_tag_and_keyword_query, expand_query_tags};
pub use self::tags::extract_tags;

//! Keyword extraction for "related notes" queries.
//!
//! The extractor is a collaborator behind [`KeywordExtractor`]; the default
//! [`FrequencyKeywordExtractor`] ranks words by how often they occur, after
//! dropping stopwords, short words, tags and link syntax.

use async_trait::async_trait;
use notesearcher_core::Result;
use std::collections::HashMap;

/// Pulls the most characteristic words out of a note's text.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<String>>;
}

/// Frequency-ranked keywords.
#[derive(Debug, Clone)]
pub struct FrequencyKeywordExtractor {
    max_keywords: usize,
    min_length: usize,
}

impl FrequencyKeywordExtractor {
    pub fn new(max_keywords: usize) -> Self {
        Self {
            max_keywords,
            min_length: 4,
        }
    }

    /// Rank words of `text`; ties keep first-occurrence order.
    pub fn keywords(&self, text: &str) -> Vec<String> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

        for (position, word) in text
            .split_whitespace()
            .filter(|word| !word.starts_with('#') && !word.contains("]("))
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|word| word.chars().count() >= self.min_length)
            .filter(|word| !is_stopword(word))
            .enumerate()
        {
            counts.entry(word).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_b.cmp(count_a).then(first_a.cmp(first_b))
        });

        ranked
            .into_iter()
            .take(self.max_keywords)
            .map(|(word, _)| word)
            .collect()
    }
}

impl Default for FrequencyKeywordExtractor {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
impl KeywordExtractor for FrequencyKeywordExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.keywords(text))
    }
}

/// Check if word is a common stopword
fn is_stopword(word: &str) -> bool {
    matches!(
        word,
        "about"
            | "after"
            | "again"
            | "also"
            | "been"
            | "before"
            | "being"
            | "between"
            | "both"
            | "could"
            | "does"
            | "doing"
            | "down"
            | "each"
            | "from"
            | "further"
            | "have"
            | "having"
            | "here"
            | "into"
            | "just"
            | "more"
            | "most"
            | "much"
            | "must"
            | "only"
            | "other"
            | "over"
            | "same"
            | "should"
            | "some"
            | "such"
            | "than"
            | "that"
            | "their"
            | "them"
            | "then"
            | "there"
            | "these"
            | "they"
            | "this"
            | "those"
            | "through"
            | "under"
            | "until"
            | "very"
            | "were"
            | "what"
            | "when"
            | "where"
            | "which"
            | "while"
            | "will"
            | "with"
            | "would"
            | "your"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_by_frequency() {
        let extractor = FrequencyKeywordExtractor::new(2);
        let text = "rust is fast. rust is safe. tokio runs rust async code with tokio";
        assert_eq!(extractor.keywords(text), vec!["rust", "tokio"]);
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let extractor = FrequencyKeywordExtractor::default();
        assert_eq!(
            extractor.keywords("zebra apple mango"),
            vec!["zebra", "apple", "mango"]
        );
    }

    #[test]
    fn test_filters_noise() {
        let extractor = FrequencyKeywordExtractor::default();
        let keywords = extractor.keywords("This would be #tagged with [link](x.md) and few words");
        assert_eq!(keywords, vec!["words"]);
    }

    #[test]
    fn test_is_stopword() {
        assert!(is_stopword("that"));
        assert!(is_stopword("with"));
        assert!(!is_stopword("rust"));
    }

    #[tokio::test]
    async fn test_extract_via_trait() {
        let extractor: Box<dyn KeywordExtractor> = Box::new(FrequencyKeywordExtractor::default());
        let keywords = extractor.extract("biscuits and shoes").await.unwrap();
        assert_eq!(keywords, vec!["biscuits", "shoes"]);
    }
}

//! Whitespace tokenizer and the index/query analyzers built on it.
//!
//! Splitting on whitespace only keeps hyphenated tags like `meat-pie` whole.
//! The index side trims punctuation off each token; the query side does not,
//! so a quoted term such as `"ham` matches nothing.

use tantivy::tokenizer::{
    Language, LowerCaser, Stemmer, StopWordFilter, TextAnalyzer, Token, TokenStream, Tokenizer,
};

/// Name the text analyzer is registered under
pub const NOTES_TOKENIZER: &str = "notes";

/// Name the tags analyzer is registered under
pub const TAGS_TOKENIZER: &str = "notes_tags";

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Splits text on whitespace, optionally trimming non-word characters off
/// both ends of every token.
#[derive(Clone, Debug)]
pub struct WhitespaceTokenizer {
    trim: bool,
}

impl WhitespaceTokenizer {
    /// Tokenizer for document text
    pub fn trimming() -> Self {
        Self { trim: true }
    }

    /// Tokenizer for query terms
    pub fn verbatim() -> Self {
        Self { trim: false }
    }
}

impl Tokenizer for WhitespaceTokenizer {
    type TokenStream<'a> = WhitespaceTokenStream;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        let mut tokens = Vec::new();
        let mut start = None;

        for (offset, ch) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            match (ch.is_whitespace(), start) {
                (false, None) => start = Some(offset),
                (true, Some(from)) => {
                    if let Some(token) = self.make_token(text, from, offset) {
                        tokens.push(token);
                    }
                    start = None;
                }
                _ => {}
            }
        }

        WhitespaceTokenStream {
            tokens,
            index: 0,
            token: Token::default(),
        }
    }
}

impl WhitespaceTokenizer {
    fn make_token(&self, text: &str, from: usize, to: usize) -> Option<TokenData> {
        let word = &text[from..to];
        let (from, word) = if self.trim {
            let leading = word.len() - word.trim_start_matches(|c: char| !is_word_char(c)).len();
            let trimmed = word.trim_matches(|c: char| !is_word_char(c));
            (from + leading, trimmed)
        } else {
            (from, word)
        };

        if word.is_empty() {
            return None;
        }

        Some(TokenData {
            text: word.to_string(),
            offset_from: from,
            offset_to: from + word.len(),
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct TokenData {
    text: String,
    offset_from: usize,
    offset_to: usize,
}

pub struct WhitespaceTokenStream {
    tokens: Vec<TokenData>,
    index: usize,
    token: Token,
}

impl TokenStream for WhitespaceTokenStream {
    fn advance(&mut self) -> bool {
        if self.index < self.tokens.len() {
            let data = &self.tokens[self.index];
            self.token = Token {
                offset_from: data.offset_from,
                offset_to: data.offset_to,
                position: self.index,
                text: data.text.clone(),
                position_length: 1,
            };
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

fn analyzer(tokenizer: WhitespaceTokenizer) -> TextAnalyzer {
    TextAnalyzer::builder(tokenizer)
        .filter(LowerCaser)
        .filter(StopWordFilter::remove(
            STOP_WORDS.iter().map(|word| word.to_string()),
        ))
        .filter(Stemmer::new(Language::English))
        .build()
}

/// Analyzer for the `text` field at index time
pub fn index_analyzer() -> TextAnalyzer {
    analyzer(WhitespaceTokenizer::trimming())
}

/// Analyzer for the `tags` field at index time.
///
/// Tags keep their punctuation, so they are analyzed like query terms.
pub fn tags_analyzer() -> TextAnalyzer {
    analyzer(WhitespaceTokenizer::verbatim())
}

/// Analyzer applied to each query term
pub fn query_analyzer() -> TextAnalyzer {
    analyzer(WhitespaceTokenizer::verbatim())
}

/// Run `text` through `analyzer`, collecting the resulting terms.
pub fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut stream = analyzer.token_stream(text);
    while stream.advance() {
        terms.push(stream.token().text.clone());
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_tokens(mut tokenizer: WhitespaceTokenizer, text: &str) -> Vec<(String, usize, usize)> {
        let mut stream = tokenizer.token_stream(text);
        let mut out = Vec::new();
        while stream.advance() {
            let token = stream.token();
            out.push((token.text.clone(), token.offset_from, token.offset_to));
        }
        out
    }

    #[test]
    fn test_splits_on_whitespace_only() {
        let tokens = raw_tokens(WhitespaceTokenizer::verbatim(), "meat-pie  and\tgravy\n");
        let texts: Vec<&str> = tokens.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["meat-pie", "and", "gravy"]);
    }

    #[test]
    fn test_trimming_adjusts_offsets() {
        let tokens = raw_tokens(WhitespaceTokenizer::trimming(), "say \"hello,\" (#tag)");
        assert_eq!(
            tokens,
            vec![
                ("say".to_string(), 0, 3),
                ("hello".to_string(), 5, 10),
                ("tag".to_string(), 15, 18)
            ]
        );
    }

    #[test]
    fn test_punctuation_only_tokens_are_dropped() {
        assert!(raw_tokens(WhitespaceTokenizer::trimming(), "-- ... !!").is_empty());
    }

    #[test]
    fn test_index_analyzer_stems_and_drops_stop_words() {
        let mut analyzer = index_analyzer();
        assert_eq!(
            analyze(&mut analyzer, "The ham IS good, and Jumping!"),
            vec!["ham", "good", "jump"]
        );
    }

    #[test]
    fn test_query_analyzer_keeps_quotes() {
        let mut analyzer = query_analyzer();
        assert_eq!(analyze(&mut analyzer, "\"ham"), vec!["\"ham"]);
        assert!(analyze(&mut analyzer, "is").is_empty());
    }

    #[test]
    fn test_tags_analyze_like_query_terms() {
        let mut tags = tags_analyzer();
        let mut query = query_analyzer();
        for tag in ["meat-pie", "v1.2", "c++", "todo/done", "two)"] {
            let indexed = analyze(&mut tags, tag);
            assert_eq!(indexed.len(), 1);
            assert_eq!(indexed, analyze(&mut query, tag));
        }
    }

    #[test]
    fn test_hyphenated_tag_is_one_term() {
        let mut index = index_analyzer();
        let mut query = query_analyzer();
        let indexed = analyze(&mut index, "#meat-pie");
        assert_eq!(indexed.len(), 1);
        assert_eq!(indexed, analyze(&mut query, "meat-pie"));
        assert_ne!(indexed, analyze(&mut query, "meat"));
    }
}

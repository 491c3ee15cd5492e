//! Query language for the in-process index.
//!
//! Whitespace separates terms. A term is optional by default; `+term` is
//! required and `-term` excluded. `text:term` and `tags:term` restrict a term
//! to one field, otherwise it matches either. There are no phrases: quote
//! characters are part of the term they touch.

use notesearcher_parser::TAGS_FIELD;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions};
use tantivy::tokenizer::TextAnalyzer;
use tantivy::Term;

use crate::tokenizer::{NOTES_TOKENIZER, TAGS_TOKENIZER, analyze};

/// Name of the document text field
pub const TEXT_FIELD: &str = "text";

/// Name of the stored path field
pub const PATH_FIELD: &str = "path";

/// Index schema and its field handles.
#[derive(Clone, Debug)]
pub struct NoteSchema {
    pub schema: Schema,
    pub path: Field,
    pub text: Field,
    pub tags: Field,
}

impl NoteSchema {
    pub fn new() -> Self {
        let analyzed = |tokenizer: &str| {
            TextOptions::default().set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(tokenizer)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
        };

        let mut builder = Schema::builder();
        let path = builder.add_text_field(PATH_FIELD, STRING | STORED);
        let text = builder.add_text_field(TEXT_FIELD, analyzed(NOTES_TOKENIZER));
        let tags = builder.add_text_field(TAGS_FIELD, analyzed(TAGS_TOKENIZER));

        Self {
            schema: builder.build(),
            path,
            text,
            tags,
        }
    }

    /// Searchable field by name
    fn searchable(&self, name: &str) -> Option<Field> {
        match name {
            TEXT_FIELD => Some(self.text),
            TAGS_FIELD => Some(self.tags),
            _ => None,
        }
    }
}

impl Default for NoteSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `query` into a tantivy query.
///
/// `#tag` must already be expanded to `tags:tag`. Returns `None` when no term
/// survives analysis, e.g. a query of only stop words.
pub fn parse_query(
    query: &str,
    schema: &NoteSchema,
    analyzer: &mut TextAnalyzer,
) -> Option<Box<dyn Query>> {
    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();

    for raw in query.split_whitespace() {
        let (occur, term) = split_operator(raw);
        let (fields, term) = match split_field(term, schema) {
            Some((field, term)) => (vec![field], term),
            None => (vec![schema.text, schema.tags], term),
        };

        let Some(analyzed) = analyze(analyzer, term).into_iter().next() else {
            log::trace!("Dropping query term {:?}", raw);
            continue;
        };

        let mut per_field: Vec<Box<dyn Query>> = fields
            .into_iter()
            .map(|field| {
                Box::new(TermQuery::new(
                    Term::from_field_text(field, &analyzed),
                    IndexRecordOption::WithFreqs,
                )) as Box<dyn Query>
            })
            .collect();

        let clause = if per_field.len() == 1 {
            per_field.remove(0)
        } else {
            Box::new(BooleanQuery::new(
                per_field.into_iter().map(|q| (Occur::Should, q)).collect(),
            ))
        };
        clauses.push((occur, clause));
    }

    if clauses.is_empty() {
        return None;
    }
    Some(Box::new(BooleanQuery::new(clauses)))
}

fn split_operator(raw: &str) -> (Occur, &str) {
    if let Some(rest) = raw.strip_prefix('+') {
        (Occur::Must, rest)
    } else if let Some(rest) = raw.strip_prefix('-') {
        (Occur::MustNot, rest)
    } else {
        (Occur::Should, raw)
    }
}

fn split_field<'a>(term: &'a str, schema: &NoteSchema) -> Option<(Field, &'a str)> {
    let (name, rest) = term.split_once(':')?;
    schema.searchable(name).map(|field| (field, rest))
}

//! Materialized search hits.

use serde::de::DeserializeOwned;

use crate::document::{Document, FieldValue};
use crate::error::Result;
use crate::response::Doc;
use crate::search::SearchSession;

/// One matched document, built on demand from a result set position.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    document: Document,
    id: Option<String>,
    score: Option<f64>,
}

impl SearchHit {
    /// Create a new hit.
    pub fn new(document: Document, id: Option<String>, score: Option<f64>) -> Self {
        SearchHit {
            document,
            id,
            score,
        }
    }

    /// Unique key of the document, when it carries one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Relevance score, when scores were requested.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Read one field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.document.get_field(name)
    }

    /// The hit's document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take the hit's document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Deserialize the document into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        self.document.deserialize_into()
    }
}

/// Builds [`SearchHit`] values from normalized documents.
///
/// A session holds one factory; result sets call it each time a position
/// is read.
pub trait HitFactory {
    /// Build the hit for one document.
    fn instantiate(&self, doc: &Doc, search: &SearchSession) -> SearchHit;
}

/// Factory reading the id and score fields named in the session config.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHitFactory;

impl HitFactory for DefaultHitFactory {
    fn instantiate(&self, doc: &Doc, search: &SearchSession) -> SearchHit {
        let document = doc.to_document();
        let config = search.config();

        let id = document
            .get_field(&config.unique_key)
            .and_then(|value| match value {
                FieldValue::Text(s) => Some(s.clone()),
                FieldValue::Integer(i) => Some(i.to_string()),
                _ => None,
            });
        let score = document
            .get_field(&config.score_field)
            .and_then(|value| value.as_float());

        SearchHit::new(document, id, score)
    }
}

//! Entity lifecycle listener.

use crate::document::{Document, FieldValue};
use crate::error::{Result, SolrineError};

/// Field holding the unique key of an indexed entity.
pub const UNIQUE_KEY_FIELD: &str = "guid";

/// Field holding the model name of an indexed entity.
pub const MODEL_FIELD: &str = "model";

/// An entity the persistence layer can index.
pub trait Indexable {
    /// Name of the entity's model (table, class).
    fn model_name(&self) -> &str;

    /// Primary key, rendered as text.
    fn primary_key(&self) -> String;

    /// Fields to index.
    fn index_fields(&self) -> Document;

    /// Whether the entity should currently be in the index.
    fn is_indexable(&self) -> bool {
        true
    }
}

/// What happened to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The entity was created.
    Insert,
    /// The entity was modified.
    Update,
    /// The entity was removed.
    Delete,
}

/// Writes to and deletes from the search index.
///
/// Implemented by the search client; the listener never talks to the
/// server itself.
pub trait Indexer {
    /// Add or replace a document.
    fn save(&mut self, document: Document) -> Result<()>;

    /// Remove the document with this unique key.
    fn delete(&mut self, unique_key: &str) -> Result<()>;
}

/// Unique key of an entity: `{model}_{primary key}`.
pub fn unique_key<E: Indexable + ?Sized>(entity: &E) -> String {
    format!("{}_{}", entity.model_name(), entity.primary_key())
}

/// Unique key of an entity that is ready to be indexed.
///
/// Fails with [`SolrineError::Index`] when the primary key is empty: such
/// an entity has not been persisted yet and its key would collide.
fn indexed_key<E: Indexable + ?Sized>(entity: &E) -> Result<String> {
    if entity.primary_key().is_empty() {
        return Err(SolrineError::index(format!(
            "{} entity has no primary key",
            entity.model_name()
        )));
    }
    Ok(unique_key(entity))
}

/// Build the document indexed for an entity.
///
/// The entity's fields are completed with the unique key and model fields,
/// which take precedence over entity fields of the same name.
pub fn document_from<E: Indexable + ?Sized>(entity: &E) -> Document {
    let mut document = entity.index_fields();
    document.add_field(UNIQUE_KEY_FIELD, FieldValue::Text(unique_key(entity)));
    document.add_field(MODEL_FIELD, FieldValue::Text(entity.model_name().to_string()));
    document
}

/// Reindexes entities as the persistence layer reports changes.
#[derive(Debug)]
pub struct IndexListener<I: Indexer> {
    indexer: I,
}

impl<I: Indexer> IndexListener<I> {
    /// Create a listener writing through `indexer`.
    pub fn new(indexer: I) -> Self {
        IndexListener { indexer }
    }

    /// The underlying indexer.
    pub fn indexer(&self) -> &I {
        &self.indexer
    }

    /// Take the underlying indexer.
    pub fn into_indexer(self) -> I {
        self.indexer
    }

    /// React to a committed change.
    ///
    /// Entities that are not indexable are skipped on insert and removed
    /// on update.
    pub fn on_entity_changed<E: Indexable + ?Sized>(
        &mut self,
        entity: &E,
        change: ChangeKind,
    ) -> Result<()> {
        let key = indexed_key(entity)?;

        match change {
            ChangeKind::Insert if entity.is_indexable() => {
                log::debug!("Indexing new entity {key}");
                self.indexer.save(document_from(entity))
            }
            ChangeKind::Insert => {
                log::debug!("Skipping non-indexable entity {key}");
                Ok(())
            }
            ChangeKind::Update if entity.is_indexable() => {
                log::debug!("Reindexing entity {key}");
                self.indexer.save(document_from(entity))
            }
            ChangeKind::Update | ChangeKind::Delete => {
                log::debug!("Removing entity {key} from the index");
                self.indexer.delete(&key)
            }
        }
    }

    /// Rewrite an entity's document: delete it, then insert it again when
    /// the entity is indexable.
    pub fn save_index<E: Indexable + ?Sized>(&mut self, entity: &E) -> Result<()> {
        let key = indexed_key(entity)?;
        self.indexer.delete(&key)?;

        if entity.is_indexable() {
            self.indexer.save(document_from(entity))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Article {
        id: u32,
        title: &'static str,
    }

    impl Indexable for Article {
        fn model_name(&self) -> &str {
            "Article"
        }

        fn primary_key(&self) -> String {
            self.id.to_string()
        }

        fn index_fields(&self) -> Document {
            Document::builder()
                .add_text("title", self.title)
                .add_text(MODEL_FIELD, "overridden")
                .build()
        }
    }

    #[test]
    fn test_document_from() {
        let article = Article { id: 7, title: "Hello" };
        let document = document_from(&article);

        assert_eq!(unique_key(&article), "Article_7");
        assert_eq!(
            document.get_field(UNIQUE_KEY_FIELD).and_then(|v| v.as_text()),
            Some("Article_7")
        );
        assert_eq!(
            document.get_field(MODEL_FIELD).and_then(|v| v.as_text()),
            Some("Article")
        );
        assert_eq!(document.get_field("title").and_then(|v| v.as_text()), Some("Hello"));
    }

    struct Unsaved;

    impl Indexable for Unsaved {
        fn model_name(&self) -> &str {
            "Article"
        }

        fn primary_key(&self) -> String {
            String::new()
        }

        fn index_fields(&self) -> Document {
            Document::new()
        }
    }

    #[test]
    fn test_entity_without_primary_key_is_rejected() {
        let err = indexed_key(&Unsaved).unwrap_err();
        assert!(matches!(err, SolrineError::Index(_)));
        assert_eq!(err.to_string(), "Index error: Article entity has no primary key");
    }
}

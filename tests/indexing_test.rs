//! Integration tests for the persistence hook.

use solrine::document::Document;
use solrine::error::{Result, SolrineError};
use solrine::indexing::{ChangeKind, IndexListener, Indexable, Indexer, UNIQUE_KEY_FIELD};

#[derive(Debug, Default)]
struct RecordingIndexer {
    saved: Vec<Document>,
    deleted: Vec<String>,
    fail_saves: bool,
}

impl Indexer for RecordingIndexer {
    fn save(&mut self, document: Document) -> Result<()> {
        if self.fail_saves {
            return Err(anyhow::anyhow!("connection refused").into());
        }
        self.saved.push(document);
        Ok(())
    }

    fn delete(&mut self, unique_key: &str) -> Result<()> {
        self.deleted.push(unique_key.to_string());
        Ok(())
    }
}

struct Product {
    id: u64,
    name: String,
    published: bool,
}

impl Indexable for Product {
    fn model_name(&self) -> &str {
        "Product"
    }

    fn primary_key(&self) -> String {
        self.id.to_string()
    }

    fn index_fields(&self) -> Document {
        Document::builder().add_text("name", self.name.as_str()).build()
    }

    fn is_indexable(&self) -> bool {
        self.published
    }
}

fn product(id: u64, published: bool) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        published,
    }
}

fn saved_keys(indexer: &RecordingIndexer) -> Vec<&str> {
    indexer
        .saved
        .iter()
        .filter_map(|doc| doc.get_field(UNIQUE_KEY_FIELD).and_then(|v| v.as_text()))
        .collect()
}

#[test]
fn test_insert_update_delete() -> Result<()> {
    let mut listener = IndexListener::new(RecordingIndexer::default());

    listener.on_entity_changed(&product(1, true), ChangeKind::Insert)?;
    listener.on_entity_changed(&product(1, true), ChangeKind::Update)?;
    listener.on_entity_changed(&product(1, true), ChangeKind::Delete)?;

    let indexer = listener.into_indexer();
    assert_eq!(saved_keys(&indexer), vec!["Product_1", "Product_1"]);
    assert_eq!(indexer.deleted, vec!["Product_1"]);

    Ok(())
}

#[test]
fn test_non_indexable_entities() -> Result<()> {
    let mut listener = IndexListener::new(RecordingIndexer::default());

    listener.on_entity_changed(&product(2, false), ChangeKind::Insert)?;
    assert!(listener.indexer().saved.is_empty());
    assert!(listener.indexer().deleted.is_empty());

    listener.on_entity_changed(&product(2, false), ChangeKind::Update)?;
    assert_eq!(listener.indexer().deleted, vec!["Product_2"]);

    Ok(())
}

#[test]
fn test_save_index_deletes_then_inserts() -> Result<()> {
    let mut listener = IndexListener::new(RecordingIndexer::default());

    listener.save_index(&product(3, true))?;
    listener.save_index(&product(4, false))?;

    let indexer = listener.into_indexer();
    assert_eq!(indexer.deleted, vec!["Product_3", "Product_4"]);
    assert_eq!(saved_keys(&indexer), vec!["Product_3"]);

    Ok(())
}

#[test]
fn test_indexer_errors_propagate() {
    let mut listener = IndexListener::new(RecordingIndexer {
        fail_saves: true,
        ..RecordingIndexer::default()
    });

    let err = listener
        .on_entity_changed(&product(5, true), ChangeKind::Insert)
        .unwrap_err();
    assert!(matches!(err, SolrineError::Anyhow(_)));
}

#[test]
fn test_unsaved_entity_is_rejected() {
    struct Draft;

    impl Indexable for Draft {
        fn model_name(&self) -> &str {
            "Product"
        }

        fn primary_key(&self) -> String {
            String::new()
        }

        fn index_fields(&self) -> Document {
            Document::new()
        }
    }

    let mut listener = IndexListener::new(RecordingIndexer::default());

    let err = listener.on_entity_changed(&Draft, ChangeKind::Insert).unwrap_err();
    assert!(matches!(err, SolrineError::Index(_)));
    assert!(matches!(listener.save_index(&Draft), Err(SolrineError::Index(_))));

    let indexer = listener.into_indexer();
    assert!(indexer.saved.is_empty());
    assert!(indexer.deleted.is_empty());
}

//! Persistence hook: keeps the index in sync with entity changes.
//!
//! The host persistence layer calls [`IndexListener::on_entity_changed`]
//! after each committed insert, update or delete. The listener builds the
//! entity's document with [`document_from`] and hands it to an
//! [`Indexer`], which owns the transport to the search server.

pub mod listener;

pub use listener::{
    ChangeKind, IndexListener, Indexable, Indexer, MODEL_FIELD, UNIQUE_KEY_FIELD, document_from,
    unique_key,
};

//! Document module.
//!
//! Documents are the records a search returns: open collections of
//! field-value pairs decoded from the server's JSON.

#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;

// Re-export commonly used types
pub use document::{Document, DocumentBuilder};
pub use field_value::FieldValue;

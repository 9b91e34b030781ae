//! # Solrine
//!
//! Navigable result sets over Solr JSON responses.
//!
//! ## Features
//!
//! - Decode-once response handling with single-value list collapsing
//! - Array-like, countable result sets with on-demand hit materialization
//! - Lazily decoded facet counts
//! - Field and query result grouping, with local-parameter alias names
//! - Extension methods registered on the search session
//! - Persistence hook contract for keeping the index in sync
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use solrine::config::SearchConfig;
//! use solrine::search::SearchSession;
//!
//! let session = Rc::new(SearchSession::new(SearchConfig::default()).unwrap());
//! let results = session
//!     .results(r#"{"response": {"numFound": 12, "docs": [{"guid": "a", "tags": ["rust"]}]}}"#)
//!     .unwrap();
//!
//! assert_eq!(results.count(), 12);
//! for hit in &results {
//!     assert_eq!(hit.id(), Some("a"));
//!     assert_eq!(hit.get("tags").and_then(|v| v.as_text()), Some("rust"));
//! }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod indexing;
pub mod response;
pub mod results;
pub mod search;

pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::document::{Document, FieldValue};
    pub use crate::error::{Result, SolrineError};
    pub use crate::response::{DocumentOptions, SolrResponse};
    pub use crate::results::{GroupResult, ResultSet, ResultSetOptions, SearchHit};
    pub use crate::search::SearchSession;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Decoded form of a Solr JSON response.
//!
//! These types are produced by [`ResponseNormalizer`](super::ResponseNormalizer)
//! and read by [`ResultSet`](crate::results::ResultSet). They model the
//! sections the result layer navigates (`responseHeader`, `response`,
//! `grouped`); every other top-level section is kept verbatim in
//! [`ParsedData::other`].

use serde_json::{Map, Value};

use crate::document::{Document, FieldValue};

/// One document of a doc list.
///
/// Depending on [`DocumentOptions::create_documents`](super::DocumentOptions)
/// the normalizer either builds a typed [`Document`] or keeps the JSON
/// object.
#[derive(Debug, Clone, PartialEq)]
pub enum Doc {
    /// Typed document.
    Document(Document),
    /// JSON object as returned by the server (possibly collapsed).
    Raw(Map<String, Value>),
}

impl Doc {
    /// Materialize a typed document, converting a raw object on demand.
    pub fn to_document(&self) -> Document {
        match self {
            Doc::Document(doc) => doc.clone(),
            Doc::Raw(map) => Document::from(map.clone()),
        }
    }

    /// Read one field.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            Doc::Document(doc) => doc.get_field(name).cloned(),
            Doc::Raw(map) => map.get(name).cloned().map(FieldValue::from),
        }
    }

    /// Overwrite one field.
    pub fn set_field<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        match self {
            Doc::Document(doc) => doc.add_field(name, value),
            Doc::Raw(map) => {
                map.insert(name.into(), value.to_json());
            }
        }
    }

    /// JSON form of this document.
    pub fn to_json(&self) -> Value {
        match self {
            Doc::Document(doc) => doc.to_json(),
            Doc::Raw(map) => Value::Object(map.clone()),
        }
    }
}

impl From<Document> for Doc {
    fn from(doc: Document) -> Self {
        Doc::Document(doc)
    }
}

impl From<Map<String, Value>> for Doc {
    fn from(map: Map<String, Value>) -> Self {
        Doc::Raw(map)
    }
}

/// A page of matching documents (`response` or a group's `doclist`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocList {
    /// Total number of matches reported by the server.
    pub num_found: u64,
    /// Offset of the first document of this page.
    pub start: u64,
    /// Highest score, when scores were requested.
    pub max_score: Option<f64>,
    /// The documents of this page, in server order.
    pub docs: Vec<Doc>,
}

/// One bucket of a field-type group.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// The grouped field value this bucket stands for.
    pub group_value: Value,
    /// The bucket's hits.
    pub doclist: DocList,
}

impl Group {
    /// Key under which the bucket is exposed.
    ///
    /// Strings are used verbatim; a null group value (documents without
    /// the field) maps to the empty string.
    pub fn key(&self) -> String {
        match &self.group_value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// One entry of the `grouped` section.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupBlock {
    /// `group.field`: one bucket per distinct field value.
    Field {
        /// Number of documents matching the query, when the server sent it.
        matches: Option<u64>,
        /// Number of groups, when `group.ngroups` was requested.
        ngroups: Option<u64>,
        /// The buckets, in server order.
        groups: Vec<Group>,
    },
    /// `group.query`: a single doc list.
    Query {
        /// Number of documents matching the main query, when the server
        /// sent it.
        matches: Option<u64>,
        /// The hits matching the group query.
        doclist: DocList,
    },
}

impl GroupBlock {
    /// Number of documents matching the main query, as sent by the server.
    pub fn matches(&self) -> Option<u64> {
        match self {
            GroupBlock::Field { matches, .. } | GroupBlock::Query { matches, .. } => *matches,
        }
    }

    /// Whether this block holds several buckets.
    pub fn is_field_group(&self) -> bool {
        matches!(self, GroupBlock::Field { .. })
    }
}

/// `responseHeader` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseHeader {
    /// Solr status code, 0 on success.
    pub status: i64,
    /// Query time in milliseconds.
    pub qtime: u64,
    /// Echoed request parameters.
    pub params: Map<String, Value>,
}

/// Normalized response tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedData {
    /// `responseHeader`, when present.
    pub response_header: Option<ResponseHeader>,
    /// `response`, when present.
    pub response: Option<DocList>,
    /// `grouped`, in server order, keyed by the raw group key.
    pub grouped: Option<Vec<(String, GroupBlock)>>,
    /// Every other top-level section (`facet_counts`, `highlighting`, ...).
    pub other: Map<String, Value>,
}

impl ParsedData {
    /// Look up a group block by its raw key.
    pub fn group(&self, raw_name: &str) -> Option<&GroupBlock> {
        self.grouped
            .as_ref()?
            .iter()
            .find(|(name, _)| name == raw_name)
            .map(|(_, block)| block)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_raw_doc_field_access() {
        let mut doc = Doc::Raw(match json!({"id": "1", "tags": ["a"]}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        });

        assert_eq!(doc.field("id"), Some(FieldValue::Text("1".into())));
        assert!(doc.field("missing").is_none());

        doc.set_field("geo_distance", FieldValue::Float(2.0));
        assert_eq!(doc.to_json()["geo_distance"], json!(2.0));
    }

    #[test]
    fn test_group_key() {
        let group = |value: Value| Group {
            group_value: value,
            doclist: DocList::default(),
        };

        assert_eq!(group(json!("x")).key(), "x");
        assert_eq!(group(json!(42)).key(), "42");
        assert_eq!(group(Value::Null).key(), "");
    }
}

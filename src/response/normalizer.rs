//! Turns decoded Solr JSON into a [`ParsedData`] tree.
//!
//! Every document, at every nesting level (`response.docs`, query-group
//! `doclist.docs`, field-group `groups[].doclist.docs`), goes through the
//! same document normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::{Result, SolrineError};
use crate::response::parsed::{Doc, DocList, Group, GroupBlock, ParsedData, ResponseHeader};

/// How matched documents are reshaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Build typed [`Document`] values instead of keeping JSON objects.
    pub create_documents: bool,

    /// Replace list fields holding at most one element by that element.
    /// An empty list becomes null.
    pub collapse_single_value_arrays: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            create_documents: true,
            collapse_single_value_arrays: true,
        }
    }
}

impl DocumentOptions {
    /// Options that keep documents exactly as the server sent them.
    pub fn verbatim() -> Self {
        Self {
            create_documents: false,
            collapse_single_value_arrays: false,
        }
    }

    /// Set whether typed documents are created.
    pub fn with_create_documents(mut self, create_documents: bool) -> Self {
        self.create_documents = create_documents;
        self
    }

    /// Set whether single-value lists are collapsed.
    pub fn with_collapse_single_value_arrays(mut self, collapse: bool) -> Self {
        self.collapse_single_value_arrays = collapse;
        self
    }

    fn reshapes(&self) -> bool {
        self.create_documents || self.collapse_single_value_arrays
    }
}

/// Decodes and normalizes raw search responses.
#[derive(Debug, Clone, Default)]
pub struct ResponseNormalizer {
    options: DocumentOptions,
}

impl ResponseNormalizer {
    /// Create a normalizer with the given document options.
    pub fn new(options: DocumentOptions) -> Self {
        ResponseNormalizer { options }
    }

    /// Get the document options.
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Decode a raw payload.
    ///
    /// Fails with [`SolrineError::Decode`] when the payload is not a JSON
    /// object; no partial structure is ever returned.
    pub fn decode(&self, raw: &str) -> Result<ParsedData> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            log::warn!("Solr response is not valid JSON: {e}");
            SolrineError::decode(e.to_string(), raw)
        })?;

        match value {
            Value::Object(map) => Ok(self.normalize(map)),
            other => {
                log::warn!("Solr response is not a JSON object");
                Err(SolrineError::decode(
                    format!("expected a JSON object, found {}", json_type(&other)),
                    raw,
                ))
            }
        }
    }

    /// Normalize an already decoded response object.
    ///
    /// This is a pure transform: the input is consumed and a new tree is
    /// returned.
    pub fn normalize(&self, mut map: Map<String, Value>) -> ParsedData {
        let response_header = match map.remove("responseHeader") {
            Some(Value::Object(header)) => Some(parse_header(header)),
            Some(other) => {
                map.insert("responseHeader".to_string(), other);
                None
            }
            None => None,
        };

        let response = match map.remove("response") {
            Some(Value::Object(response)) => Some(self.normalize_doclist(response)),
            Some(other) => {
                map.insert("response".to_string(), other);
                None
            }
            None => None,
        };

        let grouped = match map.remove("grouped") {
            Some(Value::Object(grouped)) => Some(self.normalize_grouped(grouped)),
            Some(other) => {
                map.insert("grouped".to_string(), other);
                None
            }
            None => None,
        };

        ParsedData {
            response_header,
            response,
            grouped,
            other: map,
        }
    }

    /// Normalize a `{numFound, start, maxScore, docs}` object.
    pub fn normalize_doclist(&self, mut map: Map<String, Value>) -> DocList {
        let docs = match map.remove("docs") {
            Some(Value::Array(docs)) => docs
                .into_iter()
                .filter_map(|doc| match doc {
                    Value::Object(doc) => Some(self.normalize_document(doc)),
                    other => {
                        log::warn!("Skipping non-object document of type {}", json_type(&other));
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        DocList {
            num_found: map.get("numFound").and_then(Value::as_u64).unwrap_or(0),
            start: map.get("start").and_then(Value::as_u64).unwrap_or(0),
            max_score: map.get("maxScore").and_then(Value::as_f64),
            docs,
        }
    }

    /// Apply the document options to one document.
    pub fn normalize_document(&self, map: Map<String, Value>) -> Doc {
        if !self.options.reshapes() {
            return Doc::Raw(map);
        }

        let map: Map<String, Value> = if self.options.collapse_single_value_arrays {
            map.into_iter()
                .map(|(name, value)| (name, collapse_single_value(value)))
                .collect()
        } else {
            map
        };

        if self.options.create_documents {
            Doc::Document(Document::from(map))
        } else {
            Doc::Raw(map)
        }
    }

    fn normalize_grouped(&self, grouped: Map<String, Value>) -> Vec<(String, GroupBlock)> {
        let mut blocks = Vec::with_capacity(grouped.len());

        for (name, group) in grouped {
            let Value::Object(mut group) = group else {
                log::warn!("Skipping group {name}: not a JSON object");
                continue;
            };

            let matches = group.get("matches").and_then(Value::as_u64);

            let block = if let Some(Value::Array(groups)) = group.remove("groups") {
                GroupBlock::Field {
                    matches,
                    ngroups: group.get("ngroups").and_then(Value::as_u64),
                    groups: groups
                        .into_iter()
                        .filter_map(|sub_group| self.normalize_sub_group(sub_group))
                        .collect(),
                }
            } else if let Some(Value::Object(doclist)) = group.remove("doclist") {
                GroupBlock::Query {
                    matches,
                    doclist: self.normalize_doclist(doclist),
                }
            } else {
                log::warn!("Skipping group {name}: neither groups nor doclist present");
                continue;
            };

            blocks.push((name, block));
        }

        blocks
    }

    fn normalize_sub_group(&self, sub_group: Value) -> Option<Group> {
        let Value::Object(mut sub_group) = sub_group else {
            return None;
        };

        let doclist = match sub_group.remove("doclist") {
            Some(Value::Object(doclist)) => self.normalize_doclist(doclist),
            _ => DocList::default(),
        };

        Some(Group {
            group_value: sub_group.remove("groupValue").unwrap_or(Value::Null),
            doclist,
        })
    }
}

/// Collapse a list of at most one element to that element (null if empty).
pub fn collapse_single_value(value: Value) -> Value {
    match value {
        Value::Array(mut items) if items.len() <= 1 => items.pop().unwrap_or(Value::Null),
        other => other,
    }
}

fn parse_header(header: Map<String, Value>) -> ResponseHeader {
    ResponseHeader {
        status: header.get("status").and_then(Value::as_i64).unwrap_or(0),
        qtime: header.get("QTime").and_then(Value::as_u64).unwrap_or(0),
        params: match header.get("params") {
            Some(Value::Object(params)) => params.clone(),
            _ => Map::new(),
        },
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

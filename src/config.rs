//! Configuration for a search session.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolrineError};
use crate::indexing::UNIQUE_KEY_FIELD;
use crate::response::DocumentOptions;
use crate::results::GeoUnit;

/// Configuration for a [`SearchSession`](crate::search::SearchSession).
///
/// ```
/// use solrine::config::SearchConfig;
///
/// let config = SearchConfig::from_json_str(r#"{"name": "catalog", "geo_unit": "kilometers"}"#).unwrap();
/// assert_eq!(config.name, "catalog");
/// assert!(config.document.collapse_single_value_arrays);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Name of the index this session searches.
    pub name: String,

    /// How matched documents are reshaped.
    pub document: DocumentOptions,

    /// Field holding the unique key of each document.
    pub unique_key: String,

    /// Field holding the relevance score.
    pub score_field: String,

    /// Unit in which geo distances are exposed. Distances stay in miles
    /// when unset.
    pub geo_unit: Option<GeoUnit>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            name: "index".to_string(),
            document: DocumentOptions::default(),
            unique_key: UNIQUE_KEY_FIELD.to_string(),
            score_field: "score".to_string(),
            geo_unit: None,
        }
    }
}

impl SearchConfig {
    /// Parse a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: SearchConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<()> {
        if self.unique_key.trim().is_empty() {
            return Err(SolrineError::invalid_config("unique_key must not be empty"));
        }
        if self.score_field.trim().is_empty() {
            return Err(SolrineError::invalid_config("score_field must not be empty"));
        }
        Ok(())
    }

    /// Set the index name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set the document options.
    pub fn with_document_options(mut self, document: DocumentOptions) -> Self {
        self.document = document;
        self
    }

    /// Set the unique key field.
    pub fn with_unique_key<S: Into<String>>(mut self, unique_key: S) -> Self {
        self.unique_key = unique_key.into();
        self
    }

    /// Set the score field.
    pub fn with_score_field<S: Into<String>>(mut self, score_field: S) -> Self {
        self.score_field = score_field.into();
        self
    }

    /// Set the geo unit.
    pub fn with_geo_unit(mut self, unit: GeoUnit) -> Self {
        self.geo_unit = Some(unit);
        self
    }
}

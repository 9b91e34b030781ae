//! Facet counts returned alongside search hits.

use serde_json::{Map, Value};

/// The `facet_counts` sub-sections the result set knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    /// `facet.query` counts: name to count.
    Queries,
    /// `facet.field` counts: field to value/count pairs.
    Fields,
    /// `facet.date` counts: field to gap/count pairs plus range metadata.
    Dates,
    /// `facet.range` counts.
    Ranges,
}

impl FacetKind {
    /// Key of the section inside `facet_counts`.
    pub fn key(&self) -> &'static str {
        match self {
            FacetKind::Queries => "facet_queries",
            FacetKind::Fields => "facet_fields",
            FacetKind::Dates => "facet_dates",
            FacetKind::Ranges => "facet_ranges",
        }
    }
}

/// The decoded `facet_counts` block of a response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetBlock {
    sections: Map<String, Value>,
}

impl FacetBlock {
    /// Decode the block from a raw response body.
    ///
    /// Returns `None` when the body has no `facet_counts` object.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let mut value: Value = serde_json::from_str(raw).ok()?;
        match value.get_mut("facet_counts")?.take() {
            Value::Object(sections) => Some(FacetBlock { sections }),
            _ => None,
        }
    }

    /// Build the block from an already decoded `facet_counts` value.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|sections| FacetBlock {
            sections: sections.clone(),
        })
    }

    /// One section by its key (`facet_fields`, `facet_ranges`, ...).
    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.sections.get(name)?.as_object()
    }

    /// One of the known sections.
    pub fn kind(&self, kind: FacetKind) -> Option<&Map<String, Value>> {
        self.section(kind.key())
    }

    /// Keys of all sections present.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(|s| s.as_str()).collect()
    }
}

/// Read value/count pairs from a facet field entry.
///
/// Accepts the three shapes Solr produces depending on `json.nl`: a map
/// (`{"red": 5}`), a flat list (`["red", 5]`) and a list of pairs
/// (`[["red", 5]]`). Entries that are not value/count pairs are skipped.
pub fn facet_counts(value: &Value) -> Option<Vec<(String, u64)>> {
    match value {
        Value::Object(map) => Some(
            map.iter()
                .filter_map(|(name, count)| Some((name.clone(), count.as_u64()?)))
                .collect(),
        ),
        Value::Array(items) if items.iter().all(Value::is_array) => Some(
            items
                .iter()
                .filter_map(|pair| pair_entry(pair.as_array()?))
                .collect(),
        ),
        Value::Array(items) => Some(items.chunks(2).filter_map(pair_entry).collect()),
        _ => None,
    }
}

fn pair_entry(pair: &[Value]) -> Option<(String, u64)> {
    match pair {
        [name, count] => {
            let name = match name {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            Some((name, count.as_u64()?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_raw() {
        let block = FacetBlock::from_raw(
            r#"{"facet_counts": {"facet_queries": {"cheap": 3}, "facet_fields": {"color": {"red": 5}}}}"#,
        )
        .unwrap();

        assert_eq!(block.kind(FacetKind::Queries).unwrap()["cheap"], json!(3));
        assert!(block.kind(FacetKind::Dates).is_none());
        assert_eq!(block.section_names(), vec!["facet_queries", "facet_fields"]);
    }

    #[test]
    fn test_from_raw_without_facets() {
        assert!(FacetBlock::from_raw(r#"{"response": {}}"#).is_none());
        assert!(FacetBlock::from_raw("{not json").is_none());
    }

    #[test]
    fn test_facet_counts_shapes() {
        let expected = vec![("red".to_string(), 5), ("blue".to_string(), 2)];

        assert_eq!(facet_counts(&json!({"red": 5, "blue": 2})), Some(expected.clone()));
        assert_eq!(facet_counts(&json!(["red", 5, "blue", 2])), Some(expected.clone()));
        assert_eq!(facet_counts(&json!([["red", 5], ["blue", 2]])), Some(expected));
        assert_eq!(facet_counts(&json!(7)), None);
    }

    #[test]
    fn test_facet_counts_missing_value_bucket() {
        assert_eq!(
            facet_counts(&json!(["red", 5, null, 1])),
            Some(vec![("red".to_string(), 5), (String::new(), 1)])
        );
    }
}

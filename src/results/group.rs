//! Result grouping support.
//!
//! Solr keys each `grouped` entry by the grouping expression, which may use
//! local-parameter syntax to assign an alias: `{!ex=dt key=by_color}color`.
//! Groups are exposed under that alias when one is given.

use std::sync::LazyLock;

use regex::Regex;

use crate::results::result_set::ResultSet;

static LOCAL_PARAM_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{![^}]*?\bkey=([A-Za-z0-9_]+)[^}]*\}").expect("local param pattern is valid")
});

/// Extract the `key=` alias of a local-parameter group key.
///
/// Keys without an alias are returned unchanged.
///
/// ```
/// use solrine::results::group::fix_group_name;
///
/// assert_eq!(fix_group_name("{!ex=a key=mykey}some:query"), "mykey");
/// assert_eq!(fix_group_name("some:query"), "some:query");
/// ```
pub fn fix_group_name(raw: &str) -> String {
    LOCAL_PARAM_KEY
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map_or_else(|| raw.to_string(), |alias| alias.as_str().to_string())
}

/// A group key in both its fixed and raw form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupName {
    /// Name exposed to callers.
    pub name: String,
    /// Key as it appears in the response.
    pub raw: String,
}

impl GroupName {
    /// Fix a raw group key.
    pub fn from_raw<S: Into<String>>(raw: S) -> Self {
        let raw = raw.into();
        GroupName {
            name: fix_group_name(&raw),
            raw,
        }
    }
}

/// Navigable results of one group.
#[derive(Debug)]
pub enum GroupResult {
    /// Query-type group: a single list of hits.
    Single(ResultSet),
    /// Field-type group: one result set per group value, in server order.
    Multiple(Vec<(String, ResultSet)>),
}

impl GroupResult {
    /// Whether this is a field-type group.
    pub fn is_multiple(&self) -> bool {
        matches!(self, GroupResult::Multiple(_))
    }

    /// The result set of a query-type group.
    pub fn as_single(&self) -> Option<&ResultSet> {
        match self {
            GroupResult::Single(results) => Some(results),
            GroupResult::Multiple(_) => None,
        }
    }

    /// Look up the bucket for one group value.
    pub fn get(&self, group_value: &str) -> Option<&ResultSet> {
        match self {
            GroupResult::Multiple(groups) => groups
                .iter()
                .find(|(key, _)| key == group_value)
                .map(|(_, results)| results),
            GroupResult::Single(_) => None,
        }
    }

    /// Group values of a field-type group.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            GroupResult::Multiple(groups) => groups.iter().map(|(key, _)| key.as_str()).collect(),
            GroupResult::Single(_) => Vec::new(),
        }
    }

    /// Number of buckets (1 for a query-type group).
    pub fn len(&self) -> usize {
        match self {
            GroupResult::Multiple(groups) => groups.len(),
            GroupResult::Single(_) => 1,
        }
    }

    /// Whether a field-type group has no buckets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_group_name_with_alias() {
        assert_eq!(fix_group_name("{!ex=a key=mykey}some:query"), "mykey");
        assert_eq!(fix_group_name("{!key=by_color}color"), "by_color");
        assert_eq!(fix_group_name("{!key=a1 ex=dt}price:[* TO 10]"), "a1");
    }

    #[test]
    fn test_fix_group_name_without_alias() {
        assert_eq!(fix_group_name("some:query"), "some:query");
        assert_eq!(fix_group_name("{!ex=dt}color"), "{!ex=dt}color");
        assert_eq!(fix_group_name("monkey=1"), "monkey=1");
    }

    #[test]
    fn test_alias_must_be_word_characters() {
        assert_eq!(fix_group_name("{!key=}color"), "{!key=}color");
        assert_eq!(fix_group_name("{!key=a-b}color"), "a");
    }

    #[test]
    fn test_group_name_from_raw() {
        let name = GroupName::from_raw("{!key=brand}brand_s");
        assert_eq!(name.name, "brand");
        assert_eq!(name.raw, "{!key=brand}brand_s");
    }
}

//! Navigable view over one search response.
//!
//! A [`ResultSet`] behaves like an indexable, countable list of hits:
//!
//! - positional access with [`get`](ResultSet::get), [`has`](ResultSet::has),
//!   [`set`](ResultSet::set) and [`delete`](ResultSet::delete),
//! - a restartable cursor ([`current`](ResultSet::current),
//!   [`next_hit`](ResultSet::next_hit), [`rewind`](ResultSet::rewind)),
//! - facet and group navigation, decoded lazily and cached per instance.
//!
//! Hits are materialized through the session's
//! [`HitFactory`](crate::results::HitFactory) each time a position is read;
//! the page is never materialized as a whole.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use serde_json::{Map, Value};

use crate::error::{Result, SolrineError};
use crate::response::{
    Doc, DocList, GroupBlock, ParsedData, ResponseHeader, ResponseNormalizer, SolrResponse,
};
use crate::results::facet::{FacetBlock, FacetKind, facet_counts};
use crate::results::geo::{GeoUnit, convert_distances};
use crate::results::group::{GroupName, GroupResult, fix_group_name};
use crate::results::hit::SearchHit;
use crate::search::SearchSession;

static EMPTY_DATA: LazyLock<ParsedData> = LazyLock::new(ParsedData::default);

/// Options for building a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResultSetOptions {
    /// The supplied object is one group entry: its `doclist` is read as the
    /// `response`.
    pub is_group_result: bool,

    /// Convert `geo_distance` fields to this unit.
    pub geo_unit: Option<GeoUnit>,
}

impl ResultSetOptions {
    /// Options for a group entry.
    pub fn group_result() -> Self {
        ResultSetOptions {
            is_group_result: true,
            geo_unit: None,
        }
    }

    /// Set the geo unit.
    pub fn with_geo_unit(mut self, unit: GeoUnit) -> Self {
        self.geo_unit = Some(unit);
        self
    }
}

enum Source {
    /// A full server response; facets are decoded from its raw body.
    Response(SolrResponse),
    /// An already normalized tree (group entries, detached values).
    Detached(ParsedData),
}

/// Array-like, countable view over a search response.
pub struct ResultSet {
    source: Source,
    search: Rc<SearchSession>,
    pointer: usize,
    facets: OnceCell<Option<FacetBlock>>,
    group_names: OnceCell<Vec<GroupName>>,
}

impl ResultSet {
    /// Wrap a server response.
    ///
    /// The response is decoded here; a payload that is not valid JSON fails
    /// with [`SolrineError::Decode`].
    pub fn new(
        response: SolrResponse,
        search: Rc<SearchSession>,
        options: ResultSetOptions,
    ) -> Result<Self> {
        let source = if options.is_group_result {
            let value: Value = serde_json::from_str(response.raw_response()).map_err(|e| {
                SolrineError::decode(e.to_string(), response.raw_response())
            })?;
            let normalizer = ResponseNormalizer::new(*response.options());
            Source::Detached(group_entry_data(value, &normalizer)?)
        } else {
            response.parsed_data()?;
            Source::Response(response)
        };

        Self::from_source(source, search, options)
    }

    /// Wrap a decoded JSON value.
    ///
    /// With [`ResultSetOptions::is_group_result`] the value is one group
    /// entry (`{"groupValue": .., "doclist": {..}}` or `{"doclist": {..}}`);
    /// otherwise it is a complete response object.
    pub fn from_value(
        value: Value,
        search: Rc<SearchSession>,
        options: ResultSetOptions,
    ) -> Result<Self> {
        let data = if options.is_group_result {
            group_entry_data(value, search.normalizer())?
        } else {
            match value {
                Value::Object(map) => search.normalizer().normalize(map),
                _ => {
                    return Err(SolrineError::invalid_argument(
                        "a response must be a JSON object",
                    ));
                }
            }
        };

        Self::from_source(Source::Detached(data), search, options)
    }

    /// Result set over one group's doc list.
    pub(crate) fn group_result(doclist: DocList, search: Rc<SearchSession>) -> Self {
        ResultSet {
            source: Source::Detached(ParsedData {
                response: Some(doclist),
                ..ParsedData::default()
            }),
            search,
            pointer: 0,
            facets: OnceCell::new(),
            group_names: OnceCell::new(),
        }
    }

    fn from_source(
        source: Source,
        search: Rc<SearchSession>,
        options: ResultSetOptions,
    ) -> Result<Self> {
        let mut results = ResultSet {
            source,
            search,
            pointer: 0,
            facets: OnceCell::new(),
            group_names: OnceCell::new(),
        };

        if let Some(unit) = options.geo_unit {
            if let Some(response) = results.data_mut()?.response.as_mut() {
                convert_distances(&mut response.docs, unit);
            }
        }

        Ok(results)
    }

    fn data(&self) -> &ParsedData {
        match &self.source {
            Source::Response(response) => response.parsed_data().unwrap_or(&*EMPTY_DATA),
            Source::Detached(data) => data,
        }
    }

    fn data_mut(&mut self) -> Result<&mut ParsedData> {
        match &mut self.source {
            Source::Response(response) => response.parsed_data_mut(),
            Source::Detached(data) => Ok(data),
        }
    }

    fn doc_at(&self, index: usize) -> Option<&Doc> {
        self.docs().get(index)
    }

    /// The session this result set came from.
    pub fn search(&self) -> &Rc<SearchSession> {
        &self.search
    }

    /// The server response, unless this is a detached or group result set.
    pub fn raw_result(&self) -> Option<&SolrResponse> {
        match &self.source {
            Source::Response(response) => Some(response),
            Source::Detached(_) => None,
        }
    }

    /// The normalized response tree.
    pub fn parsed_data(&self) -> &ParsedData {
        self.data()
    }

    /// The `responseHeader` section.
    pub fn response_header(&self) -> Option<&ResponseHeader> {
        self.data().response_header.as_ref()
    }

    /// The normalized documents of this page.
    pub fn docs(&self) -> &[Doc] {
        self.data()
            .response
            .as_ref()
            .map(|response| response.docs.as_slice())
            .unwrap_or_default()
    }

    /// JSON form of the documents of this page.
    pub fn to_vec(&self) -> Vec<Value> {
        self.docs().iter().map(Doc::to_json).collect()
    }

    /// Number of documents in this page.
    pub fn page_len(&self) -> usize {
        self.docs().len()
    }

    /// Number of matches.
    ///
    /// Without grouping this is the server's `numFound`, regardless of the
    /// page size. With grouping it is the `matches` of the first group:
    /// groups of one request are assumed to cover the same matches. When the
    /// server omits `matches`, the first group's
    /// [`count_group_matches`](ResultSet::count_group_matches) is used.
    pub fn count(&self) -> u64 {
        let data = self.data();
        match &data.grouped {
            Some(grouped) => match grouped.first() {
                Some((_, block)) => match block.matches() {
                    Some(matches) => matches,
                    None => self
                        .fixed_group_names()
                        .first()
                        .map_or(0, |group| self.count_group_matches(&group.name)),
                },
                None => 0,
            },
            None => data.response.as_ref().map_or(0, |response| response.num_found),
        }
    }

    /*
     * Positional access
     */

    /// The hit at `index`.
    pub fn get(&self, index: usize) -> Option<SearchHit> {
        self.doc_at(index).map(|doc| self.search.instantiate(doc))
    }

    /// Whether a document exists at `index`.
    pub fn has(&self, index: usize) -> bool {
        self.doc_at(index).is_some()
    }

    /// Replace the document at `index`, or append when `index` is the
    /// page length.
    pub fn set<D: Into<Doc>>(&mut self, index: usize, doc: D) -> Result<()> {
        let docs = &mut self
            .data_mut()?
            .response
            .get_or_insert_with(DocList::default)
            .docs;

        if index < docs.len() {
            docs[index] = doc.into();
        } else if index == docs.len() {
            docs.push(doc.into());
        } else {
            return Err(SolrineError::invalid_argument(format!(
                "position {index} is past the end of a page of {} documents",
                docs.len()
            )));
        }
        Ok(())
    }

    /// Remove the document at `index`; later positions shift down.
    pub fn delete(&mut self, index: usize) -> Option<Doc> {
        let docs = &mut self.data_mut().ok()?.response.as_mut()?.docs;
        (index < docs.len()).then(|| docs.remove(index))
    }

    /*
     * Cursor
     */

    /// The hit under the cursor.
    pub fn current(&self) -> Option<SearchHit> {
        self.get(self.pointer)
    }

    /// Cursor position.
    pub fn key(&self) -> usize {
        self.pointer
    }

    /// Move the cursor forward.
    pub fn advance(&mut self) {
        self.pointer += 1;
    }

    /// Move the cursor back to the first position.
    pub fn rewind(&mut self) {
        self.pointer = 0;
    }

    /// Whether the cursor points at a document.
    pub fn valid(&self) -> bool {
        self.has(self.pointer)
    }

    /// The hit under the cursor, moving the cursor past it.
    pub fn next_hit(&mut self) -> Option<SearchHit> {
        let hit = self.current()?;
        self.advance();
        Some(hit)
    }

    /// Iterate from the cursor position, moving the cursor along.
    pub fn cursor(&mut self) -> Cursor<'_> {
        Cursor { results: self }
    }

    /// Iterate over the hits without touching the cursor.
    pub fn iter(&self) -> Hits<'_> {
        Hits {
            results: self,
            position: 0,
        }
    }

    /*
     * Facets
     */

    fn facet_block(&self) -> Option<&FacetBlock> {
        self.facets
            .get_or_init(|| match &self.source {
                Source::Response(response) => FacetBlock::from_raw(response.raw_response()),
                Source::Detached(data) => data
                    .other
                    .get("facet_counts")
                    .and_then(FacetBlock::from_value),
            })
            .as_ref()
    }

    /// Any `facet_counts` section by key.
    pub fn facets_section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.facet_block()?.section(name)
    }

    fn facet(&self, kind: FacetKind, name: &str) -> Option<&Value> {
        self.facet_block()?
            .kind(kind)?
            .get(name)
            .filter(|value| !value.is_null())
    }

    /// `facet_queries` section.
    pub fn facet_queries(&self) -> Option<&Map<String, Value>> {
        self.facets_section(FacetKind::Queries.key())
    }

    /// `facet_fields` section.
    pub fn facet_fields(&self) -> Option<&Map<String, Value>> {
        self.facets_section(FacetKind::Fields.key())
    }

    /// `facet_dates` section.
    pub fn facet_dates(&self) -> Option<&Map<String, Value>> {
        self.facets_section(FacetKind::Dates.key())
    }

    /// `facet_ranges` section.
    pub fn facet_ranges(&self) -> Option<&Map<String, Value>> {
        self.facets_section(FacetKind::Ranges.key())
    }

    /// Count of one facet query.
    pub fn facet_query(&self, name: &str) -> Option<&Value> {
        self.facet(FacetKind::Queries, name)
    }

    /// Counts of one facet field.
    pub fn facet_field(&self, name: &str) -> Option<&Value> {
        self.facet(FacetKind::Fields, name)
    }

    /// Counts of one date facet.
    pub fn facet_date(&self, name: &str) -> Option<&Value> {
        self.facet(FacetKind::Dates, name)
    }

    /// Whether a facet query is present.
    pub fn has_facet_query(&self, name: &str) -> bool {
        self.facet_query(name).is_some()
    }

    /// Whether a facet field is present.
    pub fn has_facet_field(&self, name: &str) -> bool {
        self.facet_field(name).is_some()
    }

    /// Whether a date facet is present.
    pub fn has_facet_date(&self, name: &str) -> bool {
        self.facet_date(name).is_some()
    }

    /// Count of one facet query as a number.
    pub fn facet_query_count(&self, name: &str) -> Option<u64> {
        self.facet_query(name)?.as_u64()
    }

    /// Value/count pairs of one facet field, in server order.
    pub fn facet_field_counts(&self, name: &str) -> Option<Vec<(String, u64)>> {
        facet_counts(self.facet_field(name)?)
    }

    /*
     * Groups
     */

    /// Whether the response carries a `grouped` section.
    pub fn is_grouped(&self) -> bool {
        self.data().grouped.is_some()
    }

    /// Fix a local-parameter group key (see
    /// [`fix_group_name`](crate::results::group::fix_group_name)).
    pub fn fix_group_name(&self, raw: &str) -> String {
        fix_group_name(raw)
    }

    fn fixed_group_names(&self) -> &[GroupName] {
        self.group_names.get_or_init(|| {
            self.data()
                .grouped
                .as_ref()
                .map(|grouped| {
                    grouped
                        .iter()
                        .map(|(raw, _)| GroupName::from_raw(raw.as_str()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    fn group_block(&self, name: &str) -> Option<&GroupBlock> {
        let raw = &self
            .fixed_group_names()
            .iter()
            .find(|group| group.name == name)?
            .raw;
        self.data().group(raw)
    }

    /// Fixed names of all groups; empty without grouping.
    pub fn group_names(&self) -> Vec<&str> {
        self.fixed_group_names()
            .iter()
            .map(|group| group.name.as_str())
            .collect()
    }

    /// Whether a group exists under this fixed name.
    pub fn has_group(&self, name: &str) -> bool {
        self.group_block(name).is_some()
    }

    /// Navigable results of one group; `None` for an unknown name.
    pub fn group_results(&self, name: &str) -> Option<GroupResult> {
        let result = match self.group_block(name)? {
            GroupBlock::Field { groups, .. } => GroupResult::Multiple(
                groups
                    .iter()
                    .map(|group| {
                        (
                            group.key(),
                            ResultSet::group_result(group.doclist.clone(), self.search.clone()),
                        )
                    })
                    .collect(),
            ),
            GroupBlock::Query { doclist, .. } => {
                GroupResult::Single(ResultSet::group_result(doclist.clone(), self.search.clone()))
            }
        };
        Some(result)
    }

    /// Number of matches of a query-type group.
    ///
    /// Returns 0 for an unknown name and for field-type groups: there is no
    /// single count for several buckets.
    pub fn count_group_matches(&self, name: &str) -> u64 {
        match self.group_results(name) {
            Some(GroupResult::Single(results)) => results.count(),
            _ => 0,
        }
    }

    /*
     * Extension methods
     */

    /// Call a method registered on the session.
    ///
    /// Fails with [`SolrineError::UnknownOperation`] when no registered
    /// handler answers.
    pub fn call(&self, method: &str, arguments: &[Value]) -> Result<Value> {
        match self.search.methods().dispatch(self, method, arguments) {
            Some(value) => Ok(value),
            None => {
                log::debug!("No handler answered ResultSet::{method}");
                Err(SolrineError::unknown_operation(method, arguments))
            }
        }
    }
}

impl fmt::Debug for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSet")
            .field("count", &self.count())
            .field("page_len", &self.page_len())
            .field("grouped", &self.is_grouped())
            .field("pointer", &self.pointer)
            .finish()
    }
}

/// Iterator driving the cursor of a [`ResultSet`].
#[derive(Debug)]
pub struct Cursor<'a> {
    results: &'a mut ResultSet,
}

impl Iterator for Cursor<'_> {
    type Item = SearchHit;

    fn next(&mut self) -> Option<Self::Item> {
        self.results.next_hit()
    }
}

/// Cursor-free iterator over the hits of a [`ResultSet`].
#[derive(Debug)]
pub struct Hits<'a> {
    results: &'a ResultSet,
    position: usize,
}

impl Iterator for Hits<'_> {
    type Item = SearchHit;

    fn next(&mut self) -> Option<Self::Item> {
        let hit = self.results.get(self.position)?;
        self.position += 1;
        Some(hit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.results.page_len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = SearchHit;
    type IntoIter = Hits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn group_entry_data(value: Value, normalizer: &ResponseNormalizer) -> Result<ParsedData> {
    let Value::Object(mut entry) = value else {
        return Err(SolrineError::invalid_argument(
            "a group result must be a JSON object",
        ));
    };

    let response = match entry.remove("doclist") {
        Some(Value::Object(doclist)) => Some(normalizer.normalize_doclist(doclist)),
        _ => None,
    };

    Ok(ParsedData {
        response,
        other: entry,
        ..ParsedData::default()
    })
}

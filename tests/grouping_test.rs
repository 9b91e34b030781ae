//! Integration tests for grouped responses.

use std::rc::Rc;

use serde_json::json;
use solrine::config::SearchConfig;
use solrine::document::FieldValue;
use solrine::error::Result;
use solrine::response::{DocumentOptions, SolrResponse};
use solrine::results::{GroupResult, ResultSet, ResultSetOptions};
use solrine::search::SearchSession;

const GROUPED: &str = r#"{
    "responseHeader": {"status": 0, "QTime": 9},
    "grouped": {
        "{!ex=a key=mykey}color": {
            "matches": 12,
            "groups": [
                {"groupValue": "x", "doclist": {"numFound": 3, "start": 0, "docs": [
                    {"guid": "P_1", "sizes": ["M"]},
                    {"guid": "P_2", "sizes": ["S", "L"]}
                ]}},
                {"groupValue": "y", "doclist": {"numFound": 9, "start": 0, "docs": [
                    {"guid": "P_3"}
                ]}}
            ]
        },
        "price:[0 TO 10]": {
            "matches": 12,
            "doclist": {"numFound": 4, "start": 0, "docs": [{"guid": "P_9", "sizes": []}]}
        }
    }
}"#;

fn session() -> Rc<SearchSession> {
    Rc::new(SearchSession::new(SearchConfig::default()).unwrap())
}

fn grouped_results() -> ResultSet {
    session().results(GROUPED).unwrap()
}

#[test]
fn test_grouped_count_uses_first_group() {
    let results = grouped_results();

    assert!(results.is_grouped());
    assert_eq!(results.count(), 12);
    assert_eq!(results.page_len(), 0);
}

#[test]
fn test_grouped_count_without_matches() -> Result<()> {
    let results = session().results(
        r#"{"grouped": {"{!key=cheap}price:[0 TO 10]": {
            "doclist": {"numFound": 4, "docs": [{"guid": "a"}]}
        }}}"#,
    )?;

    assert_eq!(results.count_group_matches("cheap"), 4);
    assert_eq!(results.count(), 4);

    Ok(())
}

#[test]
fn test_grouped_count_without_matches_on_field_group() -> Result<()> {
    let results = session().results(
        r#"{"grouped": {"color": {"groups": [
            {"groupValue": "x", "doclist": {"numFound": 2, "docs": []}}
        ]}}}"#,
    )?;

    assert_eq!(results.count(), 0);

    Ok(())
}

#[test]
fn test_group_result_keeps_response_options() -> Result<()> {
    let raw = r#"{"groupValue": "x", "doclist": {"numFound": 1, "docs": [{"tags": ["x"]}]}}"#;

    let verbatim = ResultSet::new(
        SolrResponse::with_options(raw, DocumentOptions::verbatim()),
        session(),
        ResultSetOptions::group_result(),
    )?;
    assert_eq!(verbatim.count(), 1);
    assert_eq!(verbatim.to_vec()[0]["tags"], json!(["x"]));

    let collapsed = ResultSet::new(
        SolrResponse::new(raw),
        session(),
        ResultSetOptions::group_result(),
    )?;
    assert_eq!(collapsed.to_vec()[0]["tags"], json!("x"));

    Ok(())
}

#[test]
fn test_group_names_are_fixed() {
    let results = grouped_results();

    assert_eq!(results.group_names(), vec!["mykey", "price:[0 TO 10]"]);
    assert!(results.has_group("mykey"));
    assert!(!results.has_group("{!ex=a key=mykey}color"));
    assert_eq!(results.fix_group_name("{!ex=a key=mykey}some:query"), "mykey");
    assert_eq!(results.fix_group_name("some:query"), "some:query");
}

#[test]
fn test_field_group_results() -> Result<()> {
    let results = grouped_results();

    let group = results.group_results("mykey").unwrap();
    assert!(group.is_multiple());
    assert_eq!(group.keys(), vec!["x", "y"]);

    let x = group.get("x").unwrap();
    assert_eq!(x.count(), 3);
    assert_eq!(x.page_len(), 2);
    assert_eq!(x.get(0).unwrap().get("sizes"), Some(&FieldValue::Text("M".into())));
    assert_eq!(group.get("y").unwrap().count(), 9);
    assert!(group.get("z").is_none());

    Ok(())
}

#[test]
fn test_query_group_results() {
    let results = grouped_results();

    match results.group_results("price:[0 TO 10]") {
        Some(GroupResult::Single(doclist)) => {
            assert_eq!(doclist.count(), 4);
            let hit = doclist.get(0).unwrap();
            assert_eq!(hit.id(), Some("P_9"));
            assert_eq!(hit.get("sizes"), Some(&FieldValue::Null));
        }
        other => panic!("Expected a single group result, got {other:?}"),
    }
}

#[test]
fn test_unknown_group_is_soft() {
    let results = grouped_results();

    assert!(results.group_results("nope").is_none());
    assert_eq!(results.count_group_matches("nope"), 0);
}

#[test]
fn test_count_group_matches() {
    let results = grouped_results();

    assert_eq!(results.count_group_matches("price:[0 TO 10]"), 4);
    // several buckets have no single count
    assert_eq!(results.count_group_matches("mykey"), 0);
}

#[test]
fn test_ungrouped_response_has_no_groups() {
    let results = session()
        .results(r#"{"response": {"numFound": 1, "docs": [{"guid": "a"}]}}"#)
        .unwrap();

    assert!(!results.is_grouped());
    assert!(results.group_names().is_empty());
    assert!(results.group_results("anything").is_none());
}

#[test]
fn test_nested_result_sets_are_independent() {
    let results = grouped_results();
    let group = results.group_results("mykey").unwrap();

    let mut x = match group {
        GroupResult::Multiple(mut groups) => groups.remove(0).1,
        GroupResult::Single(_) => panic!("Expected a field group"),
    };
    assert!(x.delete(0).is_some());
    assert_eq!(x.page_len(), 1);

    let again = results.group_results("mykey").unwrap();
    assert_eq!(again.get("x").unwrap().page_len(), 2);
}

//! Lookup service tests against the in-memory mock
//!
//! These exercise the query contract the CLI relies on: pagination,
//! dependency key pass-through and error propagation.

use dtool_graph_core::DatasetRecord;
use dtool_graph_lookup::{LookupError, LookupService, MockLookupService, PageRequest, RecordedQuery};
use pretty_assertions::assert_eq;

const ROOT: &str = "a2218059-5bd0-4690-b090-062faf08e046";

fn chain(len: usize) -> Vec<DatasetRecord> {
    (0..len)
        .map(|i| {
            let uuid = format!("00000000-0000-0000-0000-{:012}", i);
            let record = DatasetRecord::new(uuid, format!("step-{}", i));
            if i + 1 < len {
                record.with_parents([format!("00000000-0000-0000-0000-{:012}", i + 1)])
            } else {
                record
            }
        })
        .collect()
}

fn names(records: &[DatasetRecord]) -> Vec<&str> {
    records.iter().map(DatasetRecord::display_name).collect()
}

#[tokio::test]
async fn first_page() {
    let service = MockLookupService::new();
    service.add_graph(ROOT, chain(25)).await;

    let page = service.graph(ROOT, None, PageRequest::new(1, 10)).await.unwrap();

    assert_eq!(page.records.len(), 10);
    assert_eq!(page.records[0].display_name(), "step-0");
    assert_eq!(page.pagination.total, Some(25));
    assert_eq!(page.pagination.total_pages, Some(3));
    assert_eq!(page.pagination.next_page, Some(2));
}

#[tokio::test]
async fn last_partial_page() {
    let service = MockLookupService::new();
    service.add_graph(ROOT, chain(25)).await;

    let page = service.graph(ROOT, None, PageRequest::new(3, 10)).await.unwrap();

    assert_eq!(names(&page.records), vec!["step-20", "step-21", "step-22", "step-23", "step-24"]);
    assert!(!page.pagination.has_more());
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let service = MockLookupService::new();
    service.add_graph(ROOT, chain(3)).await;

    let page = service.graph(ROOT, None, PageRequest::new(4, 10)).await.unwrap();
    assert!(page.records.is_empty());
}

#[tokio::test]
async fn dependency_keys_are_passed_through() {
    let service = MockLookupService::new();
    service.add_graph(ROOT, chain(1)).await;

    let keys = vec!["derived_from".to_string(), "readme.parent".to_string()];
    service
        .graph(ROOT, Some(&keys), PageRequest::default())
        .await
        .unwrap();
    service.graph(ROOT, None, PageRequest::new(2, 5)).await.unwrap();

    assert_eq!(
        service.queries().await,
        vec![
            RecordedQuery {
                uuid: ROOT.to_string(),
                dependency_keys: Some(keys.clone()),
                page: PageRequest::new(1, 10),
            },
            RecordedQuery {
                uuid: ROOT.to_string(),
                dependency_keys: None,
                page: PageRequest::new(2, 5),
            },
        ]
    );
}

#[tokio::test]
async fn unknown_uuid_is_not_found() {
    let service = MockLookupService::new();

    let err = service
        .graph(ROOT, None, PageRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err, LookupError::NotFound(ROOT.to_string()));
}

#[tokio::test]
async fn injected_error_is_returned() {
    let service = MockLookupService::new()
        .with_error(LookupError::Unauthorized("token expired".to_string()));
    service.add_graph(ROOT, chain(2)).await;

    let err = service
        .graph(ROOT, None, PageRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Authentication failed: token expired");
    assert_eq!(service.queries().await.len(), 1);
}

#[tokio::test]
async fn service_as_trait_object() {
    let service = MockLookupService::new();
    service.add_graph(ROOT, chain(2)).await;

    let boxed: Box<dyn LookupService> = Box::new(service);
    let page = boxed.graph(ROOT, None, PageRequest::default()).await.unwrap();

    assert_eq!(boxed.name(), "mock");
    assert_eq!(page.records.len(), 2);
}

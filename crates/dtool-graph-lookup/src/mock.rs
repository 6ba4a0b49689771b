//! Mock lookup service for testing
//!
//! Serves predefined dependency graphs from memory and paginates them the
//! way the server does. It can also be told to fail, and it remembers the
//! queries it received.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let service = MockLookupService::new();
//! service.add_graph(uuid, records).await;
//!
//! let page = service.graph(uuid, None, PageRequest::new(1, 10)).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use dtool_graph_core::DatasetRecord;
use tokio::sync::RwLock;

use crate::pagination::Pagination;
use crate::service::{GraphPage, LookupError, LookupService, PageRequest};

/// A query received by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub uuid: String,
    pub dependency_keys: Option<Vec<String>>,
    pub page: PageRequest,
}

/// In-memory lookup service
#[derive(Clone, Default)]
pub struct MockLookupService {
    /// Full (unpaginated) query results by root UUID
    graphs: Arc<RwLock<HashMap<String, Vec<DatasetRecord>>>>,

    /// Error returned for every query, if set
    error: Option<LookupError>,

    /// Queries received so far
    queries: Arc<RwLock<Vec<RecordedQuery>>>,
}

impl MockLookupService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every query with `error`
    pub fn with_error(mut self, error: LookupError) -> Self {
        self.error = Some(error);
        self
    }

    /// Register the full result for queries on `uuid`
    pub async fn add_graph(&self, uuid: impl Into<String>, records: Vec<DatasetRecord>) {
        self.graphs.write().await.insert(uuid.into(), records);
    }

    /// Queries received so far, oldest first
    pub async fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.read().await.clone()
    }
}

#[async_trait::async_trait]
impl LookupService for MockLookupService {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn graph(
        &self,
        uuid: &str,
        dependency_keys: Option<&[String]>,
        page: PageRequest,
    ) -> Result<GraphPage, LookupError> {
        self.queries.write().await.push(RecordedQuery {
            uuid: uuid.to_string(),
            dependency_keys: dependency_keys.map(<[String]>::to_vec),
            page,
        });

        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        let graphs = self.graphs.read().await;
        let all = graphs
            .get(uuid)
            .ok_or_else(|| LookupError::NotFound(uuid.to_string()))?;

        let page_size = page.page_size as usize;
        let start = (page.page.saturating_sub(1) as usize).saturating_mul(page_size);
        let records = all.iter().skip(start).take(page_size).cloned().collect();

        Ok(GraphPage {
            records,
            pagination: Pagination::for_page(
                all.len() as u64,
                u64::from(page.page),
                u64::from(page.page_size),
            ),
        })
    }
}

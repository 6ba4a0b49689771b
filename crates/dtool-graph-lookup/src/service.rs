//! Lookup service trait for fetching dependency graphs

use dtool_graph_core::DatasetRecord;

use crate::pagination::Pagination;

/// Which page of the result to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,

    /// Records per page
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

/// One page of a dependency graph query
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPage {
    /// Dataset records on this page
    pub records: Vec<DatasetRecord>,

    /// Pagination metadata reported by the server
    pub pagination: Pagination,
}

/// Errors that can occur when querying the lookup server
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Lookup server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LookupError {
    /// Map a non-success HTTP status to an error
    pub fn from_status(status: u16, uuid: &str, body: &str) -> Self {
        let body: String = body.chars().take(200).collect();

        match status {
            401 | 403 => Self::Unauthorized(body),
            404 => Self::NotFound(uuid.to_string()),
            _ => Self::Status { status, body },
        }
    }
}

/// Trait for services that can answer dependency graph queries
#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    /// Service name for log messages
    fn name(&self) -> &'static str;

    /// Fetch the datasets connected to `uuid` by derivation.
    ///
    /// `dependency_keys` restricts which record fields the server follows
    /// when collecting parents; `None` uses the server default
    /// (`derived_from`).
    async fn graph(
        &self,
        uuid: &str,
        dependency_keys: Option<&[String]>,
        page: PageRequest,
    ) -> Result<GraphPage, LookupError>;
}

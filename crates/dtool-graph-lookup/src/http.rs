//! HTTP client for the dtool lookup server
//!
//! Queries the dependency graph endpoint:
//! - `GET  {server}/graph/uuids/{uuid}?page=..&page_size=..` for the default
//!   dependency keys
//! - `POST {server}/graph/uuids/{uuid}?page=..&page_size=..` with body
//!   `{"dependency_keys": [...]}` to follow custom keys
//!
//! Pagination metadata comes back in the `X-Pagination` header.

use std::time::Duration;

use dtool_graph_core::{DatasetRecord, LookupConfig};
use reqwest::Client;
use serde::Serialize;

use crate::pagination::{Pagination, PAGINATION_HEADER};
use crate::service::{GraphPage, LookupError, LookupService, PageRequest};

#[derive(Serialize)]
struct DependencyKeysBody<'a> {
    dependency_keys: &'a [String],
}

/// Lookup server client
pub struct HttpLookupClient {
    http: Client,
    server_url: String,
    token: Option<String>,
}

impl HttpLookupClient {
    /// Create a client from resolved configuration
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let server_url = config
            .require_server_url()
            .map_err(|e| LookupError::Config(e.to_string()))?
            .to_string();

        if config.token.is_none() {
            tracing::warn!("No lookup server token configured, sending unauthenticated requests");
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            server_url,
            token: config.token.clone(),
        })
    }

    /// Endpoint URL for a dataset's dependency graph
    pub fn graph_url(&self, uuid: &str) -> String {
        format!("{}/graph/uuids/{}", self.server_url, uuid)
    }
}

#[async_trait::async_trait]
impl LookupService for HttpLookupClient {
    fn name(&self) -> &'static str {
        "dtool lookup server"
    }

    async fn graph(
        &self,
        uuid: &str,
        dependency_keys: Option<&[String]>,
        page: PageRequest,
    ) -> Result<GraphPage, LookupError> {
        let url = self.graph_url(uuid);
        tracing::debug!("Querying {} (keys: {:?}, {:?})", url, dependency_keys, page);

        let request = match dependency_keys {
            Some(keys) => self.http.post(&url).json(&DependencyKeysBody { dependency_keys: keys }),
            None => self.http.get(&url),
        };

        let mut request = request
            .query(&[("page", page.page), ("page_size", page.page_size)])
            .header("Accept", "application/json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LookupError::Network(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::from_status(status.as_u16(), uuid, &body));
        }

        let pagination = Pagination::from_header(
            response
                .headers()
                .get(PAGINATION_HEADER)
                .and_then(|value| value.to_str().ok()),
        );

        let records: Vec<DatasetRecord> = response
            .json()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        tracing::debug!("Received {} dataset records", records.len());

        Ok(GraphPage {
            records,
            pagination,
        })
    }
}

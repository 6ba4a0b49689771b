//! Lookup server access
//!
//! The lookup server answers "which datasets does this dataset derive from,
//! transitively?" with a paginated list of dataset records. This crate wraps
//! that query behind the [`LookupService`] trait.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dtool_graph_core::LookupConfig;
//! use dtool_graph_lookup::{HttpLookupClient, LookupService, PageRequest};
//!
//! let client = HttpLookupClient::new(&LookupConfig::load(None)?)?;
//! let page = client.graph(uuid, None, PageRequest::default()).await?;
//! println!("{} datasets, {}", page.records.len(), page.pagination);
//! ```

pub mod service;
pub mod pagination;
pub mod http;
pub mod mock;

pub use service::{LookupService, LookupError, PageRequest, GraphPage};
pub use pagination::{Pagination, PAGINATION_HEADER};
pub use http::HttpLookupClient;
pub use mock::{MockLookupService, RecordedQuery};

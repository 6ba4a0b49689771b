//! Pagination metadata from the `X-Pagination` response header

use std::fmt;

use serde::{Deserialize, Serialize};

/// Response header carrying pagination metadata as a JSON object
pub const PAGINATION_HEADER: &str = "X-Pagination";

/// Pagination metadata. Every field is optional; servers omit the ones
/// that don't apply (e.g. `next_page` on the last page).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_page: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u64>,
}

impl Pagination {
    /// Parse the header value. A missing or malformed header yields empty
    /// metadata; the records are still usable without it.
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            tracing::debug!("No {} header in response", PAGINATION_HEADER);
            return Self::default();
        };

        serde_json::from_str(value).unwrap_or_else(|e| {
            tracing::debug!("Ignoring malformed {} header {:?}: {}", PAGINATION_HEADER, value, e);
            Self::default()
        })
    }

    /// Compute metadata for a result of `total` records split into pages
    pub fn for_page(total: u64, page: u64, page_size: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        let last_page = total_pages.max(1);

        Self {
            total: Some(total),
            total_pages: Some(total_pages),
            first_page: Some(1),
            last_page: Some(last_page),
            page: Some(page),
            previous_page: (page > 1).then(|| page - 1),
            next_page: (page < last_page).then(|| page + 1),
        }
    }

    /// Whether there are pages after this one
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.page, self.total_pages) {
            (Some(page), Some(pages)) => write!(f, "page {} of {}", page, pages)?,
            (Some(page), None) => write!(f, "page {}", page)?,
            _ => write!(f, "no pagination information")?,
        }

        if let Some(total) = self.total {
            write!(f, " ({} datasets)", total)?;
        }

        Ok(())
    }
}

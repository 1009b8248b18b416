//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use vault_core::types::pagination::{DEFAULT_PAGE_SIZE, PageRequest};

/// `?page=N&page_size=M` on list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Clamps into range.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

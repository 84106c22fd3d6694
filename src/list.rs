use serde::{Deserialize, Serialize};

use crate::page_info::{page_info, PageInfo};
use crate::pagination::Pagination;

/// One page of results as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListData<T> {
    /// Number of matching entries
    pub total: i64,
    /// 1-based page number
    pub page: i64,
    /// Page size
    pub limit: i64,
    /// Entries of the current page
    pub data: T,
}

impl<T> ListData<T> {
    /// Wrap a page of `data`
    #[must_use]
    pub const fn new(total: i64, page: i64, limit: i64, data: T) -> Self {
        Self { total, page, limit, data }
    }

    /// Wrap a page of `data` fetched for `form`, echoing its page number and size
    #[must_use]
    pub fn from_form<P: Pagination + ?Sized>(form: &P, total: i64, data: T) -> Self {
        Self::new(total, form.page_number(), form.limit(), data)
    }

    /// Pagination metadata derived from `total`, `page` and `limit`
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        page_info(self.total, self.page, self.limit)
    }
}

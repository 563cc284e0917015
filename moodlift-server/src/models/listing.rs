//! Limit/offset listing types for the admin endpoints

use serde::{Deserialize, Serialize};

/// Maximum rows per admin list request
const MAX_LIMIT: u32 = 100;

/// Default rows per admin list request
const DEFAULT_LIMIT: u32 = 50;

/// Query parameters for admin list endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    /// Effective LIMIT, clamped to 1..=100
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective OFFSET
    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

/// One page of an admin listing, with the overall row count
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> ListPage<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListPage<U> {
        ListPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

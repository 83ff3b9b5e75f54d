use serde::{Deserialize, Serialize};

use crate::tasks::repo_types::Task;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub status: Option<String>,
}

/// Pagination query params; both optional. `page` and `limit` are clamped to
/// at least 1, `limit` is deliberately not capped.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.max(1)
    }

    // `page` and `limit` come straight off the query string; saturate instead
    // of overflowing on absurd values.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults() {
        let q: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn page_query_clamps_to_one() {
        let q: PageQuery = serde_json::from_str(r#"{"page":0,"limit":-5}"#).unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn offset_math() {
        let q: PageQuery = serde_json::from_str(r#"{"page":2,"limit":10}"#).unwrap();
        assert_eq!(q.offset(), 10);
    }

    #[test]
    fn offset_saturates_on_huge_page() {
        let q: PageQuery =
            serde_json::from_str(r#"{"page":9223372036854775807,"limit":10}"#).unwrap();
        assert_eq!(q.offset(), i64::MAX);

        let q: PageQuery =
            serde_json::from_str(r#"{"page":2,"limit":9223372036854775807}"#).unwrap();
        assert_eq!(q.offset(), i64::MAX);
    }

    #[test]
    fn pages_does_not_overflow_on_huge_limit() {
        assert_eq!(PaginationMeta::new(1, i64::MAX, 15).pages, 1);
    }

    #[test]
    fn pages_is_ceiling_of_total_over_limit() {
        // 15 tasks at limit 10 span two pages; page 2 holds the last 5.
        assert_eq!(PaginationMeta::new(2, 10, 15).pages, 2);
        assert_eq!(PaginationMeta::new(1, 10, 10).pages, 1);
        assert_eq!(PaginationMeta::new(1, 10, 11).pages, 2);
        assert_eq!(PaginationMeta::new(1, 10, 0).pages, 0);
        assert_eq!(PaginationMeta::new(1, 3, 7).pages, 3);
    }
}

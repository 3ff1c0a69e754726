use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Standard response envelope returned by the backend
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination metadata wrapping every list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages", alias = "total_pages")]
    pub total_pages: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            total: 0,
            total_pages: 0,
        }
    }
}

impl Pagination {
    /// Pagination derived locally when the server omits it
    pub fn from_count(page: i64, limit: i64, total: i64) -> Self {
        let limit = clamp_limit(limit);
        Self {
            page: page.max(1),
            limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Sort direction sent with list requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

/// Body of a `POST <resource>/get` list request.
///
/// Entity-specific filters are flattened next to the common fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListQuery {
    pub page: i64,
    pub limit: i64,
    pub sort_order: SortOrder,
    pub search: String,
    #[serde(flatten)]
    pub filters: BTreeMap<String, Value>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort_order: SortOrder::default(),
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

/// The two list shapes the backend uses.
///
/// Most endpoints nest rows and pagination under `data`; a few put the rows
/// directly in `data` and the pagination next to it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Flat {
        data: Option<Vec<T>>,
        pagination: Option<Pagination>,
        message: Option<String>,
    },
    Nested {
        data: Option<NestedList<T>>,
        message: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct NestedList<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    pagination: Option<Pagination>,
}

/// One page of a list response after normalizing the envelope
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
    pub message: Option<String>,
}

impl<T> Page<T> {
    /// Parse either list envelope shape
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        // Nested bodies have an object under `data`, which the flat variant rejects.
        // A null `data` therefore keeps any top-level pagination.
        let body: ListBody<T> = serde_json::from_value(value)?;
        Ok(match body {
            ListBody::Nested { data, message } => {
                let (items, pagination) = data
                    .map(|d| (d.data, d.pagination))
                    .unwrap_or_default();
                Page {
                    items,
                    pagination,
                    message,
                }
            }
            ListBody::Flat {
                data,
                pagination,
                message,
            } => Page {
                items: data.unwrap_or_default(),
                pagination,
                message,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn test_parse_nested_list_envelope() {
        let value = json!({
            "success": true,
            "data": {
                "data": [{"id": "1"}, {"id": "2"}],
                "pagination": {"page": 1, "limit": 10, "total": 2, "totalPages": 1}
            },
            "message": "ok"
        });
        let page: Page<Row> = Page::from_value(value).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.unwrap().total, 2);
        assert_eq!(page.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_parse_flat_list_envelope() {
        let value = json!({
            "success": true,
            "data": [{"id": "9"}],
            "pagination": {"page": 3, "limit": 5, "total": 11, "total_pages": 3}
        });
        let page: Page<Row> = Page::from_value(value).unwrap();
        assert_eq!(page.items, vec![Row { id: "9".into() }]);
        let pagination = page.pagination.unwrap();
        assert_eq!(pagination.page, 3);
        assert_eq!(pagination.total_pages, 3);
    }

    #[test]
    fn test_flat_envelope_with_null_data_keeps_pagination() {
        let value = json!({
            "success": true,
            "data": null,
            "pagination": {"page": 4, "limit": 10, "total": 31, "totalPages": 4}
        });
        let page: Page<Row> = Page::from_value(value).unwrap();
        assert!(page.items.is_empty());
        let pagination = page.pagination.unwrap();
        assert_eq!(pagination.page, 4);
        assert_eq!(pagination.total, 31);
    }

    #[test]
    fn test_nested_envelope_with_null_data_is_empty() {
        let page: Page<Row> = Page::from_value(json!({"success": true, "data": null})).unwrap();
        assert!(page.items.is_empty());
        assert!(page.pagination.is_none());
    }

    #[test]
    fn test_pagination_from_count() {
        let p = Pagination::from_count(2, 10, 21);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next());
        assert!(p.has_previous());

        let empty = Pagination::from_count(0, 10, 0);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next());
    }

    #[test]
    fn test_list_query_flattens_filters() {
        let mut query = ListQuery::default();
        query.search = "java".into();
        query.filters.insert("island_id".into(), json!("7"));
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(
            body,
            json!({
                "page": 1,
                "limit": 10,
                "sort_order": "desc",
                "search": "java",
                "island_id": "7"
            })
        );
    }
}

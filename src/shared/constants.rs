use std::time::Duration;

/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size the backend accepts
pub const MAX_PAGE_SIZE: i64 = 100;

/// Quiet period before a filter change triggers a list fetch
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(500);

/// Storage key of the persisted bearer token
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

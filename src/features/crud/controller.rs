use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use validator::Validate;

use crate::core::config::ListConfig;
use crate::core::error::{AppError, ErrorPayload, Result};
use crate::features::crud::resource::Resource;
use crate::features::crud::service::ResourceApi;
use crate::shared::debounce::Debouncer;
use crate::shared::types::{clamp_limit, ListQuery, Pagination, SortOrder};
use crate::shared::validation::is_duplicate_name;

/// Search, sort and entity-specific filters of a list screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilters {
    pub search: String,
    pub sort_order: SortOrder,
    pub extra: BTreeMap<String, Value>,
}

impl ListFilters {
    /// Apply one filter change. Empty strings and nulls remove the filter.
    pub fn set(&mut self, key: &str, value: Value) {
        match key {
            "search" => {
                self.search = value.as_str().map(str::to_string).unwrap_or_default();
            }
            "sort_order" => {
                self.sort_order = serde_json::from_value(value).unwrap_or_default();
            }
            _ => {
                let is_empty = match &value {
                    Value::Null => true,
                    Value::String(s) => s.trim().is_empty(),
                    _ => false,
                };
                if is_empty {
                    self.extra.remove(key);
                } else {
                    self.extra.insert(key.to_string(), value);
                }
            }
        }
    }

    pub fn to_query(&self, page: i64, limit: i64) -> ListQuery {
        ListQuery {
            page,
            limit,
            sort_order: self.sort_order,
            search: self.search.trim().to_string(),
            filters: self.extra.clone(),
        }
    }
}

/// Everything a list screen renders
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub filters: ListFilters,
    pub loading: bool,
    pub error: Option<ErrorPayload>,
}

impl<T> ListState<T> {
    fn new(limit: i64) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination {
                limit,
                ..Pagination::default()
            },
            filters: ListFilters::default(),
            loading: false,
            error: None,
        }
    }
}

/// List state and handlers for one resource.
///
/// Every successful mutation is followed by a full refetch of the current
/// page rather than a local patch; the backend stays the only source of
/// truth. Failures are recorded in `error` and returned, leaving the loaded
/// rows as they were.
pub struct CrudController<R: Resource> {
    api: Arc<dyn ResourceApi<R>>,
    state: Arc<RwLock<ListState<R::Item>>>,
    debouncer: Arc<Debouncer>,
    generation: Arc<AtomicU64>,
}

impl<R: Resource> Clone for CrudController<R> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            debouncer: Arc::clone(&self.debouncer),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<R: Resource> CrudController<R> {
    pub fn new(api: Arc<dyn ResourceApi<R>>, config: &ListConfig) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ListState::new(clamp_limit(
                config.default_page_size,
            )))),
            debouncer: Arc::new(Debouncer::new(config.filter_debounce)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    // ==================== Reads ====================

    pub async fn snapshot(&self) -> ListState<R::Item> {
        self.state.read().await.clone()
    }

    pub async fn items(&self) -> Vec<R::Item> {
        self.state.read().await.items.clone()
    }

    pub async fn pagination(&self) -> Pagination {
        self.state.read().await.pagination
    }

    pub async fn filters(&self) -> ListFilters {
        self.state.read().await.filters.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<ErrorPayload> {
        self.state.read().await.error.clone()
    }

    /// Load a single record; does not touch list state
    pub async fn get(&self, id: &str) -> Result<R::Item> {
        match self.api.get(id).await {
            Ok(item) => Ok(item),
            Err(e) => Err(self.fail(e).await),
        }
    }

    // ==================== Fetching ====================

    /// Load `page` with `limit` rows using the current filters.
    ///
    /// A response that arrives after a newer fetch was issued is dropped.
    pub async fn fetch(&self, page: i64, limit: i64) -> Result<()> {
        let page = page.max(1);
        let limit = clamp_limit(limit);

        let query = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.filters.to_query(page, limit)
        };
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.api.list(&query).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                "Discarding stale {} list response (page {})",
                R::LABEL,
                page
            );
            return Ok(());
        }
        state.loading = false;

        match result {
            Ok(fetched) => {
                let count = fetched.items.len() as i64;
                state.pagination = fetched
                    .pagination
                    .unwrap_or_else(|| Pagination::from_count(page, limit, count));
                state.items = fetched.items;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {} list: {}", R::LABEL, e);
                state.error = Some(e.payload());
                Err(e)
            }
        }
    }

    /// Reload the current page with the current limit
    pub async fn refetch(&self) -> Result<()> {
        let Pagination { page, limit, .. } = self.pagination().await;
        self.fetch(page, limit).await
    }

    pub async fn handle_page_change(&self, page: i64) -> Result<()> {
        let limit = self.pagination().await.limit;
        self.fetch(page, limit).await
    }

    pub async fn handle_limit_change(&self, limit: i64) -> Result<()> {
        self.fetch(1, limit).await
    }

    /// Update one filter, reset to page 1, and schedule a debounced fetch.
    ///
    /// Rapid successive calls coalesce into a single fetch issued once the
    /// input has been quiet for the debounce delay.
    pub async fn handle_filter_change(&self, key: &str, value: impl Into<Value>) {
        {
            let mut state = self.state.write().await;
            state.filters.set(key, value.into());
            state.pagination.page = 1;
        }

        let this = self.clone();
        self.debouncer.schedule(async move {
            if let Err(e) = this.refetch().await {
                tracing::debug!("Debounced {} fetch failed: {}", R::LABEL, e);
            }
        });
    }

    /// Replace all filters and reset to page 1 without scheduling a fetch
    pub async fn set_filters(&self, filters: ListFilters) {
        self.debouncer.cancel();
        let mut state = self.state.write().await;
        state.filters = filters;
        state.pagination.page = 1;
    }

    // ==================== Mutations ====================

    pub async fn create(&self, dto: R::Create) -> Result<()> {
        if let Err(e) = self.validate_create(&dto).await {
            return Err(self.fail(e).await);
        }
        if let Err(e) = self.api.create(&dto).await {
            return Err(self.fail(e).await);
        }
        self.refetch().await
    }

    pub async fn update(&self, id: &str, dto: R::Update) -> Result<()> {
        if let Err(e) = self.validate_update(id, &dto).await {
            return Err(self.fail(e).await);
        }
        if let Err(e) = self.api.update(id, &dto).await {
            return Err(self.fail(e).await);
        }
        self.refetch().await
    }

    /// Delete and refetch; steps back a page when the current one empties
    pub async fn delete(&self, id: &str) -> Result<()> {
        if let Err(e) = self.api.delete(id).await {
            return Err(self.fail(e).await);
        }
        self.refetch().await?;

        let (empty, page) = {
            let state = self.state.read().await;
            (state.items.is_empty(), state.pagination.page)
        };
        if empty && page > 1 {
            self.handle_page_change(page - 1).await?;
        }
        Ok(())
    }

    // ==================== Validation ====================

    async fn validate_create(&self, dto: &R::Create) -> Result<()> {
        dto.validate()?;
        if let Some(name) = R::create_name(dto) {
            self.ensure_unique_name(name, None).await?;
        }
        Ok(())
    }

    async fn validate_update(&self, id: &str, dto: &R::Update) -> Result<()> {
        dto.validate()?;
        if let Some(name) = R::update_name(dto) {
            self.ensure_unique_name(name, Some(id)).await?;
        }
        Ok(())
    }

    /// Only the loaded page is checked; names on other pages are not seen
    async fn ensure_unique_name(&self, name: &str, exclude_id: Option<&str>) -> Result<()> {
        let state = self.state.read().await;
        let rows = state.items.iter().map(|item| (R::id(item), R::name(item)));
        if is_duplicate_name(rows, name, exclude_id) {
            return Err(AppError::Validation(R::duplicate_message()));
        }
        Ok(())
    }

    async fn fail(&self, err: AppError) -> AppError {
        if err.is_validation() {
            tracing::info!("Rejected {} input: {}", R::LABEL, err);
        } else {
            tracing::warn!("{} request failed: {}", R::LABEL, err);
        }
        self.state.write().await.error = Some(err.payload());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::features::brands::{Brand, BrandResource, CreateBrandDto, UpdateBrandDto};
    use crate::shared::types::Page;

    fn brand(id: &str, name: &str) -> Brand {
        Brand {
            brand_id: id.to_string(),
            brand_name: name.to_string(),
            updated_at: None,
            updated_by_name: None,
        }
    }

    /// In-memory backend that records every call
    #[derive(Default)]
    struct FakeBrandApi {
        rows: Mutex<Vec<Brand>>,
        queries: Mutex<Vec<ListQuery>>,
        delays: HashMap<i64, Duration>,
        mutations: AtomicUsize,
    }

    impl FakeBrandApi {
        fn with_rows(rows: Vec<Brand>) -> Self {
            Self {
                rows: Mutex::new(rows),
                ..Self::default()
            }
        }

        fn list_calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }

        fn last_query(&self) -> ListQuery {
            self.queries.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ResourceApi<BrandResource> for FakeBrandApi {
        async fn list(&self, query: &ListQuery) -> Result<Page<Brand>> {
            self.queries.lock().unwrap().push(query.clone());
            if let Some(delay) = self.delays.get(&query.page) {
                tokio::time::sleep(*delay).await;
            }
            let rows = self.rows.lock().unwrap().clone();
            let total = rows.len() as i64;
            let start = ((query.page - 1) * query.limit) as usize;
            let items: Vec<Brand> = rows
                .into_iter()
                .skip(start)
                .take(query.limit as usize)
                .collect();
            Ok(Page {
                items,
                pagination: Some(Pagination::from_count(query.page, query.limit, total)),
                message: None,
            })
        }

        async fn get(&self, id: &str) -> Result<Brand> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.brand_id == id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(id.to_string()))
        }

        async fn create(&self, dto: &CreateBrandDto) -> Result<()> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            let id = (rows.len() + 1).to_string();
            rows.push(brand(&id, &dto.brand_name));
            Ok(())
        }

        async fn update(&self, id: &str, dto: &UpdateBrandDto) -> Result<()> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|b| b.brand_id == id) {
                row.brand_name = dto.brand_name.clone();
            }
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            self.rows.lock().unwrap().retain(|b| b.brand_id != id);
            Ok(())
        }
    }

    fn controller(api: Arc<FakeBrandApi>) -> CrudController<BrandResource> {
        CrudController::new(api, &ListConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_change_resets_page_and_debounces_fetch() {
        let rows = (1..=35).map(|i| brand(&i.to_string(), &format!("Brand {}", i)));
        let api = Arc::new(FakeBrandApi::with_rows(rows.collect()));
        let controller = controller(Arc::clone(&api));

        controller.fetch(3, 10).await.unwrap();
        assert_eq!(controller.pagination().await.page, 3);
        assert_eq!(api.list_calls(), 1);

        for term in ["b", "br", "bra", "bran"] {
            controller.handle_filter_change("search", term).await;
            assert_eq!(controller.pagination().await.page, 1);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        // still inside the quiet window
        assert_eq!(api.list_calls(), 1);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(api.list_calls(), 2);
        let query = api.last_query();
        assert_eq!(query.page, 1);
        assert_eq!(query.search, "bran");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_filter_value_removes_filter() {
        let api = Arc::new(FakeBrandApi::default());
        let controller = controller(Arc::clone(&api));

        controller.handle_filter_change("status", "active").await;
        controller.handle_filter_change("island_id", "4").await;
        controller.handle_filter_change("status", "").await;
        tokio::time::sleep(Duration::from_millis(600)).await;

        let query = api.last_query();
        assert_eq!(api.list_calls(), 1);
        assert!(!query.filters.contains_key("status"));
        assert_eq!(query.filters.get("island_id"), Some(&Value::from("4")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_filters_cancels_pending_debounce() {
        let api = Arc::new(FakeBrandApi::default());
        let controller = controller(Arc::clone(&api));

        controller.handle_filter_change("search", "ac").await;
        let mut filters = ListFilters::default();
        filters.set("search", Value::from("acme"));
        controller.set_filters(filters).await;
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(api.list_calls(), 0);

        controller.refetch().await.unwrap();
        assert_eq!(api.last_query().search, "acme");
        assert_eq!(api.last_query().page, 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_on_loaded_page_is_rejected_locally() {
        let api = Arc::new(FakeBrandApi::with_rows(vec![brand("1", "acme")]));
        let controller = controller(Arc::clone(&api));
        controller.fetch(1, 10).await.unwrap();

        let err = controller
            .create(CreateBrandDto::new("Acme"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.payload().message,
            "A brand with this name already exists"
        );
        assert_eq!(api.mutations.load(Ordering::SeqCst), 0);
        assert_eq!(
            controller.error().await.map(|e| e.message).as_deref(),
            Some("A brand with this name already exists")
        );
    }

    #[tokio::test]
    async fn test_duplicate_outside_loaded_page_is_not_detected() {
        let mut rows: Vec<Brand> = (1..=10)
            .map(|i| brand(&i.to_string(), &format!("Brand {}", i)))
            .collect();
        rows.push(brand("11", "Hidden"));
        let api = Arc::new(FakeBrandApi::with_rows(rows));
        let controller = controller(Arc::clone(&api));
        controller.fetch(1, 10).await.unwrap();

        controller.create(CreateBrandDto::new("hidden")).await.unwrap();
        assert_eq!(api.mutations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_update_may_keep_its_own_name() {
        let api = Arc::new(FakeBrandApi::with_rows(vec![
            brand("1", "Acme"),
            brand("2", "Borneo"),
        ]));
        let controller = controller(Arc::clone(&api));
        controller.fetch(1, 10).await.unwrap();

        controller
            .update("1", UpdateBrandDto::new(" ACME "))
            .await
            .unwrap();

        let err = controller
            .update("2", UpdateBrandDto::new("acme"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(api.mutations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_name_fails_validation() {
        let api = Arc::new(FakeBrandApi::default());
        let controller = controller(Arc::clone(&api));

        let err = controller
            .create(CreateBrandDto::new("   "))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(api.mutations.load(Ordering::SeqCst), 0);
        assert_eq!(api.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_mutations_refetch_current_page() {
        let rows = (1..=15).map(|i| brand(&i.to_string(), &format!("Brand {}", i)));
        let api = Arc::new(FakeBrandApi::with_rows(rows.collect()));
        let controller = controller(Arc::clone(&api));
        controller.fetch(2, 10).await.unwrap();
        assert_eq!(controller.items().await.len(), 5);

        controller.create(CreateBrandDto::new("New One")).await.unwrap();
        assert_eq!(api.list_calls(), 2);
        assert_eq!(api.last_query().page, 2);
        assert_eq!(controller.items().await.len(), 6);
        assert_eq!(controller.pagination().await.total, 16);
    }

    #[tokio::test]
    async fn test_delete_last_row_on_page_steps_back() {
        let rows = (1..=11).map(|i| brand(&i.to_string(), &format!("Brand {}", i)));
        let api = Arc::new(FakeBrandApi::with_rows(rows.collect()));
        let controller = controller(Arc::clone(&api));
        controller.fetch(2, 10).await.unwrap();

        controller.delete("11").await.unwrap();
        let pagination = controller.pagination().await;
        assert_eq!(pagination.page, 1);
        assert_eq!(controller.items().await.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_does_not_overwrite_newer_one() {
        let rows = (1..=25).map(|i| brand(&i.to_string(), &format!("Brand {}", i)));
        let mut api = FakeBrandApi::with_rows(rows.collect());
        api.delays.insert(1, Duration::from_secs(2));
        let api = Arc::new(api);
        let controller = controller(Arc::clone(&api));

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.fetch(1, 10).await })
        };
        tokio::task::yield_now().await;
        controller.fetch(2, 10).await.unwrap();
        slow.await.unwrap().unwrap();

        assert_eq!(controller.pagination().await.page, 2);
        let items = controller.items().await;
        assert_eq!(items[0].brand_id, "11");
        assert!(!controller.is_loading().await);
    }
}

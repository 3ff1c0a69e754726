use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::core::http::ApiClient;
use crate::features::crud::resource::Resource;
use crate::shared::types::{ApiResponse, ListQuery, Page};

/// Backend operations for one resource
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Page<R::Item>>;
    async fn get(&self, id: &str) -> Result<R::Item>;
    async fn create(&self, dto: &R::Create) -> Result<()>;
    async fn update(&self, id: &str, dto: &R::Update) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Maps CRUD verbs of a [`Resource`] onto its REST endpoints
pub struct CrudService<R: Resource> {
    client: Arc<ApiClient>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> CrudService<R> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", R::ENDPOINT, urlencoding::encode(id))
    }
}

impl<R: Resource> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for CrudService<R> {
    async fn list(&self, query: &ListQuery) -> Result<Page<R::Item>> {
        let mut body = serde_json::to_value(query)
            .map_err(|e| AppError::Internal(format!("Failed to encode list query: {}", e)))?;
        if let (Some(flag), Value::Object(map)) = (self.client.is_admin_param(), &mut body) {
            map.entry("is_admin")
                .or_insert_with(|| Value::String(flag.to_string()));
        }

        let value: Value = self
            .client
            .post(&format!("{}/get", R::ENDPOINT), &body)
            .await?;

        let page = Page::from_value(value).map_err(|e| {
            tracing::error!("Failed to parse {} list: {}", R::LABEL, e);
            AppError::Decode(e.to_string())
        })?;

        tracing::debug!(
            "Fetched {} {} rows (page {})",
            page.items.len(),
            R::LABEL,
            query.page
        );
        Ok(page)
    }

    async fn get(&self, id: &str) -> Result<R::Item> {
        let response: ApiResponse<R::Item> = self.client.get(&Self::item_path(id)).await?;
        response
            .data
            .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", R::LABEL, id)))
    }

    async fn create(&self, dto: &R::Create) -> Result<()> {
        self.client
            .post_unit(&format!("{}/create", R::ENDPOINT), dto)
            .await?;
        tracing::info!("{} created", R::LABEL);
        Ok(())
    }

    async fn update(&self, id: &str, dto: &R::Update) -> Result<()> {
        self.client.put_unit(&Self::item_path(id), dto).await?;
        tracing::info!("{} updated: id={}", R::LABEL, id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&Self::item_path(id)).await?;
        tracing::info!("{} deleted: id={}", R::LABEL, id);
        Ok(())
    }
}

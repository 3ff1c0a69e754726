use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::core::http::ApiClient;
use crate::features::tracking::model::{LocationPoint, RouteSummary, TrackingQuery};
use crate::shared::types::Page;

/// Reads recorded locations from the tracking backend
pub struct TrackingService {
    client: ApiClient,
}

impl TrackingService {
    /// Shares the HTTP pool and auth context of `client`, but talks to
    /// `track_base_url`
    pub fn new(client: &ApiClient, track_base_url: &str) -> Self {
        Self {
            client: client.with_base_url(track_base_url),
        }
    }

    pub async fn fetch_points(&self, query: &TrackingQuery) -> Result<Vec<LocationPoint>> {
        let value: Value = self.client.post("tracking/get", query).await?;

        let page = Page::<LocationPoint>::from_value(value).map_err(|e| {
            tracing::error!("Failed to parse tracking response: {}", e);
            AppError::Decode(e.to_string())
        })?;

        tracing::debug!("Fetched {} location points", page.items.len());
        Ok(page.items)
    }

    pub async fn route(&self, query: &TrackingQuery) -> Result<(Vec<LocationPoint>, RouteSummary)> {
        let points = self.fetch_points(query).await?;
        let summary = RouteSummary::from_points(&points);
        Ok((points, summary))
    }
}

use std::sync::Arc;

use serde::Serialize;

use crate::core::error::Result;
use crate::core::http::ApiClient;
use crate::features::crud::{CrudController, CrudService};
use crate::features::territory::models::{
    AreaResource, GroupResource, IupSegmentationResource, IupZoneResource,
};
use crate::features::territory::tree::{node_count, TerritoryNode};
use crate::shared::types::ApiResponse;

pub type GroupService = CrudService<GroupResource>;
pub type GroupController = CrudController<GroupResource>;
pub type AreaService = CrudService<AreaResource>;
pub type AreaController = CrudController<AreaResource>;
pub type IupZoneService = CrudService<IupZoneResource>;
pub type IupZoneController = CrudController<IupZoneResource>;
pub type IupSegmentationService = CrudService<IupSegmentationResource>;
pub type IupSegmentationController = CrudController<IupSegmentationResource>;

/// Filters for the nested territory tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct TerritoryTreeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub island_id: Option<String>,
}

/// Loads the nested Island → ... → IUP tree used by the territory viewer
pub struct TerritoryService {
    client: Arc<ApiClient>,
}

impl TerritoryService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the whole tree; the result is read-only display data
    pub async fn fetch_tree(&self, query: &TerritoryTreeQuery) -> Result<Vec<TerritoryNode>> {
        let response: ApiResponse<Vec<TerritoryNode>> =
            self.client.post("territory/get", query).await?;
        let tree = response.data.unwrap_or_default();

        tracing::debug!(
            "Fetched territory tree: {} roots, {} nodes",
            tree.len(),
            node_count(&tree)
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::core::config::ApiConfig;
    use crate::features::auth::AuthContext;
    use crate::features::territory::tree::flatten;

    #[tokio::test]
    async fn test_fetch_tree_sends_filters_and_parses_nodes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/territory/get"))
            .and(body_json(json!({"island_id": "1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{
                    "id": "1", "name": "Kalimantan",
                    "children": [{
                        "id": "10", "name": "East",
                        "children": [{"id": "100", "name": "Kutai"}]
                    }]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(
            &ApiConfig::for_base_url(server.uri()),
            Arc::new(AuthContext::anonymous()),
        )
        .unwrap();
        let service = TerritoryService::new(Arc::new(client));
        let tree = service
            .fetch_tree(&TerritoryTreeQuery {
                search: None,
                island_id: Some("1".into()),
            })
            .await
            .unwrap();

        let rows = flatten(&tree);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].parent_id.as_deref(), Some("10"));
    }
}

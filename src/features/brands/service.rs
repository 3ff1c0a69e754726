use crate::features::brands::model::BrandResource;
use crate::features::crud::{CrudController, CrudService};

pub type BrandService = CrudService<BrandResource>;
pub type BrandController = CrudController<BrandResource>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::core::config::{ApiConfig, ListConfig};
    use crate::core::http::ApiClient;
    use crate::features::auth::AuthContext;
    use crate::features::brands::CreateBrandDto;

    #[tokio::test]
    async fn test_duplicate_brand_rejected_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/brand/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "data": [{"brand_id": "b1", "brand_name": "acme"}],
                    "pagination": {"page": 1, "limit": 10, "total": 1, "totalPages": 1}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/brand/create"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(
            &ApiConfig::for_base_url(server.uri()),
            Arc::new(AuthContext::anonymous()),
        )
        .unwrap();
        let service = Arc::new(BrandService::new(Arc::new(client)));
        let controller = BrandController::new(service, &ListConfig::default());

        controller.fetch(1, 10).await.unwrap();
        let err = controller
            .create(CreateBrandDto::new("Acme"))
            .await
            .unwrap_err();

        assert_eq!(err.payload().message, "A brand with this name already exists");
        assert_eq!(err.status(), None);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}

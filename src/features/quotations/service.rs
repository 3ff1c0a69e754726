use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::PdfConfig;
use crate::core::error::Result;
use crate::core::http::ApiClient;
use crate::features::crud::{CrudController, CrudService, ResourceApi};
use crate::features::quotations::model::{Quotation, QuotationResource};
use crate::features::term_conditions::{TermConditionResource, TermConditionService};
use crate::modules::pdf::{save_quotation_pdf, CompanyProfile};

pub type QuotationService = CrudService<QuotationResource>;
pub type QuotationController = CrudController<QuotationResource>;

/// Loads a quotation, resolves its terms and writes the printable PDF
pub struct QuotationPrinter {
    quotations: Arc<dyn ResourceApi<QuotationResource>>,
    terms: Arc<dyn ResourceApi<TermConditionResource>>,
    company: CompanyProfile,
    output_dir: PathBuf,
}

impl QuotationPrinter {
    pub fn new(client: Arc<ApiClient>, config: &PdfConfig) -> Self {
        Self {
            quotations: Arc::new(QuotationService::new(Arc::clone(&client))),
            terms: Arc::new(TermConditionService::new(client)),
            company: CompanyProfile::from(config),
            output_dir: config.output_dir.clone(),
        }
    }

    /// Fetch the quotation; when it carries a term-condition reference but
    /// no copied terms, the template content is pulled in
    pub async fn resolve(&self, quotation_id: &str) -> Result<Quotation> {
        let mut quotation = self.quotations.get(quotation_id).await?;

        let has_terms = quotation
            .term_content
            .as_deref()
            .is_some_and(|content| !content.trim().is_empty());

        if !has_terms {
            if let Some(term_id) = quotation.term_condition_id.clone() {
                let term = self.terms.get(&term_id).await?;
                tracing::debug!(
                    "Quotation {} uses term condition '{}'",
                    quotation.quotation_no,
                    term.term_condition_name
                );
                quotation.term_content = Some(term.content);
            }
        }

        Ok(quotation)
    }

    pub async fn print(&self, quotation_id: &str) -> Result<PathBuf> {
        let quotation = self.resolve(quotation_id).await?;
        save_quotation_pdf(&quotation, &self.company, &self.output_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::core::config::ApiConfig;
    use crate::core::error::AppError;
    use crate::features::auth::AuthContext;

    fn pdf_config(dir: &std::path::Path) -> PdfConfig {
        PdfConfig {
            output_dir: dir.to_path_buf(),
            company_name: "PT Mitra Tambang Nusantara".to_string(),
            company_address: None,
            company_phone: None,
        }
    }

    fn client_for(server: &MockServer) -> Arc<ApiClient> {
        Arc::new(
            ApiClient::new(
                &ApiConfig::for_base_url(server.uri()),
                Arc::new(AuthContext::with_token("t0ken")),
            )
            .unwrap(),
        )
    }

    async fn mount_quotation(server: &MockServer, term_content: Option<&str>) {
        Mock::given(method("GET"))
            .and(path("/quotation/q-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "quotation_id": "q-1",
                    "quotation_no": "QT/2024/007",
                    "customer_name": "PT Bara Kalimantan",
                    "ppn_percentage": 11,
                    "term_condition_id": "t-1",
                    "term_content": term_content,
                    "items": [
                        {"product_name": "Dump Truck HD785", "quantity": 2, "price": 750000000}
                    ]
                }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_resolve_pulls_term_template_when_missing() {
        let server = MockServer::start().await;
        mount_quotation(&server, None).await;
        Mock::given(method("GET"))
            .and(path("/term-condition/t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "term_condition_id": "t-1",
                    "term_condition_name": "Standard",
                    "content": "<ol><li>Franco Balikpapan</li></ol>"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let printer = QuotationPrinter::new(client_for(&server), &pdf_config(dir.path()));
        let quotation = printer.resolve("q-1").await.unwrap();

        assert_eq!(
            quotation.term_content.as_deref(),
            Some("<ol><li>Franco Balikpapan</li></ol>")
        );
    }

    #[tokio::test]
    async fn test_resolve_keeps_copied_terms() {
        let server = MockServer::start().await;
        mount_quotation(&server, Some("<p>Custom terms</p>")).await;
        Mock::given(method("GET"))
            .and(path("/term-condition/t-1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let printer = QuotationPrinter::new(client_for(&server), &pdf_config(dir.path()));
        let quotation = printer.resolve("q-1").await.unwrap();

        assert_eq!(quotation.term_content.as_deref(), Some("<p>Custom terms</p>"));
    }

    #[tokio::test]
    async fn test_print_writes_pdf_into_output_dir() {
        let server = MockServer::start().await;
        mount_quotation(&server, Some("<p>Net 30</p>")).await;

        let dir = tempfile::tempdir().unwrap();
        let printer = QuotationPrinter::new(client_for(&server), &pdf_config(dir.path()));
        let path = printer.print("q-1").await.unwrap();

        assert_eq!(path.parent(), Some(dir.path()));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_missing_quotation_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quotation/nope"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Quotation not found"})),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let printer = QuotationPrinter::new(client_for(&server), &pdf_config(dir.path()));
        let err = printer.print("nope").await.unwrap_err();

        assert!(matches!(err, AppError::Api { status: 404, .. }));
        assert_eq!(err.to_string(), "Quotation not found");
    }
}

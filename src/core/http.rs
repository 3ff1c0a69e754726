use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
use crate::features::auth::AuthContext;
use crate::shared::constants::REQUEST_ID_HEADER;

/// Thin wrapper over `reqwest` shared by every service.
///
/// Injects the bearer token from [`AuthContext`], tags each request with an
/// `X-Request-Id`, and turns every failure into an [`AppError`]. Each call
/// is a single attempt.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<AuthContext>,
    is_admin_param: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, auth: Arc<AuthContext>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("iup-admin/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth,
            is_admin_param: config.is_admin_param.clone(),
        })
    }

    /// Same client and credentials against another backend
    pub fn with_base_url(&self, base_url: &str) -> Self {
        Self {
            http: self.http.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: Arc::clone(&self.auth),
            is_admin_param: self.is_admin_param.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    pub fn is_admin_param(&self) -> Option<&str> {
        self.is_admin_param.as_deref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        decode(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::PUT, path).json(body))
            .await?;
        decode(response).await
    }

    /// POST where only the status matters
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.execute(self.request(Method::POST, path).json(body))
            .await
            .map(|_| ())
    }

    /// PUT where only the status matters
    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.execute(self.request(Method::PUT, path).json(body))
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request_id = Uuid::now_v7().to_string();
        let mut builder = builder.header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = self.auth.token().await {
            builder = builder.bearer_auth(token);
        }

        let request = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build request: {}", e)))?;
        let method = request.method().clone();
        let url = request.url().to_string();

        tracing::debug!("{} {} (request_id={})", method, url, request_id);

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::error!("{} {} failed without response: {}", method, url, e);
            AppError::Network(NETWORK_ERROR_MESSAGE.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_from_response(status, &body);
        tracing::warn!(
            "{} {} -> HTTP {} (request_id={}): {}",
            method,
            url,
            status.as_u16(),
            request_id,
            err
        );
        Err(err)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Network(format!("{}: {}", NETWORK_ERROR_MESSAGE, e)))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!("Failed to parse response body: {}", e);
        AppError::Decode(e.to_string())
    })
}

/// Shape a non-2xx response into `{message, status}`.
///
/// The server's `message` wins over its `error`; anything else gets the
/// generic message.
pub fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            let pick = |key: &str| {
                value
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };
            pick("message").or_else(|| pick("error"))
        })
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

    AppError::Api {
        status: status.as_u16(),
        message,
    }
}

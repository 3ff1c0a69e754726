use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::http::ApiClient;
use crate::features::auth::dto::{LoggedInUser, LoginRequestDto, LoginResponseDto};
use crate::shared::types::ApiResponse;

pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and persist it in the auth context
    pub async fn login(&self, dto: &LoginRequestDto) -> Result<Option<LoggedInUser>> {
        dto.validate()?;

        let response: ApiResponse<LoginResponseDto> = self.client.post("auth/login", dto).await?;
        let data = response
            .data
            .ok_or_else(|| AppError::Auth("Login response is missing data".to_string()))?;
        let user = data.user.clone();
        let token = data
            .into_token()
            .ok_or_else(|| AppError::Auth("Login response did not contain a token".to_string()))?;

        self.client.auth().set_token(token).await?;
        tracing::info!("Logged in as {}", dto.email);
        Ok(user)
    }

    /// Forget the stored token. No backend call is made.
    pub async fn logout(&self) -> Result<()> {
        self.client.auth().clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request DTO for user login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `data` of the login response. Older backends name the token
/// `access_token`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponseDto {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<LoggedInUser>,
}

impl LoginResponseDto {
    pub fn into_token(self) -> Option<String> {
        self.token
            .or(self.access_token)
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedInUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequestDto {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequestDto {
            email: "admin".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_token_field_fallback() {
        let dto: LoginResponseDto =
            serde_json::from_value(serde_json::json!({"access_token": "abc"})).unwrap();
        assert_eq!(dto.into_token().as_deref(), Some("abc"));

        let dto: LoginResponseDto =
            serde_json::from_value(serde_json::json!({"token": " "})).unwrap();
        assert!(dto.into_token().is_none());
    }
}

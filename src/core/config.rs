use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::shared::constants::{DEFAULT_PAGE_SIZE, FILTER_DEBOUNCE};

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub list: ListConfig,
    pub pdf: PdfConfig,
}

/// Backend endpoints and HTTP client behaviour
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Base URL of the location tracking backend
    pub track_base_url: String,
    /// Value sent as `is_admin` in every list request when set
    pub is_admin_param: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Directory holding the persisted `auth_token` file
    pub token_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ListConfig {
    pub default_page_size: i64,
    pub filter_debounce: Duration,
}

/// Company profile and output location for generated quotation documents
#[derive(Debug, Clone)]
pub struct PdfConfig {
    pub output_dir: PathBuf,
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
}

/// Read `name`, falling back to the `VITE_`-prefixed variant the web build used
fn env_with_legacy(name: &str) -> Option<String> {
    env::var(name)
        .or_else(|_| env::var(format!("VITE_{}", name)))
        .ok()
        .filter(|s| !s.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            list: ListConfig::from_env()?,
            pdf: PdfConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env_with_legacy("API_BASE_URL").unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());

        let track_base_url =
            env_with_legacy("API_TRACK_BASE_URL").unwrap_or_else(|| base_url.clone());

        let is_admin_param = env_with_legacy("PARAM_IS_ADMIN");

        let timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "HTTP_TIMEOUT_SECS must be a valid number".to_string())?;

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(format!("API_BASE_URL must be an http(s) URL, got '{}'", base_url));
        }

        Ok(Self {
            base_url,
            track_base_url,
            is_admin_param,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Configuration pointing at a single base URL, used by tests and tooling
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            track_base_url: base_url.clone(),
            base_url,
            is_admin_param: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AuthConfig {
    const DEFAULT_TOKEN_DIR: &'static str = ".iup-admin";

    pub fn from_env() -> Result<Self, String> {
        let token_dir = env::var("AUTH_TOKEN_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(Self::DEFAULT_TOKEN_DIR));

        Ok(Self { token_dir })
    }
}

impl ListConfig {
    pub fn from_env() -> Result<Self, String> {
        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse::<i64>()
            .map_err(|_| "DEFAULT_PAGE_SIZE must be a valid number".to_string())?;

        let debounce_ms = env::var("FILTER_DEBOUNCE_MS")
            .unwrap_or_else(|_| FILTER_DEBOUNCE.as_millis().to_string())
            .parse::<u64>()
            .map_err(|_| "FILTER_DEBOUNCE_MS must be a valid number".to_string())?;

        Ok(Self {
            default_page_size,
            filter_debounce: Duration::from_millis(debounce_ms),
        })
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            filter_debounce: FILTER_DEBOUNCE,
        }
    }
}

impl PdfConfig {
    pub fn from_env() -> Result<Self, String> {
        let output_dir = env::var("PDF_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let company_name = env::var("PDF_COMPANY_NAME")
            .unwrap_or_else(|_| "PT Mitra Tambang Nusantara".to_string());

        let company_address = env::var("PDF_COMPANY_ADDRESS").ok().filter(|s| !s.is_empty());
        let company_phone = env::var("PDF_COMPANY_PHONE").ok().filter(|s| !s.is_empty());

        Ok(Self {
            output_dir,
            company_name,
            company_address,
            company_phone,
        })
    }
}

use reqwest::{Response, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudydeskError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session expired")]
    SessionExpired,
}

pub type Result<T> = std::result::Result<T, StudydeskError>;

/// Check a platform API response and return the body as text on success.
/// 401 maps to SessionExpired so the caller can ask for a fresh login.
pub async fn check_api_response(response: Response, context: &str) -> Result<String> {
    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(StudydeskError::SessionExpired);
    }

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(StudydeskError::Api(format!("{} {}: {}", context, status, body)));
    }

    Ok(response.text().await?)
}

//! Error type definitions.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// A `Result` alias where the `Err` case is `user_roster::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for the user service client.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid API key (make sure there are no invalid characters)")]
    InvalidApiKey,
    #[error("Failed to setup HTTP client: {0}")]
    HttpClientSetup(reqwest::Error),
    #[error("Failed to deserialize response: {0}")]
    Deserialize(reqwest::Error),
    #[error("Http error: {0}")]
    Http(reqwest::Error),
    #[error(transparent)]
    Api(ApiError),
    #[error(transparent)]
    InvalidParams(#[from] serde_qs::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(url::ParseError),
}

/// An error returned by the user service.
#[derive(Deserialize, Debug)]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    #[serde(skip)]
    pub method: http::Method,
    #[serde(skip)]
    pub path: String,
    #[serde(alias = "message")]
    pub error: Option<String>,
}

impl ApiError {
    pub(crate) fn new(
        status: u16,
        method: http::Method,
        path: String,
        error: Option<String>,
    ) -> Self {
        Self {
            status,
            method,
            path,
            error,
        }
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = self.error.as_ref() {
            write!(
                f,
                "Received {} on {} {}: {}",
                self.status, self.method, self.path, msg
            )
        } else {
            write!(f, "Received {} on {} {}", self.status, self.method, self.path)
        }
    }
}

#[cfg(test)]
mod test {
    use super::ApiError;

    #[test]
    fn display_with_and_without_message() {
        let e = ApiError::new(
            400,
            http::Method::POST,
            "/api/login".to_string(),
            Some("Missing password".to_string()),
        );
        assert_eq!(
            e.to_string(),
            "Received 400 on POST /api/login: Missing password"
        );

        let e = ApiError::new(404, http::Method::DELETE, "/api/users/9".to_string(), None);
        assert_eq!(e.to_string(), "Received 404 on DELETE /api/users/9");
    }
}

use crate::{auth::model::*, error::Result, http};
use tracing::instrument;

/// Provides the login call.
#[derive(Debug, Clone)]
pub struct Client<'client> {
    http_client: &'client http::Client,
}

impl<'client> Client<'client> {
    pub(crate) fn new(http_client: &'client http::Client) -> Self {
        Self { http_client }
    }

    /// Log in with an email and password.
    ///
    /// # Errors
    /// If the API call fails, including rejected credentials.
    #[instrument(skip(self, password))]
    pub async fn login<E, P>(&self, email: E, password: P) -> Result<Login>
    where
        E: Into<String> + std::fmt::Debug,
        P: Into<String>,
    {
        self.login_with(&Credentials::new(email, password)).await
    }

    /// Log in with prepared credentials.
    ///
    /// # Errors
    /// If the API call fails, including rejected credentials.
    #[instrument(skip(self))]
    pub async fn login_with(&self, credentials: &Credentials) -> Result<Login> {
        self.http_client
            .post("/api/login", credentials)
            .await?
            .json()
            .await
    }
}

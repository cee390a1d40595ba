use crate::{error::Result, http, users::model::*};
use tracing::instrument;

/// Provides methods to work with users.
#[derive(Debug, Clone)]
pub struct Client<'client> {
    http_client: &'client http::Client,
    per_page: Option<u32>,
}

impl<'client> Client<'client> {
    pub(crate) fn new(http_client: &'client http::Client, per_page: Option<u32>) -> Self {
        Self {
            http_client,
            per_page,
        }
    }

    /// Retrieve one page of users.
    ///
    /// # Errors
    /// If the API call fails
    #[instrument(skip(self))]
    pub async fn list(&self, page: u32) -> Result<UserPage> {
        let opts = ListOptions {
            page,
            per_page: self.per_page,
        };
        let query_params = serde_qs::to_string(&opts)?;
        self.http_client
            .get(format!("/api/users?{query_params}"))
            .await?
            .json()
            .await
    }

    /// Update the editable fields of a user.
    ///
    /// # Errors
    /// If the API call fails
    #[instrument(skip(self))]
    pub async fn update(&self, id: UserId, update: &UserUpdate) -> Result<UserPatch> {
        self.http_client
            .put(format!("/api/users/{id}"), update)
            .await?
            .json()
            .await
    }

    /// Delete a user.
    ///
    /// # Errors
    /// If the API call fails
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<()> {
        self.http_client.delete(format!("/api/users/{id}")).await
    }
}

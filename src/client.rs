//! The top-level client for the user service.
use std::env;

use crate::{
    auth,
    error::Result,
    http, users,
};

/// Default URL of the public reqres user service.
static DEFAULT_URL: &str = "https://reqres.in";

/// The client is the entrypoint for talking to the user service.
///
/// You can create it using [`Client::builder`] or [`Client::new`].
///
/// # Examples
/// ```no_run
/// use user_roster::{Client, Error};
///
/// fn main() -> Result<(), Error> {
///     // Create a new client and read the URL and (optional) API key from
///     // the environment variables ROSTER_URL and ROSTER_API_KEY.
///     let client = Client::new()?;
///
///     // Set all available options. Unset options fall back to environment
///     // variables.
///     let client = Client::builder()
///         .with_url("https://reqres.in")
///         .with_api_key("reqres-free-v1")
///         .with_per_page(6)
///         .build()?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    per_page: Option<u32>,
    http_client: http::Client,
}

impl Client {
    /// Creates a new client. If you want to configure it, use [`Client::builder`].
    ///
    /// # Errors
    /// If the URL or API key are invalid or the HTTP client can't be set up.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client using a builder.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Get the url (cloned).
    pub fn url(&self) -> String {
        self.url.clone()
    }

    /// Get the configured page size, if any.
    pub fn per_page(&self) -> Option<u32> {
        self.per_page
    }

    /// Users API.
    pub fn users(&self) -> users::Client<'_> {
        users::Client::new(&self.http_client, self.per_page)
    }

    /// Login API.
    pub fn auth(&self) -> auth::Client<'_> {
        auth::Client::new(&self.http_client)
    }
}

/// This builder is used to create a new client.
pub struct Builder {
    env_fallback: bool,
    url: Option<String>,
    api_key: Option<String>,
    per_page: Option<u32>,
}

impl Builder {
    /// Create a new builder.
    fn new() -> Self {
        Self {
            env_fallback: true,
            url: None,
            api_key: None,
            per_page: None,
        }
    }

    /// Don't fall back to environment variables.
    pub fn no_env(mut self) -> Self {
        self.env_fallback = false;
        self
    }

    /// Add an API key to the client. If this is not set, the key will be read
    /// from the environment variable `ROSTER_API_KEY`. Without a key no
    /// `x-api-key` header is sent.
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL of the user service. If this is not set, the URL will
    /// be read from the environment variable `ROSTER_URL` and default to
    /// `https://reqres.in`.
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Request pages of this size instead of the server default.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// If the URL or API key are invalid or the HTTP client can't be set up.
    pub fn build(self) -> Result<Client> {
        let env_fallback = self.env_fallback;

        let mut url = self.url.unwrap_or_default();
        if url.is_empty() && env_fallback {
            url = env::var("ROSTER_URL").unwrap_or_default();
        }
        if url.is_empty() {
            url = DEFAULT_URL.to_string();
        }

        let mut api_key = self.api_key.unwrap_or_default();
        if api_key.is_empty() && env_fallback {
            api_key = env::var("ROSTER_API_KEY").unwrap_or_default();
        }
        let api_key = Some(api_key).filter(|key| !key.is_empty());

        let http_client = http::Client::new(&url, api_key)?;

        Ok(Client {
            url,
            per_page: self.per_page,
            http_client,
        })
    }
}

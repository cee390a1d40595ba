//! Application-scoped session state.
//!
//! A [`Session`] starts out unauthenticated and flips to authenticated after
//! a successful login. It gates entry into the user list.

use tracing::{info, instrument, warn};

use crate::{
    auth::{self, Credentials},
    error::Result,
    routes::Route,
};

/// Holds whether the current user is logged in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    /// A fresh, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Log in and mark the session as authenticated. On failure the session
    /// keeps its previous state and the error is returned.
    ///
    /// # Errors
    /// If the login call fails.
    #[instrument(skip(self, auth))]
    pub async fn sign_in(&mut self, auth: &auth::Client<'_>, credentials: &Credentials) -> Result<()> {
        match auth.login_with(credentials).await {
            Ok(_login) => {
                info!("signed in");
                self.mark_authenticated();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "sign in failed");
                Err(e)
            }
        }
    }

    pub(crate) fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }

    pub fn sign_out(&mut self) {
        self.authenticated = false;
    }

    /// Where to send the user instead of a protected view, if anywhere.
    pub fn redirect(&self) -> Option<Route> {
        if self.authenticated {
            None
        } else {
            Some(Route::Login)
        }
    }
}

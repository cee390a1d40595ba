//! The user list's state machine.
//!
//! A [`Controller`] owns the current page of users, the pagination state and
//! at most one edit [`Draft`]. Every action issues a single request through a
//! [`UserService`] and reconciles the result into the in-memory list. Failures
//! never escape: they are logged and turned into an [`ActionFailed`] that
//! stays visible until the next action overwrites it.
//!
//! All mutating operations take `&mut self`, so requests issued through one
//! controller never overlap.
//!
//! # Examples
//! ```no_run
//! use user_roster::{
//!     auth::Credentials, controller::Controller, session::Session, Client, Error,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!     let mut session = Session::new();
//!     session
//!         .sign_in(
//!             &client.auth(),
//!             &Credentials::new("eve.holt@reqres.in", "cityslicka"),
//!         )
//!         .await?;
//!
//!     let mut users = Controller::new(client);
//!     users.enter(&session).await;
//!     users.next_page().await;
//!
//!     let first = users.users()[0].id;
//!     users.begin_edit(first);
//!     if let Some(draft) = users.draft_mut() {
//!         draft.first_name = "Jane".to_string();
//!     }
//!     users.submit_edit().await;
//!
//!     // Confirm every deletion.
//!     users.delete(first, &mut |_: &str| true).await;
//!     Ok(())
//! }
//! ```
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    error::Result,
    routes::Route,
    session::Session,
    users::{User, UserId, UserPage, UserPatch, UserUpdate},
    Client,
};


/// The remote operations the controller needs.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list(&self, page: u32) -> Result<UserPage>;
    async fn update(&self, id: UserId, update: &UserUpdate) -> Result<UserPatch>;
    async fn delete(&self, id: UserId) -> Result<()>;
}

#[async_trait]
impl UserService for Client {
    async fn list(&self, page: u32) -> Result<UserPage> {
        self.users().list(page).await
    }

    async fn update(&self, id: UserId, update: &UserUpdate) -> Result<UserPatch> {
        self.users().update(id, update).await
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        self.users().delete(id).await
    }
}

/// Asks the person at the screen whether a destructive action should go
/// ahead.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, prompt: &str) -> bool;
}

#[async_trait]
impl<F> Confirm for F
where
    F: FnMut(&str) -> bool + Send,
{
    async fn confirm(&mut self, prompt: &str) -> bool {
        (*self)(prompt)
    }
}

/// The action an [`ActionFailed`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fetch => f.write_str("fetch users"),
            Action::Update => f.write_str("update user"),
            Action::Delete => f.write_str("delete user"),
        }
    }
}

/// The only error the list ever shows. The message is fixed per action and
/// never reveals the underlying cause.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Failed to {action}")]
pub struct ActionFailed {
    action: Action,
}

impl ActionFailed {
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

/// Unsaved edits for a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Draft {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    fn to_update(&self) -> UserUpdate {
        UserUpdate::new(&self.first_name, &self.last_name, &self.email)
    }
}

impl From<&User> for Draft {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Result of entering the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// The session isn't authenticated; nothing was fetched.
    Redirect(Route),
    Shown,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// The user isn't on the current page; nothing was asked or sent.
    NotListed,
    /// Confirmation was declined; nothing was sent.
    Declined,
    Deleted,
    Failed,
}

/// Paginated list of users with inline editing.
#[derive(Debug)]
pub struct Controller<S> {
    service: S,
    users: Vec<User>,
    page: u32,
    total_pages: u32,
    loading: bool,
    error: Option<ActionFailed>,
    draft: Option<Draft>,
}

impl<S: UserService> Controller<S> {
    /// A controller on page 1 with nothing loaded yet.
    pub fn new(service: S) -> Self {
        Self {
            service,
            users: Vec::new(),
            page: 1,
            total_pages: 1,
            loading: false,
            error: None,
            draft: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Users on the current page, in server order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// True while a page fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ActionFailed> {
        self.error.as_ref()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.draft.as_mut()
    }

    pub fn is_editing(&self, id: UserId) -> bool {
        self.draft.as_ref().map_or(false, |d| d.user_id == id)
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Mounts the list. Unauthenticated sessions are redirected without any
    /// request being made.
    pub async fn enter(&mut self, session: &Session) -> Entry {
        if let Some(route) = session.redirect() {
            debug!(%route, "not authenticated, redirecting");
            return Entry::Redirect(route);
        }
        self.load_page(self.page).await;
        Entry::Shown
    }

    /// Fetches the given page, clamped to the known page range. On success
    /// the page, the list and the page count are replaced and the error is
    /// cleared. On failure everything shown before stays as it was. If the
    /// fetch is dropped midway nothing changes either.
    #[instrument(skip(self))]
    pub async fn load_page(&mut self, page: u32) {
        let page = self.clamp_page(page);
        let loading = Loading::start(&mut self.loading);
        let res = self.service.list(page).await;
        drop(loading);

        match res {
            Ok(res) => {
                debug!(page, users = res.data.len(), "page loaded");
                self.page = page;
                self.users = res.data;
                self.total_pages = res.total_pages.max(1);
                self.error = None;
            }
            Err(e) => {
                warn!(page, error = %e, "failed to load page");
                self.error = Some(ActionFailed::new(Action::Fetch));
            }
        }
    }

    /// Refetches the current page.
    pub async fn reload(&mut self) {
        self.load_page(self.page).await;
    }

    /// Moves to `page`, clamped to `[1, total_pages]`. Nothing is fetched if
    /// that is the page already shown.
    pub async fn go_to(&mut self, page: u32) -> bool {
        let page = self.clamp_page(page);
        if page == self.page {
            return false;
        }
        self.load_page(page).await;
        true
    }

    pub async fn next_page(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1)).await
    }

    pub async fn previous_page(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1)).await
    }

    /// Starts editing the given user, seeded with its current values. Any
    /// other draft is dropped. Returns false if the user isn't listed.
    pub fn begin_edit(&mut self, id: UserId) -> bool {
        match self.users.iter().find(|u| u.id == id) {
            Some(user) => {
                if let Some(old) = self.draft.replace(Draft::from(user)) {
                    if old.user_id != id {
                        debug!(user = old.user_id, "discarding draft");
                    }
                }
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Sends the draft. On success the returned fields are merged into the
    /// listed user and editing ends. On failure the draft is kept as is.
    #[instrument(skip(self))]
    pub async fn submit_edit(&mut self) {
        let Some(draft) = self.draft.as_ref() else {
            return;
        };
        let id = draft.user_id;
        let update = draft.to_update();

        match self.service.update(id, &update).await {
            Ok(patch) => {
                if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
                    user.merge(patch);
                }
                debug!(user = id, "user updated");
                self.draft = None;
                self.error = None;
            }
            Err(e) => {
                warn!(user = id, error = %e, "failed to update user");
                self.error = Some(ActionFailed::new(Action::Update));
            }
        }
    }

    /// Deletes a listed user once `confirm` agrees. The user is only removed
    /// locally after the service accepted the delete. Removing the last user
    /// of a page other than the first steps back one page and reloads it.
    #[instrument(skip(self, confirm))]
    pub async fn delete<C>(&mut self, id: UserId, confirm: &mut C) -> Deletion
    where
        C: Confirm + ?Sized,
    {
        let Some(user) = self.users.iter().find(|u| u.id == id) else {
            return Deletion::NotListed;
        };
        let prompt = format!("Are you sure you want to delete {}?", user.full_name());
        if !confirm.confirm(&prompt).await {
            debug!(user = id, "delete declined");
            return Deletion::Declined;
        }

        match self.service.delete(id).await {
            Ok(()) => {
                debug!(user = id, "user deleted");
                self.users.retain(|u| u.id != id);
                if self.is_editing(id) {
                    self.draft = None;
                }
                self.error = None;
                if self.users.is_empty() && self.page > 1 {
                    // The step back sticks even if the reload fails.
                    self.page -= 1;
                    self.load_page(self.page).await;
                }
                Deletion::Deleted
            }
            Err(e) => {
                warn!(user = id, error = %e, "failed to delete user");
                self.error = Some(ActionFailed::new(Action::Delete));
                Deletion::Failed
            }
        }
    }

    /// The page a request for `page` ends up on: `[1, total_pages]`.
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }
}

/// Holds the loading flag up for as long as it lives.
struct Loading<'a>(&'a mut bool);

impl<'a> Loading<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

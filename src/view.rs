//! Text rendering of the user list.
//!
//! [`cards`] and [`Pagination`] derive what a screen shows from a
//! [`Controller`]; [`render`] turns that into the text the `roster` binary
//! prints.
use std::fmt::{self, Write};

use crate::{
    controller::{Controller, Draft, UserService},
    users::User,
};

/// Shown in place of the list while a page fetch is in flight.
pub const LOADING: &str = "Loading...";

/// One entry of the user grid.
#[derive(Debug, PartialEq)]
pub enum Card<'a> {
    Display(&'a User),
    /// The user currently being edited, shown as a form.
    Editing(&'a User, &'a Draft),
}

/// The cards for the current page, in list order.
pub fn cards<S: UserService>(controller: &Controller<S>) -> Vec<Card<'_>> {
    controller
        .users()
        .iter()
        .map(|user| match controller.draft() {
            Some(draft) if draft.user_id() == user.id => Card::Editing(user, draft),
            _ => Card::Display(user),
        })
        .collect()
}

/// Pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl Pagination {
    pub fn of<S: UserService>(controller: &Controller<S>) -> Self {
        Self {
            page: controller.page(),
            total_pages: controller.total_pages(),
            previous_enabled: controller.can_go_previous(),
            next_enabled: controller.can_go_next(),
        }
    }
}

// Disabled controls are wrapped in parentheses.
impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let previous = if self.previous_enabled {
            "[p] Previous"
        } else {
            "(Previous)"
        };
        let next = if self.next_enabled {
            "[n] Next"
        } else {
            "(Next)"
        };
        write!(
            f,
            "{previous}  Page {} of {}  {next}",
            self.page, self.total_pages
        )
    }
}

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Display(user) => {
                writeln!(f, "#{} {}", user.id, user.full_name())?;
                writeln!(f, "    {}", user.email)?;
                writeln!(f, "    avatar: {}", user.avatar)?;
                write!(f, "    [e {id}] Edit  [d {id}] Delete", id = user.id)
            }
            Card::Editing(user, draft) => {
                writeln!(f, "#{} editing", user.id)?;
                writeln!(f, "    First Name: {}", draft.first_name)?;
                writeln!(f, "    Last Name:  {}", draft.last_name)?;
                writeln!(f, "    Email:      {}", draft.email)?;
                write!(f, "    [s] Save  [c] Cancel")
            }
        }
    }
}

/// Renders the whole list screen. While a page fetch is in flight only the
/// loading line is shown.
pub fn render<S: UserService>(controller: &Controller<S>) -> String {
    if controller.is_loading() {
        return LOADING.to_string();
    }

    let mut out = String::from("Users List\n");
    if let Some(error) = controller.error() {
        // Writing into a String can't fail.
        let _ = writeln!(out, "! {error}");
    }
    for card in cards(controller) {
        let _ = writeln!(out, "{card}");
    }
    let _ = write!(out, "{}", Pagination::of(controller));
    out
}

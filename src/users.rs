//! List, update and delete users.
//!
//! You're probably looking for the [`Client`].
//!
//! # Examples
//! ```no_run
//! use user_roster::{Client, Error, users::UserUpdate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!
//!     let page = client.users().list(2).await?;
//!     println!("page {} of {}", page.page, page.total_pages);
//!
//!     let patch = client
//!         .users()
//!         .update(7, &UserUpdate::new("Michael", "Lawson", "michael.lawson@reqres.in"))
//!         .await?;
//!     println!("{patch:?}");
//!
//!     client.users().delete(7).await?;
//!
//!     Ok(())
//! }
//! ```
mod client;
mod model;
#[cfg(test)]
mod tests;

pub use client::Client;
pub use model::*;

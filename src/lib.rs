//! A client and list controller for a paginated remote user service.
//!
//! The [`Client`] talks to the service. A [`session::Session`] gates access
//! to the user list, and a [`controller::Controller`] keeps one page of users
//! in memory while it is browsed, edited and pruned. [`view`] renders that
//! state as text.
//!
//! # Examples
//! ```no_run
//! use user_roster::{
//!     auth::Credentials, controller::Controller, session::Session, view, Client, Error,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new()?;
//!
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
//!     println!("{}", view::render(&users));
//!
//!     Ok(())
//! }
//! ```
pub mod client;
pub mod error;
mod http;
mod serde;

pub mod auth;
pub mod controller;
pub mod routes;
pub mod session;
pub mod users;
pub mod view;

pub use client::Client;
pub use error::Error;

#[cfg(all(feature = "default-tls", feature = "native-tls"))]
compile_error!("Feature \"default-tls\" and \"native-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "native-tls", feature = "rustls-tls"))]
compile_error!("Feature \"native-tls\" and \"rustls-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "rustls-tls", feature = "default-tls"))]
compile_error!("Feature \"rustls-tls\" and \"default-tls\" cannot be enabled at the same time");

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

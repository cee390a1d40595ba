//! Log in against the user service.
mod client;
mod model;

pub use client::Client;
pub use model::*;

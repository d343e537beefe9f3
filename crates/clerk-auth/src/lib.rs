//! Clerk identity client.
//!
//! [`ClerkAuth`] owns the lazily loaded [`ClerkClient`]: construction parses
//! the publishable key, [`ClerkAuth::initialize`] runs the load step once,
//! and [`ClerkAuth::get_user`] looks a user up by id.

mod auth;
mod client;
mod error;
mod key;
mod user;

pub use auth::ClerkAuth;
pub use client::{ClerkClient, ClerkSettings};
pub use error::{AuthError, AuthResult};
pub use key::{Instance, PublishableKey};
pub use user::{ClerkUser, EmailAddress};

//! CLI command implementations.

mod actions;
mod auth;
mod users;

pub use actions::{actions_list, actions_unvote, actions_upvote, actions_upvotes};
pub use auth::auth_user;
pub use users::{users_get, users_rename, users_upsert};

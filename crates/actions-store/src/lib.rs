//! Data access for the actions-with-upvotes feature.
//!
//! [`ActionsStore`] talks to a Supabase project's PostgREST endpoint
//! (`/rest/v1`) with the project's anonymous key. Upvote counts are never
//! stored locally: every read asks the server for the related-row count and
//! flattens it into [`Action::upvotes`](upvotes_types::Action).

mod client;
mod error;
mod rows;

pub use client::ActionsStore;
pub use error::{DataError, DataResult};
pub use rows::{flatten_count, CountAggregate};
pub use upvotes_types::{Action, Step, User, UserName};

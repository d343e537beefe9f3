//! User row commands.

use crate::app::AppClients;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use upvotes_types::User;

fn print_user(user: &User, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            output::print_row("ID", &user.id);
            output::print_row("Name", &user.name);
            Ok(())
        }
        OutputFormat::Json => output::print_json(user),
    }
}

/// Create a user or replace its name.
pub async fn users_upsert(
    clients: &AppClients,
    id: &str,
    name: &str,
    format: &OutputFormat,
) -> Result<()> {
    let user = clients.store.create_or_update_user(id, name).await?;
    print_user(&user, format)
}

/// Show a user's name.
pub async fn users_get(clients: &AppClients, id: &str, format: &OutputFormat) -> Result<()> {
    let user = clients.store.get_user(id).await?;

    match (format, user) {
        (OutputFormat::Text, Some(user)) => println!("{}", user.name),
        (OutputFormat::Text, None) => println!("User {} not found", id),
        (OutputFormat::Json, user) => output::print_json(&user)?,
    }
    Ok(())
}

/// Rename an existing user.
pub async fn users_rename(
    clients: &AppClients,
    id: &str,
    name: &str,
    format: &OutputFormat,
) -> Result<()> {
    let user = clients.store.update_user_name(id, name).await?;
    print_user(&user, format)
}

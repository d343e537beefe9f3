//! Identity provider commands.

use crate::app::AppClients;
use crate::output::{self, OutputFormat};
use anyhow::Result;

/// Load Clerk, then look a user up by id.
pub async fn auth_user(clients: &AppClients, id: &str, format: &OutputFormat) -> Result<()> {
    clients.auth.initialize().await?;
    let user = clients.auth.get_user(id).await?;

    match (format, user) {
        (OutputFormat::Text, Some(user)) => {
            output::print_row("ID", &user.id);
            output::print_row("Name", &user.display_name());
            if let Some(email) = user.primary_email() {
                output::print_row("Email", email);
            }
        }
        (OutputFormat::Text, None) => println!("User {} not found", id),
        (OutputFormat::Json, user) => output::print_json(&user)?,
    }
    Ok(())
}

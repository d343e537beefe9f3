//! Action and upvote commands.

use crate::app::AppClients;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use upvotes_types::Action;

fn print_action_count(action: &Action, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let id = action.id.map(|id| id.to_string()).unwrap_or_default();
            println!("Action {} \"{}\" has {} upvotes", id, action.title, action.upvotes);
            Ok(())
        }
        OutputFormat::Json => output::print_json(action),
    }
}

/// List every action with its upvote count.
pub async fn actions_list(clients: &AppClients, format: &OutputFormat) -> Result<()> {
    let actions = clients.store.fetch_actions().await?;

    match format {
        OutputFormat::Text => {
            if actions.is_empty() {
                println!("No actions found");
                return Ok(());
            }
            println!("{:<8} {:<8} {:<40} {}", "ID", "Upvotes", "Title", "Author");
            println!("{}", "-".repeat(80));
            for action in &actions {
                let id = action.id.map(|id| id.to_string()).unwrap_or_default();
                let author = action.author_name.as_deref().unwrap_or(&action.user_id);
                println!(
                    "{:<8} {:<8} {:<40} {}",
                    id, action.upvotes, action.title, author
                );
            }
            Ok(())
        }
        OutputFormat::Json => output::print_json(&actions),
    }
}

/// List the action ids a user has upvoted.
pub async fn actions_upvotes(
    clients: &AppClients,
    user_id: &str,
    format: &OutputFormat,
) -> Result<()> {
    let action_ids = clients.store.fetch_user_upvotes(user_id).await?;

    match format {
        OutputFormat::Text => {
            if action_ids.is_empty() {
                println!("No upvotes for {}", user_id);
            }
            for id in action_ids {
                println!("{}", id);
            }
            Ok(())
        }
        OutputFormat::Json => output::print_json(&action_ids),
    }
}

/// Upvote an action and print its new count.
pub async fn actions_upvote(
    clients: &AppClients,
    action_id: i64,
    user_id: &str,
    format: &OutputFormat,
) -> Result<()> {
    let action = clients.store.upvote_action(action_id, user_id).await?;
    print_action_count(&action, format)
}

/// Remove an upvote and print the action's new count.
pub async fn actions_unvote(
    clients: &AppClients,
    action_id: i64,
    user_id: &str,
    format: &OutputFormat,
) -> Result<()> {
    let action = clients.store.remove_upvote(action_id, user_id).await?;
    print_action_count(&action, format)
}

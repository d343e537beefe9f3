//! `upvotes` - command-line access to actions, upvotes and users.

mod app;
mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use upvotes_config::{init_logging, Config, EnvSource, Paths, ProcessEnv};

use crate::app::AppClients;
use crate::output::OutputFormat;

/// Read and update actions, upvotes and users.
#[derive(Parser)]
#[command(name = "upvotes")]
#[command(about = "Actions-with-upvotes data access from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Base directory for config and logs. Defaults to ~/.upvotes
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Actions and their upvotes
    Actions {
        #[command(subcommand)]
        command: ActionCommands,
    },

    /// User rows in the database
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Identity provider lookups
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Subcommand)]
enum ActionCommands {
    /// List every action with its upvote count
    List,
    /// List the ids of actions a user has upvoted
    Upvotes {
        /// User ID
        user_id: String,
    },
    /// Upvote an action
    Upvote {
        /// Action ID
        action_id: i64,
        /// User ID
        user_id: String,
    },
    /// Remove an upvote
    Unvote {
        /// Action ID
        action_id: i64,
        /// User ID
        user_id: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a user or replace its name
    Upsert {
        /// User ID
        id: String,
        /// Display name
        name: String,
    },
    /// Show a user's name
    Get {
        /// User ID
        id: String,
    },
    /// Rename an existing user
    Rename {
        /// User ID
        id: String,
        /// New display name
        name: String,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Look up a user profile by id
    User {
        /// User ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let format = cli.format;

    if let Err(err) = run(cli, &ProcessEnv).await {
        output::print_error(&format!("{err:#}"), &format);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, env: &dyn EnvSource) -> anyhow::Result<()> {
    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let config = Config::load(&paths, env)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(&paths, level);

    let clients = AppClients::from_config(&config)?;
    let format = cli.format;

    match cli.command {
        Commands::Actions { command } => match command {
            ActionCommands::List => commands::actions_list(&clients, &format).await,
            ActionCommands::Upvotes { user_id } => {
                commands::actions_upvotes(&clients, &user_id, &format).await
            }
            ActionCommands::Upvote { action_id, user_id } => {
                commands::actions_upvote(&clients, action_id, &user_id, &format).await
            }
            ActionCommands::Unvote { action_id, user_id } => {
                commands::actions_unvote(&clients, action_id, &user_id, &format).await
            }
        },
        Commands::Users { command } => match command {
            UserCommands::Upsert { id, name } => {
                commands::users_upsert(&clients, &id, &name, &format).await
            }
            UserCommands::Get { id } => commands::users_get(&clients, &id, &format).await,
            UserCommands::Rename { id, name } => {
                commands::users_rename(&clients, &id, &name, &format).await
            }
        },
        Commands::Auth { command } => match command {
            AuthCommands::User { id } => commands::auth_user(&clients, &id, &format).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_upvote_command() {
        let cli = Cli::try_parse_from(["upvotes", "actions", "upvote", "5", "user_1"]).unwrap();
        match cli.command {
            Commands::Actions {
                command: ActionCommands::Upvote { action_id, user_id },
            } => {
                assert_eq!(action_id, 5);
                assert_eq!(user_id, "user_1");
            }
            _ => panic!("expected actions upvote"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "upvotes",
            "users",
            "rename",
            "u1",
            "Grace",
            "--format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[tokio::test]
    async fn startup_config_errors_are_returned_to_main() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["upvotes", "--base-dir", base, "actions", "list"]).unwrap();

        let err = run(cli, &HashMap::<String, String>::new())
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("CLERK_PUBLISHABLE_KEY"));
    }

    #[test]
    fn rejects_non_numeric_action_id() {
        assert!(Cli::try_parse_from(["upvotes", "actions", "unvote", "abc", "u1"]).is_err());
    }
}

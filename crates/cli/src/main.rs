//! Wayfarer CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! wf-cli migrate
//!
//! # Create a back-office user
//! wf-cli user create -e staff@example.com -n "Staff Name" -r editor -p '...'
//!
//! # Close the site to anonymous visitors, then reopen it
//! wf-cli site deactivate
//! wf-cli site activate
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wf-cli")]
#[command(author, version, about = "Wayfarer CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage back-office users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Open or close the site to anonymous visitors
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new back-office user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`admin`, `editor`)
        #[arg(short, long, default_value = "editor")]
        role: String,

        /// Password (at least 8 characters)
        #[arg(short, long, env = "WAYFARER_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum SiteAction {
    /// Open the site to everyone
    Activate,
    /// Show the maintenance page to anonymous visitors
    Deactivate,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                role,
                password,
            } => {
                commands::user::create(&email, &name, &role, &password).await?;
            }
        },
        Commands::Site { action } => match action {
            SiteAction::Activate => commands::site::set_active(true).await?,
            SiteAction::Deactivate => commands::site::set_active(false).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn user_create_defaults_to_editor() {
        let cli = Cli::try_parse_from([
            "wf-cli", "user", "create", "-e", "a@b.co", "-n", "Ana", "-p", "longpassword",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::User {
            action: UserAction::Create { role, .. },
        } = cli.command
        else {
            panic!("expected user create");
        };
        assert_eq!(role, "editor");
    }
}

//! OpenCall CLI - schema and admin management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the users and admins tables
//! opencall-cli migrate
//!
//! # Add an admin (default permissions: manageUsers&manageEvents)
//! opencall-cli admin grant -e admin@example.com
//!
//! # Print an admin's raw permission string
//! opencall-cli admin show -e admin@example.com
//!
//! # List registered volunteers
//! opencall-cli users list
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "opencall-cli")]
#[command(author, version, about = "OpenCall operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database tables if they do not exist
    Migrate,
    /// Manage the admin allowlist
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Inspect registered volunteers
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add an admin row unless one already exists for the email
    Grant {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// `&`-separated permission string
        #[arg(short, long, default_value = opencall_core::Permissions::DEFAULT)]
        permissions: String,
    },
    /// Print the stored permission string for an admin
    Show {
        /// Admin email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List every registered volunteer
    List,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pool = commands::connect().await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&pool).await?,
        Commands::Admin { action } => match action {
            AdminAction::Grant { email, permissions } => {
                commands::admin::grant(&pool, &email, permissions).await?;
            }
            AdminAction::Show { email } => commands::admin::show(&pool, &email).await?,
        },
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list(&pool).await?,
        },
    }
    Ok(())
}

//! BitnBolt admin CLI - the dashboard's backend operations from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (token is kept in $BNB_TOKEN_FILE or ~/.config/bnb/token)
//! bnb login -e ops@bitnbolt.in
//!
//! # Vendors awaiting approval
//! bnb vendors list --status pending
//!
//! # Suspend a vendor (a reason is required)
//! bnb vendors suspend 64f0c2 --reason "Repeated late shipments"
//!
//! # Create an admin (super admins only)
//! bnb admins create -e anita@bitnbolt.in -n "Anita Rao" -p manage_vendors
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_BACKEND_URL` - Marketplace backend base URL (or `--backend-url`)
//! - `BNB_TOKEN_FILE` - Where the admin token is stored
//! - `BNB_PASSWORD` - Password for `login`, instead of `--password`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bitnbolt_core::{PasswordReset, VendorAction};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod token_store;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "bnb")]
#[command(author, version, about = "BitnBolt admin CLI")]
struct Cli {
    /// Marketplace backend base URL
    #[arg(long, env = "ADMIN_BACKEND_URL", global = true)]
    backend_url: Option<String>,

    /// File holding the admin token between commands
    #[arg(long, env = "BNB_TOKEN_FILE", global = true)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the admin token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "BNB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in admin
    Whoami,
    /// Review and moderate vendors
    Vendors {
        #[command(subcommand)]
        action: VendorsCommand,
    },
    /// Manage admin accounts
    Admins {
        #[command(subcommand)]
        action: AdminsCommand,
    },
    /// Password recovery
    Password {
        #[command(subcommand)]
        action: PasswordCommand,
    },
}

#[derive(Subcommand)]
enum VendorsCommand {
    /// List vendors
    List {
        /// `all`, `approved`, `pending` or `suspended`
        #[arg(short, long, default_value = "all")]
        status: String,

        /// Search by name, shop or email
        #[arg(short = 'q', long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },
    /// Approve a pending vendor
    Approve {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Reject a pending vendor
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Suspend an active vendor
    Suspend {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Reactivate a suspended vendor
    Activate {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
enum AdminsCommand {
    /// List admin accounts
    List,
    /// Create an admin account
    Create {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        name: String,

        /// `super_admin` or `admin`
        #[arg(short, long, default_value = "admin")]
        role: String,

        /// Permission tag, repeatable (e.g. `manage_vendors`)
        #[arg(short, long = "permission")]
        permissions: Vec<String>,
    },
    /// Delete an admin account
    Delete { id: String },
}

#[derive(Subcommand)]
enum PasswordCommand {
    /// Email a reset link
    Forgot {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password with the emailed token
    Reset {
        #[arg(long)]
        token: String,

        #[arg(long, env = "BNB_NEW_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long, env = "BNB_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "bnb=info".into()),
        )
        .with_target(false)
        .without_time()
        .init();

    // reqwest's rustls backend needs a process-wide provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let token_file = cli
        .token_file
        .unwrap_or_else(token_store::default_token_path);
    let ctx = Context::new(cli.backend_url.as_deref(), token_file)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&ctx, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Vendors { action } => run_vendors(&ctx, action).await?,
        Commands::Admins { action } => match action {
            AdminsCommand::List => commands::admins::list(&ctx).await?,
            AdminsCommand::Create {
                email,
                name,
                role,
                permissions,
            } => {
                let new_admin = commands::admins::new_admin(&name, &email, &role, &permissions)?;
                commands::admins::create(&ctx, new_admin).await?;
            }
            AdminsCommand::Delete { id } => commands::admins::delete(&ctx, id).await?,
        },
        Commands::Password { action } => match action {
            PasswordCommand::Forgot { email } => commands::password::forgot(&ctx, &email).await?,
            PasswordCommand::Reset {
                token,
                password,
                confirm,
            } => {
                let reset = PasswordReset {
                    token,
                    password,
                    confirm_password: confirm,
                };
                commands::password::reset(&ctx, reset).await?;
            }
        },
    }
    Ok(())
}

async fn run_vendors(ctx: &Context, command: VendorsCommand) -> Result<(), CliError> {
    let (id, action, reason) = match command {
        VendorsCommand::List {
            status,
            search,
            page,
            limit,
        } => {
            let query = commands::vendors::list_query(&status, search.as_deref(), page, limit)
                .map_err(CliError::InvalidArgument)?;
            return commands::vendors::list(ctx, &query).await;
        }
        VendorsCommand::Approve { id, reason } => (id, VendorAction::Approve, reason),
        VendorsCommand::Reject { id, reason } => (id, VendorAction::Reject, reason),
        VendorsCommand::Suspend { id, reason } => (id, VendorAction::Suspend, reason),
        VendorsCommand::Activate { id, reason } => (id, VendorAction::Activate, reason),
    };
    commands::vendors::act(ctx, id, action, reason.as_deref()).await
}

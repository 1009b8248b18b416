//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use vault_core::config::AppConfig;
use vault_core::error::AppError;
use vault_database::Stores;
use vault_entity::user::User;
use vault_service::{AccountService, Registration};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create an account
    Create {
        /// Email address
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Password. Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Show an account by email
    Show {
        /// Email address
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    active: bool,
    date_joined: String,
}

impl From<User> for UserRow {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email,
            name: u.name,
            active: u.is_active,
            date_joined: u.date_joined.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let stores = Stores::postgres(db.pool());

    match &args.command {
        UserCommand::Create { email, name, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let accounts = AccountService::new(stores.users, &config.auth);
            let session = accounts
                .register(Registration {
                    email: email.clone(),
                    name: name.clone(),
                    password: password.clone(),
                    password_confirm: password,
                })
                .await?;

            output::print_success(&format!("User '{}' created", session.user.email));
            output::print_list(&[UserRow::from(session.user)], format);
        }
        UserCommand::Show { email } => {
            let user = stores
                .users
                .find_by_email(&email.trim().to_lowercase())
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;
            output::print_list(&[UserRow::from(user)], format);
        }
    }

    db.close().await;
    Ok(())
}

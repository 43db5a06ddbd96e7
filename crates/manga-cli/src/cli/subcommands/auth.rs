use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with username and password.
    Login(AuthLoginArgs),
    /// Create an account.
    Register(AuthRegisterArgs),
    /// Clear the stored session.
    Logout,
    /// Verify the stored token and show the session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Password confirmation (defaults to --password).
    #[arg(long)]
    pub confirm_password: Option<String>,
}

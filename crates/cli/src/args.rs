//! Command-line arguments

use std::path::PathBuf;

use adminhub_domain::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adminhub")]
#[command(author = "AdminHub Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the AdminHub backend")]
pub struct CliArgs {
    /// Config file (JSON or TOML). Without it, ADMINHUB_* variables are used,
    /// then config.{json,toml} / adminhub.{json,toml} are probed.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the returned credentials
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "ADMINHUB_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        remember_me: bool,
    },

    /// Sign out and drop stored credentials
    Logout,

    /// Show the stored session
    Status,

    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users page by page
    List(ListArgs),

    /// Show one user
    Get { id: String },

    /// Show a user's profile
    Profile { id: String },

    /// Delete a user
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    #[arg(long)]
    pub search: Option<String>,
}

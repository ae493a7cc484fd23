//! AdminHub CLI
//!
//! Thin front end over the authenticated API client. Results are printed as
//! pretty JSON on stdout; logs go to stderr.

mod args;

use std::process::ExitCode;
use std::sync::Arc;

use adminhub_core::{CredentialVault, SessionStore};
use adminhub_domain::{LoginRequest, QueryParams};
use adminhub_infra::{config, init_tracing, open_credential_store, ApiClient, AuthApi, UserApi};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::args::{CliArgs, Command, UsersCommand};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let config = match args.config {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    init_tracing(&config.logging)?;

    let store = open_credential_store(&config.storage).context("failed to open credentials")?;
    let session = Arc::new(SessionStore::restore(&CredentialVault::new(store.clone())));
    let client = Arc::new(
        ApiClient::builder()
            .config(config.api)
            .store(store)
            .session(session.clone())
            .build()
            .context("failed to build API client")?,
    );

    match args.command {
        Command::Login { email, password, remember_me } => {
            let auth = AuthApi::new(client);
            session.set_loading(true);
            let request = LoginRequest { email, password, remember_me: remember_me.then_some(true) };
            match auth.login(&request).await {
                Ok(response) => print_json(&response.user),
                Err(err) => {
                    session.set_error(err.to_string());
                    Err(err).context("login failed")
                }
            }
        }
        Command::Logout => {
            AuthApi::new(client).logout().await;
            print_json(&session.snapshot())
        }
        Command::Status => print_json(&session.snapshot()),
        Command::Users(command) => run_users(UserApi::new(client), command).await,
    }
}

async fn run_users(users: UserApi, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List(list) => {
            let params = QueryParams {
                page: Some(list.page),
                page_size: Some(list.page_size),
                search: list.search,
            };
            print_json(&users.list(&params).await?)
        }
        UsersCommand::Get { id } => print_json(&users.get(&id).await?),
        UsersCommand::Profile { id } => print_json(&users.profile(&id).await?),
        UsersCommand::Delete { id } => {
            users.delete(&id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

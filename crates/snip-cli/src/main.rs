//! Snip CLI - offline-first code snippet manager.
//!
//! Every command works without connectivity; queued work is pushed to the
//! remote by `snip sync` or its watch mode.

mod app;
mod cli;
mod commands;
mod error;

use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;

use crate::app::App;
use crate::cli::{Cli, Commands, TagCommands};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let local = tokio::task::LocalSet::new();
    if let Err(error) = local.run_until(run()).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snip=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);
    let app = Rc::new(App::open(&data_dir, &cli.api_url)?);

    match cli.command {
        Commands::Add {
            title,
            content,
            language,
            description,
            tag,
        } => commands::snippets::run_add(&app, title, &content, language, description, tag).await?,
        Commands::List { json, offline } => {
            commands::snippets::run_list(&app, json, offline).await?;
        }
        Commands::Show { id } => commands::snippets::run_show(&app, id).await?,
        Commands::Delete { id } => commands::snippets::run_delete(&app, id).await?,
        Commands::Status => commands::sync::run_status(&app),
        Commands::Tag { command } => match command {
            TagCommands::Add { name, hidden } => {
                commands::tags::run_add(&app, name, hidden).await?;
            }
            TagCommands::List { json, offline } => {
                commands::tags::run_list(&app, json, offline).await?;
            }
            TagCommands::Hide { id } => commands::tags::run_set_hidden(&app, id, true).await?,
            TagCommands::Unhide { id } => commands::tags::run_set_hidden(&app, id, false).await?,
            TagCommands::Delete { id } => commands::tags::run_delete(&app, id).await?,
        },
        Commands::Login {
            token,
            user_id,
            username,
        } => commands::auth::run_login(&app, token, user_id, username)?,
        Commands::Logout => commands::auth::run_logout(&app)?,
        Commands::Sync { watch } => commands::sync::run_sync(&app, watch).await?,
    }

    Ok(())
}

fn resolve_data_dir(cli_data_dir: Option<PathBuf>) -> PathBuf {
    cli_data_dir.unwrap_or_else(default_data_dir)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_data_dir_prefers_explicit_path() {
        let explicit = resolve_data_dir(Some(PathBuf::from("/tmp/custom")));
        assert_eq!(explicit, PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn default_data_dir_ends_with_app_name() {
        assert!(default_data_dir().ends_with("snip"));
    }
}

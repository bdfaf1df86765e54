pub mod commands;
pub mod config;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::config::ConsoleConfig;

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Admin console - menus, roles and permissions")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Server URL and token used by the other commands")]
    Profile {
        #[command(subcommand)]
        cmd: commands::profile::ProfileCommands,
    },

    #[command(about = "Menu records, navigation tree and parent picker")]
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCommands,
    },

    #[command(about = "Roles and role permissions")]
    Role {
        #[command(subcommand)]
        cmd: commands::role::RoleCommands,
    },

    #[command(about = "Current session and permission checks")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// API client from the process config, overridden by the saved profile
pub fn connect() -> anyhow::Result<Arc<ApiClient>> {
    let profile = config::load_profile()?;
    Ok(Arc::new(client_for(crate::config::config(), &profile)?))
}

/// Profile server and token win; timeout and request logging always come
/// from the process config.
pub fn client_for(
    settings: &ConsoleConfig,
    profile: &config::Profile,
) -> anyhow::Result<ApiClient> {
    let mut settings = settings.clone();
    if let Some(server) = &profile.server {
        settings.api.base_url = server.clone();
    }
    if profile.token.is_some() {
        settings.api.token = profile.token.clone();
    }
    Ok(ApiClient::from_config(&settings)?)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Profile { cmd } => commands::profile::handle(cmd, output_format).await,
        Commands::Menu { cmd } => commands::menu::handle(cmd, output_format).await,
        Commands::Role { cmd } => commands::role::handle(cmd, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
    }
}

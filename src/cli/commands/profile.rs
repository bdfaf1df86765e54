use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_profile, save_profile};
use crate::cli::utils::{output_data, output_success};
use crate::cli::{client_for, OutputFormat};

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show the saved server and token")]
    Show,

    #[command(about = "Set the admin API server URL")]
    SetServer {
        #[arg(help = "Server URL, e.g. http://localhost:3000")]
        url: String,
    },

    #[command(about = "Set (or clear, when omitted) the bearer token")]
    SetToken {
        #[arg(help = "Bearer token")]
        token: Option<String>,
    },
}

pub async fn handle(cmd: ProfileCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut profile = load_profile()?;

    match cmd {
        ProfileCommands::Show => {
            let server = client_for(crate::config::config(), &profile)?.base_url().to_string();
            let token = profile.masked_token();
            output_data(
                &output_format,
                &json!({ "server": server, "token": token, "updated_at": profile.updated_at }),
                &[
                    format!("Server: {}", server),
                    format!("Token: {}", token.as_deref().unwrap_or("(none)")),
                ],
            )
        }
        ProfileCommands::SetServer { url } => {
            url::Url::parse(url.trim())
                .map_err(|e| anyhow::anyhow!("invalid server URL '{}': {}", url, e))?;
            profile.set_server(url);
            save_profile(&profile)?;
            let data = json!({ "server": profile.server });
            output_success(&output_format, "Server updated", Some(data))
        }
        ProfileCommands::SetToken { token } => {
            let cleared = token.is_none();
            profile.set_token(token);
            save_profile(&profile)?;
            let message = if cleared { "Token cleared" } else { "Token updated" };
            output_success(&output_format, message, None)
        }
    }
}

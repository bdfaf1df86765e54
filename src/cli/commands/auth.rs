use clap::Subcommand;
use serde_json::json;

use crate::authz::{fetch_session, PermissionEngine, SessionStore};
use crate::cli::utils::output_data;
use crate::cli::{connect, OutputFormat};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Show the current user and granted permissions")]
    Whoami,

    #[command(about = "Check whether the current user holds any of the given permissions")]
    Check {
        #[arg(help = "Permission identifiers; none means unrestricted")]
        permissions: Vec<String>,
        #[arg(long, help = "Require every permission instead of any")]
        all: bool,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = connect()?;
    let user = fetch_session(client.as_ref()).await?;

    match cmd {
        AuthCommands::Whoami => {
            let mut lines = vec![format!(
                "{}{}",
                user.username,
                if user.is_admin { " (administrator)" } else { "" }
            )];
            lines.extend(user.permissions.iter().map(|p| format!("  {}", p)));
            output_data(&output_format, &user, &lines)
        }
        AuthCommands::Check { permissions, all } => {
            let session = SessionStore::new();
            session.login(user);
            let engine = PermissionEngine::new(session);

            let allowed = if all {
                engine.has_all_permissions(permissions.clone())
            } else {
                engine.has_permission(permissions.clone())
            };
            output_data(
                &output_format,
                &json!({ "permissions": permissions, "all": all, "allowed": allowed }),
                &[if allowed { "allowed".to_string() } else { "denied".to_string() }],
            )
        }
    }
}

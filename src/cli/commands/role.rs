use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_data, output_success, render_options};
use crate::cli::{connect, OutputFormat};
use crate::models::{Role, RoleId, RoleQuery};
use crate::services::RoleService;
use crate::types::Status;

#[derive(Subcommand)]
pub enum RoleCommands {
    #[command(about = "List roles (paginated)")]
    List {
        #[arg(long, help = "Matches role name or key")]
        keyword: Option<String>,
        #[arg(long, help = "Status: 0/normal or 1/disabled")]
        status: Option<Status>,
        #[arg(long, help = "Page number, from 1")]
        page: Option<u32>,
        #[arg(long, help = "Page size")]
        page_size: Option<u32>,
    },

    #[command(about = "Show one role with its permissions")]
    Get {
        #[arg(help = "Role ID")]
        id: RoleId,
    },

    #[command(about = "List permission keys granted to a role")]
    Perms {
        #[arg(help = "Role ID")]
        id: RoleId,
    },

    #[command(about = "Replace a role's permissions with exactly the given set")]
    Grant {
        #[arg(help = "Role ID")]
        id: RoleId,
        #[arg(help = "Permission IDs; none clears the role")]
        permissions: Vec<String>,
    },

    #[command(about = "Show the role's menu tree with checked menus")]
    MenuTree {
        #[arg(help = "Role ID")]
        id: RoleId,
    },

    #[command(about = "Delete one or more roles")]
    Delete {
        #[arg(required = true, help = "Role IDs")]
        ids: Vec<RoleId>,
    },
}

fn role_line(role: &Role) -> String {
    let status = match role.status {
        Status::Normal => "",
        Status::Disabled => " <disabled>",
    };
    format!("{} {} ({}) sort={}{}", role.id, role.name, role.key, role.sort, status)
}

pub async fn handle(cmd: RoleCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = RoleService::new(connect()?);

    match cmd {
        RoleCommands::List { keyword, status, page, page_size } => {
            let query = RoleQuery { keyword, status, page, page_size };
            let page = service.list(&query).await?;
            let mut lines: Vec<String> = page.items.iter().map(role_line).collect();
            lines.push(format!(
                "page {} of {} role(s), {} per page",
                page.page, page.total, page.page_size
            ));
            output_data(&output_format, &page, &lines)
        }
        RoleCommands::Get { id } => {
            let (role, permissions) =
                futures::try_join!(service.get(id), service.get_permissions(id))?;
            let mut lines = vec![role_line(&role)];
            lines.extend(permissions.iter().map(|p| format!("  {}", p)));
            let data = json!({ "role": role, "permissions": permissions });
            output_data(&output_format, &data, &lines)
        }
        RoleCommands::Perms { id } => {
            let permissions = service.get_permissions(id).await?;
            let lines: Vec<String> = permissions.iter().cloned().collect();
            output_data(&output_format, &permissions, &lines)
        }
        RoleCommands::Grant { id, permissions } => {
            service.save_permissions(id, permissions.iter().cloned()).await?;
            output_success(
                &output_format,
                &format!("Role {} now holds {} permission(s)", id, permissions.len()),
                Some(json!({ "permissionIds": permissions })),
            )
        }
        RoleCommands::MenuTree { id } => {
            let tree = service.menu_tree(id).await?;
            let lines: Vec<String> = render_options(&tree.menus)
                .into_iter()
                .zip(flatten_values(&tree.menus))
                .map(|(line, value)| {
                    let mark = if tree.is_checked(value) { "[x]" } else { "[ ]" };
                    format!("{} {}", mark, line)
                })
                .collect();
            output_data(&output_format, &tree, &lines)
        }
        RoleCommands::Delete { ids } => {
            if let [id] = ids.as_slice() {
                service.delete(*id).await?;
            } else {
                service.batch_delete(&ids).await?;
            }
            let message = format!("Deleted {} role(s)", ids.len());
            output_success(&output_format, &message, Some(json!({ "ids": ids })))
        }
    }
}

/// Option values in the same pre-order `render_options` prints them
fn flatten_values(forest: &[crate::tree::OptionNode<i64>]) -> Vec<i64> {
    let mut values = Vec::new();
    let mut stack: Vec<_> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        values.push(node.value);
        stack.extend(node.children.iter().rev());
    }
    values
}

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{menu_line, output_data, output_success, render_menu_tree, render_options};
use crate::cli::{connect, OutputFormat};
use crate::models::{MenuFilter, MenuId, MenuType};
use crate::services::MenuService;
use crate::tree::types::forest_size;
use crate::types::Status;

#[derive(Subcommand)]
pub enum MenuCommands {
    #[command(about = "List menu records")]
    List {
        #[arg(long, help = "Name substring")]
        name: Option<String>,
        #[arg(long, help = "Status: 0/normal or 1/disabled")]
        status: Option<Status>,
        #[arg(long = "type", help = "Menu type: M, C or F")]
        menu_type: Option<MenuType>,
    },

    #[command(about = "Show the menu navigation tree")]
    Tree {
        #[arg(long, help = "Name substring")]
        name: Option<String>,
        #[arg(long, help = "Status: 0/normal or 1/disabled")]
        status: Option<Status>,
    },

    #[command(about = "Show parent picker options")]
    Options {
        #[arg(long, help = "Menu being edited; it and its descendants are left out")]
        exclude: Option<MenuId>,
    },

    #[command(about = "Show one menu record")]
    Get {
        #[arg(help = "Menu ID")]
        id: MenuId,
    },

    #[command(about = "Delete one or more menus")]
    Delete {
        #[arg(required = true, help = "Menu IDs")]
        ids: Vec<MenuId>,
    },
}

pub async fn handle(cmd: MenuCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = MenuService::new(connect()?);

    match cmd {
        MenuCommands::List { name, status, menu_type } => {
            let filter = MenuFilter { menu_name: name, status, menu_type };
            let menus = service.list(&filter).await?;
            let lines: Vec<String> = if menus.is_empty() {
                vec!["No menus found".to_string()]
            } else {
                menus.iter().map(menu_line).collect()
            };
            output_data(&output_format, &menus, &lines)
        }
        MenuCommands::Tree { name, status } => {
            let filter = MenuFilter { menu_name: name, status, menu_type: None };
            let tree = service.tree(&filter).await?;
            let mut lines = render_menu_tree(&tree);
            lines.push(format!("{} menu(s)", forest_size(&tree)));
            output_data(&output_format, &tree, &lines)
        }
        MenuCommands::Options { exclude } => {
            let options = service.parent_options(exclude).await?;
            output_data(&output_format, &options, &render_options(&options))
        }
        MenuCommands::Get { id } => {
            let menu = service.get(id).await?;
            output_data(&output_format, &menu, &[menu_line(&menu)])
        }
        MenuCommands::Delete { ids } => {
            if let [id] = ids.as_slice() {
                service.delete(*id).await?;
            } else {
                service.batch_delete(&ids).await?;
            }
            let message = format!("Deleted {} menu(s)", ids.len());
            output_success(&output_format, &message, Some(json!({ "ids": ids })))
        }
    }
}

use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::models::Menu;
use crate::tree::{OptionNode, TreeNode};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// JSON: pretty print `data`. Text: print the pre-rendered lines.
pub fn output_data<T: Serialize>(
    output_format: &OutputFormat,
    data: &T,
    text: &[String],
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => {
            for line in text {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// One line per menu record
pub fn menu_line(menu: &Menu) -> String {
    let mut flags = Vec::new();
    if !menu.is_displayed() {
        flags.push("hidden");
    }
    if !menu.is_enabled() {
        flags.push("disabled");
    }

    let mut line = format!("[{}] {} {}", menu.menu_type.as_str(), menu.menu_id, menu.menu_name);
    if let Some(perms) = menu.permission_key() {
        line.push_str(&format!(" ({})", perms));
    }
    if !flags.is_empty() {
        line.push_str(&format!(" <{}>", flags.join(",")));
    }
    line
}

/// Indented rendering of a menu forest
pub fn render_menu_tree(forest: &[TreeNode<Menu>]) -> Vec<String> {
    let mut lines = Vec::new();
    for root in forest {
        root.walk(&mut |menu: &Menu, depth| {
            lines.push(format!("{}{}", "  ".repeat(depth), menu_line(menu)))
        });
    }
    lines
}

/// Indented rendering of picker options
pub fn render_options<Id: std::fmt::Display>(forest: &[OptionNode<Id>]) -> Vec<String> {
    fn walk<Id: std::fmt::Display>(node: &OptionNode<Id>, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{} {}", "  ".repeat(depth), node.value, node.label));
        for child in &node.children {
            walk(child, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    for node in forest {
        walk(node, 0, &mut lines);
    }
    lines
}

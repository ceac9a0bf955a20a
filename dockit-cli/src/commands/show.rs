//! Print a layout file as a tree.

use std::path::Path;

use dockit_core::layout::{Orientation, SerializedNode, WidgetConfig};

use crate::error::CliError;
use crate::util::load_layout;

/// Show command handler
pub fn cmd_show(file: &Path) -> Result<(), CliError> {
    let layout = load_layout(file)?;
    match &layout.main {
        None => println!("(empty layout)"),
        Some(root) => print_node(root, "", ""),
    }
    Ok(())
}

/// Prints one node. `lead` prefixes the node's own line, `descent` the
/// lines of everything below it.
fn print_node(node: &SerializedNode, lead: &str, descent: &str) {
    match node {
        SerializedNode::TabArea {
            widgets,
            current_index,
        } => {
            let noun = if widgets.len() == 1 { "widget" } else { "widgets" };
            println!("{lead}tabs ({} {noun})", widgets.len());
            for (index, config) in widgets.iter().enumerate() {
                let branch = if index + 1 == widgets.len() {
                    "└─ "
                } else {
                    "├─ "
                };
                let marker = if index == *current_index { "*" } else { " " };
                println!("{descent}{branch}{marker} {}", describe(config));
            }
        }
        SerializedNode::SplitArea {
            orientation,
            sizes,
            children,
        } => {
            let direction = match orientation {
                Orientation::Horizontal => "horizontal",
                Orientation::Vertical => "vertical",
            };
            println!("{lead}split {direction} {sizes:?}");
            for (index, child) in children.iter().enumerate() {
                let (branch, follow) = if index + 1 == children.len() {
                    ("└─ ", "   ")
                } else {
                    ("├─ ", "│  ")
                };
                print_node(
                    child,
                    &format!("{descent}{branch}"),
                    &format!("{descent}{follow}"),
                );
            }
        }
    }
}

fn describe(config: &WidgetConfig) -> String {
    let mut line = format!("{} [{}]", config.id, config.kind);
    if let Some(label) = config.label.as_deref().filter(|label| !label.is_empty()) {
        line.push_str(&format!(" {label:?}"));
    }
    if config.closable == Some(false) {
        line.push_str(" (pinned)");
    }
    line
}

//! Text output of the shell

use crate::ops::ListingEntry;
use crate::tree::{FileTree, HOME_ID};
use crate::types::NodeId;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub const EMPTY_LISTING: &str = "No items found in the directory";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Directory listing as table lines
pub fn listing(entries: &[ListingEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec![EMPTY_LISTING.to_string()];
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Type", "Last Modified", "Size", "Name"]);
    for entry in entries {
        table.add_row(vec![
            entry.kind.noun().to_string(),
            entry.last_modified.format(TIMESTAMP_FORMAT).to_string(),
            entry.size.to_string(),
            entry.name.clone(),
        ]);
    }
    table.to_string().lines().map(str::to_string).collect()
}

/// Two-column `command  description` block
pub fn command_table(commands: &[(&str, &str)]) -> Vec<String> {
    let mut lines = vec![
        format!("{:<35}{}", "Command", "Description"),
        format!("{:<35}{}", "-------", "-----------"),
    ];
    lines.extend(
        commands
            .iter()
            .map(|(cmd, desc)| format!("{:<35}{}", cmd, desc)),
    );
    lines
}

pub fn help() -> Vec<String> {
    command_table(&[
        ("ls", "List directory contents"),
        ("pwd", "Print working directory"),
        ("cd [directory]", "Change the current directory"),
        ("mkdir [directory]", "Create a new directory"),
        ("rmdir [directory]", "Remove an empty directory"),
        ("touch [file]", "Create a new file"),
        ("open [file]", "Display file or url content"),
        ("write [file] [text]", "Replace file content"),
        ("seturl [file] [url]", "Set and update URL content for a file"),
        ("rm [file]", "Remove a file or url"),
        ("mv [file/directory] [destination]", "Move a file or directory"),
        ("rename [old name] [new name]", "Rename a file or directory or url"),
        ("search [username]", "Search for a user portfolio"),
        ("signup [username] [password]", "Create a new user account"),
        ("signin [username] [password]", "Sign in to your account"),
        ("signout", "Sign out of your account"),
        ("userdel [username] [password]", "Delete your account"),
        ("portfolio", "View and edit your portfolio"),
        ("clear/cls", "Clear the terminal screen"),
        ("about", "Detailed explanation about the terminal"),
        ("help", "Display this help message"),
    ])
}

/// Indented hierarchy with sizes, home first
pub fn tree_lines(tree: &FileTree) -> Vec<String> {
    let mut lines = vec![format!("{} ({} B)", tree.home(), tree.total_size())];
    push_children(tree, HOME_ID, 1, &mut lines);
    lines
}

fn push_children(tree: &FileTree, dir: NodeId, depth: usize, lines: &mut Vec<String>) {
    for child in tree.children(dir) {
        let marker = if child.is_dir() { "/" } else { "" };
        lines.push(format!(
            "{}{}{} ({} B)",
            "  ".repeat(depth),
            child.name,
            marker,
            child.size
        ));
        if child.is_dir() {
            push_children(tree, child.id, depth + 1, lines);
        }
    }
}

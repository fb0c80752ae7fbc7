//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use kbase_core::events::DomainEvent;
use kbase_entity::folder::FolderNode;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => print_json(&items),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{}", json);
}

/// Print a folder forest as an indented tree
pub fn print_tree(forest: &[FolderNode], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if forest.is_empty() {
                println!("No folders.");
                return;
            }
            println!("All Files");
            print_branch(forest, "");
        }
        OutputFormat::Json => print_json(forest),
    }
}

fn print_branch(nodes: &[FolderNode], prefix: &str) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let connector = if last { "└── " } else { "├── " };
        println!(
            "{}{}{} ({} files)  [{}]",
            prefix, connector, node.name, node.file_count, node.id
        );
        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        print_branch(&node.children, &child_prefix);
    }
}

/// Print domain events as toast-style lines
pub fn print_events(events: &[DomainEvent], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            for event in events {
                println!(
                    "  {}  {}: {}",
                    event.timestamp.format("%H:%M:%S%.3f"),
                    event.payload.title(),
                    event.payload.description()
                );
            }
        }
        OutputFormat::Json => print_json(events),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

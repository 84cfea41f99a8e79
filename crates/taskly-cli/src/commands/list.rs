//! Shopping list commands for CLI.

use std::io::{BufRead, Write};

use clap::Subcommand;
use taskly_core::{Database, ShoppingItem, ShoppingListController, TracingFeedback};

use super::{print_events, CmdResult};

#[derive(Subcommand)]
pub enum ListAction {
    /// Show the list in display order
    Show {
        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an item
    Add {
        /// Item name
        name: String,
    },
    /// Mark an item done, or reopen it
    Toggle {
        /// Item ID
        id: String,
    },
    /// Delete an item
    Delete {
        /// Item ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

fn confirm_on_stdin(item: &ShoppingItem) -> bool {
    eprint!(
        "Are you sure you want to delete {}? It will be gone for good [y/N] ",
        item.name()
    );
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn run(action: ListAction) -> CmdResult {
    let mut ctl = ShoppingListController::load(Database::open()?, TracingFeedback);

    match action {
        ListAction::Show { json } => {
            let ordered = ctl.ordered();
            if json {
                println!("{}", serde_json::to_string_pretty(&ordered)?);
            } else if ordered.is_empty() {
                println!("Your shopping list is empty");
            } else {
                for item in ordered {
                    let mark = if item.is_completed() { "x" } else { " " };
                    println!("[{mark}] {}  {}", item.name(), item.id());
                }
            }
        }
        ListAction::Add { name } => {
            let events = ctl.add(&name)?;
            print_events(&events)?;
        }
        ListAction::Toggle { id } => {
            let events = ctl.toggle_complete(&id)?;
            print_events(&events)?;
        }
        ListAction::Delete { id, yes } => {
            let events = ctl.delete(&id, |item| yes || confirm_on_stdin(item))?;
            print_events(&events)?;
        }
    }
    Ok(())
}

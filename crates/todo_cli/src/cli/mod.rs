use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "todo", author, version, about = "To do - task manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: todo add "Buy milk" --priority 2 --due 2025-12-24
    ///
    /// Missing --priority or --due values are asked for interactively.
    Add {
        name: String,
        /// Priority 1, 2 or 3
        #[arg(short, long, value_name = "1|2|3", allow_hyphen_values = true)]
        priority: Option<String>,
        /// Due date, today or later
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        due: Option<String>,
    },
    /// List open tasks
    ///
    /// Example: todo list
    List,
    /// List every task, including completed ones
    ///
    /// Example: todo report
    Report,
    /// Search open tasks whose name contains every term
    ///
    /// Example: todo query milk eggs
    Query {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },
    /// Mark a task as completed
    ///
    /// Example: todo done 1
    Done { id: u64 },
    /// Delete a task
    ///
    /// Example: todo delete 1
    Delete { id: u64 },
    /// Show details of a task
    ///
    /// Example: todo show 1
    Show { id: u64 },
}

use clap::Parser;
use std::io;
use todo_cli::cli::{Cli, Command};
use todo_cli::display;
use todo_cli::prompt::{
    DUE_DATE_PROMPT, PRIORITY_PROMPT, parse_due_date_answer, parse_priority_answer,
    prompt_until_valid,
};
use todo_core::config::{self, Config};
use todo_core::error::AppError;
use todo_core::model::{self, Priority, parse_due_date};
use todo_core::storage::json_store;
use todo_core::{CompleteOutcome, DeleteOutcome, TaskStore};
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TODO_LOG";

fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn load_config() -> Config {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: ignoring config: {err}");
    }
    loaded.config
}

fn run_add(
    store: &mut TaskStore,
    name: &str,
    priority: Option<&str>,
    due: Option<&str>,
) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::invalid_input("task name is required"));
    }

    let today = model::today();
    let priority = priority.map(str::parse::<Priority>).transpose()?;
    let due_date = due.map(|raw| parse_due_date(raw, today)).transpose()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let priority = match priority {
        Some(priority) => priority,
        None => prompt_until_valid(&mut input, &mut output, PRIORITY_PROMPT, parse_priority_answer)?,
    };
    let due_date = match due {
        Some(_) => due_date,
        None => prompt_until_valid(&mut input, &mut output, DUE_DATE_PROMPT, |answer| {
            parse_due_date_answer(answer, today)
        })?,
    };

    let id = store.add(name, Some(priority), due_date)?;
    println!("Created task {id}");
    Ok(())
}

fn run_command(cli: Cli, config: &Config) -> Result<(), AppError> {
    let path = json_store::store_path(config);
    let mut store = TaskStore::load(&path)?;
    let palette = config.palette();

    match cli.command {
        Command::Add {
            name,
            priority,
            due,
        } => run_add(&mut store, &name, priority.as_deref(), due.as_deref())?,
        Command::List => {
            let tasks = store.list_open();
            if tasks.is_empty() {
                println!("No tasks to list.");
            } else {
                println!("{}", palette.accentize("Tasks to list:"));
                println!("{}", display::compact_table(&tasks, model::now()));
            }
        }
        Command::Report => {
            let tasks = store.report();
            if tasks.is_empty() {
                println!("No tasks to report.");
            } else {
                println!("{}", display::extended_table(tasks, model::now()));
            }
        }
        Command::Query { terms } => {
            let tasks = store.query(terms.as_slice())?;
            if tasks.is_empty() {
                println!("No matching tasks found.");
            } else {
                println!("{}", display::compact_table(&tasks, model::now()));
            }
        }
        Command::Done { id } => match store.complete(id)? {
            CompleteOutcome::Completed(_) => {}
            CompleteOutcome::AlreadyCompleted => println!("Task {id} is already completed."),
            CompleteOutcome::NotFound => println!("No task with ID {id} found."),
        },
        Command::Delete { id } => match store.delete(id)? {
            DeleteOutcome::Deleted(_) => println!("Deleted task {id}"),
            DeleteOutcome::NotFound => println!("No task with ID {id} found."),
        },
        Command::Show { id } => match store.get(id) {
            Some(task) => println!("{}", display::task_details(task, model::now(), &palette)),
            None => println!("No task with ID {id} found."),
        },
    }

    Ok(())
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            eprintln!("Run 'todo --help' for usage.");
            std::process::exit(1);
        }
    };

    let config = load_config();
    if let Err(err) = run_command(cli, &config) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

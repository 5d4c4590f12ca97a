use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use todo_core::config::Palette;
use todo_core::model::{DueStatus, Task};

#[derive(Tabled)]
struct CompactRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Age")]
    age: i64,
    #[tabled(rename = "Due Date")]
    due_date: String,
    #[tabled(rename = "Priority")]
    priority: u8,
    #[tabled(rename = "Task")]
    name: String,
}

#[derive(Tabled)]
struct ExtendedRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Age")]
    age: i64,
    #[tabled(rename = "Due Date")]
    due_date: String,
    #[tabled(rename = "Priority")]
    priority: u8,
    #[tabled(rename = "Task")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Completed")]
    completed: String,
}

fn due_date_cell(due_date: Option<Date>) -> String {
    let format = format_description!("[year]-[month]-[day]");
    due_date
        .and_then(|date| date.format(&format).ok())
        .unwrap_or_else(|| "-".to_string())
}

/// Renders a timestamp like `Mon Mar 03 09:30:00 2025`.
pub fn format_timestamp(value: OffsetDateTime) -> String {
    let format = format_description!(
        "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [year]"
    );
    value
        .format(&format)
        .unwrap_or_else(|_| value.to_string())
}

/// id / age / due date / priority / name.
pub fn compact_table(tasks: &[&Task], now: OffsetDateTime) -> String {
    let rows = tasks.iter().map(|task| CompactRow {
        id: task.id,
        age: task.age_days(now),
        due_date: due_date_cell(task.due_date),
        priority: task.priority.value(),
        name: task.name.clone(),
    });
    Table::new(rows).with(Style::blank()).to_string()
}

/// The compact columns plus created and completed timestamps.
pub fn extended_table(tasks: &[Task], now: OffsetDateTime) -> String {
    let rows = tasks.iter().map(|task| ExtendedRow {
        id: task.id,
        age: task.age_days(now),
        due_date: due_date_cell(task.due_date),
        priority: task.priority.value(),
        name: task.name.clone(),
        created: format_timestamp(task.created),
        completed: task
            .completed
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string()),
    });
    Table::new(rows).with(Style::blank()).to_string()
}

pub fn task_details(task: &Task, now: OffsetDateTime, palette: &Palette) -> String {
    let due_status = task.days_until_due(now.date());
    let due_status_text = match due_status {
        DueStatus::Overdue(_) => palette.warnize(&due_status.to_string()),
        _ => due_status.to_string(),
    };
    let completed = task
        .completed
        .map(format_timestamp)
        .unwrap_or_else(|| "-".to_string());

    [
        format!("ID:        {}", task.id),
        format!("Task:      {}", task.name),
        format!("Priority:  {}", task.priority),
        format!("Created:   {}", format_timestamp(task.created)),
        format!("Age:       {} days", task.age_days(now)),
        format!("Due Date:  {} ({})", due_date_cell(task.due_date), due_status_text),
        format!("Completed: {completed}"),
    ]
    .join("\n")
}

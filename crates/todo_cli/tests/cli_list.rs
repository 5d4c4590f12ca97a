use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todo-{nanos}-{file_name}"))
}

fn write_store(path: &Path, tasks: serde_json::Value) {
    let content = serde_json::json!({
        "schema_version": 1,
        "tasks": tasks
    });
    std::fs::write(path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
}

fn task(id: u64, name: &str, priority: u8, due_date: Option<&str>, completed: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "unique_id": id,
        "name": name,
        "priority": priority,
        "due_date": due_date,
        "created": "2025-01-06T09:00:00Z",
        "completed": completed
    })
}

fn run(store_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_todo"))
        .args(args)
        .env("TODO_STORE_PATH", store_path)
        .env("TODO_CONFIG_PATH", temp_path("no-config.json"))
        .stdin(Stdio::null())
        .output()
        .expect("failed to run todo")
}

fn table_ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|cell| cell.chars().all(|ch| ch.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

#[test]
fn list_on_empty_store() {
    let store_path = temp_path("cli-list-empty.data");

    let output = run(&store_path, &["list"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No tasks to list."
    );
    assert!(!store_path.exists());
}

#[test]
fn list_orders_by_due_date_priority_and_hides_completed() {
    let store_path = temp_path("cli-list-order.data");
    write_store(
        &store_path,
        serde_json::json!([
            task(1, "undated", 3, None, None),
            task(2, "early", 1, Some("2025-02-01"), None),
            task(3, "late", 1, Some("2025-03-01"), None),
            task(4, "finished", 3, Some("2025-04-01"), Some("2025-01-07T10:00:00Z")),
            task(5, "early urgent", 2, Some("2025-02-01"), None)
        ]),
    );

    let output = run(&store_path, &["list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Tasks to list:"));
    assert!(stdout.contains("Due Date"));
    assert!(!stdout.contains("finished"));
    assert_eq!(table_ids(&stdout), vec!["3", "5", "2", "1"]);
}

#[test]
fn report_shows_everything_with_timestamps() {
    let store_path = temp_path("cli-report.data");
    write_store(
        &store_path,
        serde_json::json!([
            task(1, "open", 1, None, None),
            task(2, "finished", 2, Some("2025-02-01"), Some("2025-01-07T10:00:00Z"))
        ]),
    );

    let output = run(&store_path, &["report"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created"));
    assert!(stdout.contains("Completed"));
    assert!(stdout.contains("Mon Jan 06 09:00:00 2025"));
    assert!(stdout.contains("Tue Jan 07 10:00:00 2025"));
    assert_eq!(table_ids(&stdout), vec!["1", "2"]);
}

#[test]
fn report_on_empty_store() {
    let store_path = temp_path("cli-report-empty.data");

    let output = run(&store_path, &["report"]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No tasks to report."
    );
}

#[test]
fn query_matches_every_term() {
    let store_path = temp_path("cli-query.data");
    write_store(
        &store_path,
        serde_json::json!([
            task(1, "Buy milk", 1, None, None),
            task(2, "Buy eggs", 1, None, None),
            task(3, "Buy MILK powder", 1, None, Some("2025-01-07T10:00:00Z"))
        ]),
    );

    let output = run(&store_path, &["query", "m", "k"]);
    let none = run(&store_path, &["query", "bread"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Buy milk"));
    assert!(!stdout.contains("Buy eggs"));
    assert!(!stdout.contains("powder"));
    assert_eq!(
        String::from_utf8_lossy(&none.stdout).trim(),
        "No matching tasks found."
    );
}

#[test]
fn query_without_terms_is_a_usage_error() {
    let store_path = temp_path("cli-query-empty.data");

    let output = run(&store_path, &["query"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn corrupt_store_fails_loudly() {
    let store_path = temp_path("cli-corrupt.data");
    std::fs::write(&store_path, "not json at all").unwrap();

    let output = run(&store_path, &["list"]);
    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_data"));
    assert_eq!(content, "not json at all");
}

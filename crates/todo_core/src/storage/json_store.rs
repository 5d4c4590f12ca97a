use crate::config::Config;
use crate::error::AppError;
use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
pub const STORE_FILE_NAME: &str = ".todo.data";
pub const STORE_ENV_VAR: &str = "TODO_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    schema_version: u32,
    #[serde(default)]
    max_id: u64,
    tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    pub tasks: Vec<Task>,
    /// Highest id ever handed out, including ids of deleted tasks.
    pub max_id: u64,
}

/// Resolves the store file: env override, then config, then the working directory.
pub fn store_path(config: &Config) -> PathBuf {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    match config.store_path.as_ref() {
        Some(path) if !path.as_os_str().is_empty() => path.clone(),
        _ => PathBuf::from(STORE_FILE_NAME),
    }
}

pub fn load_state(path: &Path) -> Result<TaskState, AppError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "store file missing, starting empty");
        return Ok(TaskState::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let stored: StoredTasks = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("corrupt store {}: {}", path.display(), err))
    })?;

    if stored.schema_version != SCHEMA_VERSION {
        return Err(AppError::invalid_data(format!(
            "unsupported schema_version {} in {}",
            stored.schema_version,
            path.display()
        )));
    }

    let mut seen = HashSet::with_capacity(stored.tasks.len());
    for task in &stored.tasks {
        if task.id == 0 {
            return Err(AppError::invalid_data("task id must be positive"));
        }
        if !seen.insert(task.id) {
            return Err(AppError::invalid_data(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }

    let highest = stored.tasks.iter().map(|task| task.id).max().unwrap_or(0);
    tracing::debug!(
        path = %path.display(),
        tasks = stored.tasks.len(),
        max_id = stored.max_id.max(highest),
        "loaded store"
    );

    Ok(TaskState {
        max_id: stored.max_id.max(highest),
        tasks: stored.tasks,
    })
}

/// Writes the whole state to a sibling temp file, then renames it over `path`.
pub fn save_state(path: &Path, state: &TaskState) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let stored = StoredTasks {
        schema_version: SCHEMA_VERSION,
        max_id: state.max_id,
        tasks: state.tasks.clone(),
    };
    let content = serde_json::to_string_pretty(&stored)?;

    let tmp_path = temp_sibling(path);
    std::fs::write(&tmp_path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&tmp_path, permissions)?;
    }

    std::fs::rename(&tmp_path, path)?;
    tracing::debug!(path = %path.display(), tasks = state.tasks.len(), "saved store");

    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| STORE_FILE_NAME.into());
    name.push(".tmp");
    path.with_file_name(name)
}

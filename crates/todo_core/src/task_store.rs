use crate::error::AppError;
use crate::model::{self, Priority, Task};
use crate::storage::json_store::{self, TaskState};
use std::path::{Path, PathBuf};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Task),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompleteOutcome {
    Completed(Task),
    AlreadyCompleted,
    NotFound,
}

/// All tasks of one store file, loaded wholesale and written back after every mutation.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    state: TaskState,
}

impl TaskStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let state = json_store::load_state(&path)?;
        Ok(Self { path, state })
    }

    pub fn save(&self) -> Result<(), AppError> {
        json_store::save_state(&self.path, &self.state)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_id(&self) -> u64 {
        self.state.max_id
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.state.tasks.iter().find(|task| task.id == id)
    }

    pub fn add(
        &mut self,
        name: &str,
        priority: Option<Priority>,
        due_date: Option<Date>,
    ) -> Result<u64, AppError> {
        self.add_at(name, priority, due_date, model::now())
    }

    pub fn add_at(
        &mut self,
        name: &str,
        priority: Option<Priority>,
        due_date: Option<Date>,
        created: OffsetDateTime,
    ) -> Result<u64, AppError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("task name is required"));
        }
        if let Some(due) = due_date
            && due < created.date()
        {
            return Err(AppError::invalid_input(
                "due date must be today or a future date",
            ));
        }

        let id = self.state.max_id + 1;
        let task = Task::new(
            id,
            trimmed,
            priority.unwrap_or_default(),
            due_date,
            created,
        );
        self.state.tasks.push(task);
        self.state.max_id = id;
        self.save()?;

        tracing::info!(id, "created task");
        Ok(id)
    }

    pub fn delete(&mut self, id: u64) -> Result<DeleteOutcome, AppError> {
        let Some(index) = self.state.tasks.iter().position(|task| task.id == id) else {
            return Ok(DeleteOutcome::NotFound);
        };

        let removed = self.state.tasks.remove(index);
        self.save()?;

        tracing::info!(id, "deleted task");
        Ok(DeleteOutcome::Deleted(removed))
    }

    pub fn complete(&mut self, id: u64) -> Result<CompleteOutcome, AppError> {
        self.complete_at(id, model::now())
    }

    pub fn complete_at(
        &mut self,
        id: u64,
        at: OffsetDateTime,
    ) -> Result<CompleteOutcome, AppError> {
        let Some(task) = self.state.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(CompleteOutcome::NotFound);
        };

        if !task.complete(at) {
            return Ok(CompleteOutcome::AlreadyCompleted);
        }

        let completed = task.clone();
        self.save()?;

        tracing::info!(id, "completed task");
        Ok(CompleteOutcome::Completed(completed))
    }

    /// Open tasks, descending by (due date, priority, created); no due date sorts as earliest.
    pub fn list_open(&self) -> Vec<&Task> {
        let mut tasks = self.open_tasks();
        tasks.sort_by(|a, b| {
            (due_key(b), b.priority, b.created).cmp(&(due_key(a), a.priority, a.created))
        });
        tasks
    }

    /// Every task in stored order.
    pub fn report(&self) -> &[Task] {
        &self.state.tasks
    }

    /// Open tasks whose name contains every term, descending by (due date, priority).
    ///
    /// Unlike [`TaskStore::list_open`] the creation time is not part of the sort key.
    pub fn query<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<&Task>, AppError> {
        let terms: Vec<&str> = terms
            .iter()
            .map(|term| term.as_ref().trim())
            .filter(|term| !term.is_empty())
            .collect();
        if terms.is_empty() {
            return Err(AppError::invalid_input("at least one query term is required"));
        }

        let mut tasks = self.open_tasks();
        for term in &terms {
            tasks.retain(|task| task.name_contains(term));
        }
        tasks.sort_by(|a, b| (due_key(b), b.priority).cmp(&(due_key(a), a.priority)));
        Ok(tasks)
    }

    fn open_tasks(&self) -> Vec<&Task> {
        self.state.tasks.iter().filter(|task| task.is_open()).collect()
    }
}

fn due_key(task: &Task) -> Date {
    task.due_date.unwrap_or(Date::MIN)
}

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

time::serde::format_description!(due_date_format, Date, "[year]-[month]-[day]");

/// Task priority, one of 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const DEFAULT: Priority = Priority(1);

    pub fn new(value: u8) -> Result<Self, AppError> {
        match value {
            1..=3 => Ok(Self(value)),
            _ => Err(AppError::invalid_input("priority must be 1, 2, or 3")),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Priority {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::invalid_input("priority must be 1, 2, or 3"))?;
        u8::try_from(value)
            .map_err(|_| AppError::invalid_input("priority must be 1, 2, or 3"))
            .and_then(Self::new)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "unique_id")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "due_date_format::option")]
    pub due_date: Option<Date>,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed: Option<OffsetDateTime>,
}

impl Task {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        priority: Priority,
        due_date: Option<Date>,
        created: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            due_date,
            created,
            completed: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.completed.is_none()
    }

    /// Whole days elapsed since creation.
    pub fn age_days(&self, now: OffsetDateTime) -> i64 {
        (now - self.created).whole_days()
    }

    pub fn days_until_due(&self, today: Date) -> DueStatus {
        let Some(due) = self.due_date else {
            return DueStatus::NoDueDate;
        };

        let days = (due - today).whole_days();
        match days {
            0 => DueStatus::DueToday,
            n if n < 0 => DueStatus::Overdue(-n),
            n => DueStatus::DueIn(n),
        }
    }

    /// Marks the task completed. Returns false if it already was.
    pub fn complete(&mut self, at: OffsetDateTime) -> bool {
        if self.completed.is_some() {
            return false;
        }
        self.completed = Some(at);
        true
    }

    /// Case-insensitive substring match against the task name.
    pub fn name_contains(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    NoDueDate,
    Overdue(i64),
    DueToday,
    DueIn(i64),
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDueDate => write!(f, "no due date"),
            Self::Overdue(days) => write!(f, "already overdue by {days} days"),
            Self::DueToday => write!(f, "due today"),
            Self::DueIn(days) => write!(f, "due in {days} days"),
        }
    }
}

/// Parses a `YYYY-MM-DD` due date, rejecting dates before `today`.
pub fn parse_due_date(raw: &str, today: Date) -> Result<Date, AppError> {
    let format = format_description!("[year]-[month]-[day]");
    let date = Date::parse(raw.trim(), &format).map_err(|_| {
        AppError::invalid_input("invalid date format, expected YYYY-MM-DD")
    })?;

    if date < today {
        return Err(AppError::invalid_input(
            "due date must be today or a future date",
        ));
    }

    Ok(date)
}

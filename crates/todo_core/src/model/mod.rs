mod clock;
mod task;

pub use clock::{now, today};
pub use task::{DueStatus, Priority, Task, parse_due_date};

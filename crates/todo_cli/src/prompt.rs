use std::io::{BufRead, Write};
use time::Date;
use todo_core::error::AppError;
use todo_core::model::{Priority, parse_due_date};

pub const PRIORITY_PROMPT: &str =
    "Enter the priority (1, 2, or 3), or press Enter to use default (1): ";
pub const DUE_DATE_PROMPT: &str = "Enter the due date (YYYY-MM-DD), or press Enter to skip: ";

/// Asks `message` until `parse` accepts the trimmed answer.
///
/// Rejected answers print the error and ask again. End of input counts as an
/// empty answer; if that is rejected too the error is returned.
pub fn prompt_until_valid<R, W, T, F>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    mut parse: F,
) -> Result<T, AppError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<T, AppError>,
{
    let mut line = String::new();
    loop {
        write!(writer, "{message}")?;
        writer.flush()?;

        line.clear();
        let bytes = reader.read_line(&mut line)?;
        if bytes == 0 {
            writeln!(writer)?;
        }

        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(err) if bytes == 0 => return Err(err),
            Err(err) => writeln!(writer, "{}", err.message())?,
        }
    }
}

pub fn parse_priority_answer(answer: &str) -> Result<Priority, AppError> {
    if answer.is_empty() {
        return Ok(Priority::default());
    }
    answer.parse()
}

pub fn parse_due_date_answer(answer: &str, today: Date) -> Result<Option<Date>, AppError> {
    if answer.is_empty() {
        return Ok(None);
    }
    parse_due_date(answer, today).map(Some)
}

use time::{Date, OffsetDateTime, UtcOffset};

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Current local time truncated to whole seconds.
pub fn now() -> OffsetDateTime {
    let current = OffsetDateTime::now_utc().to_offset(local_offset());
    current.replace_nanosecond(0).unwrap_or(current)
}

pub fn today() -> Date {
    now().date()
}

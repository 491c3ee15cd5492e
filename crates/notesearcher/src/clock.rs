//! Wall clock access, injectable for tests.

use chrono::{DateTime, Local};

/// `YYYYMMddHHmm`, in local time
pub const NOTE_ID_FORMAT: &str = "%Y%m%d%H%M";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Id for a note created at `time`
pub fn note_id(time: &DateTime<Local>) -> String {
    time.format(NOTE_ID_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_note_id_format() {
        let time = Local
            .with_ymd_and_hms(2024, 3, 5, 7, 9, 42)
            .single()
            .expect("unambiguous local time");
        assert_eq!(note_id(&time), "202403050709");
    }

    #[test]
    fn test_system_clock_is_local() {
        let now = SystemClock.now();
        let id = note_id(&now);
        assert_eq!(id.len(), 12);
        assert_eq!(&id[8..10], format!("{:02}", now.hour()));
    }
}

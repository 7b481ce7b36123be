use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};


pub type ErrorStr = &'static str;
pub type Result<T> = std::result::Result<T, ErrorStr>;
pub type ResultV = Result<()>;

const LOG_STAMP: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]"
);
const RESPONSE_STAMP: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
);


/// Wall clock pinned to the local offset observed at startup.
///
/// `time` refuses to look up the local offset once the process has more than
/// one thread, so it must be captured before the server spawns its acceptor.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    offset: UtcOffset,
}

impl Clock {
    pub fn local() -> Clock {
        Clock { offset: UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC) }
    }

    #[cfg(test)]
    pub fn utc() -> Clock {
        Clock { offset: UtcOffset::UTC }
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }

    /// `2024-05-01 13:45:12,345`
    pub fn log_stamp(&self) -> String {
        stamp(self.now(), LOG_STAMP)
    }

    /// `2024-05-01 13:45:12.345678`
    pub fn response_stamp(&self) -> String {
        stamp(self.now(), RESPONSE_STAMP)
    }
}

fn stamp(t: OffsetDateTime, format: &[FormatItem<'_>]) -> String {
    // Only fails for components the description does not use.
    t.format(format).unwrap_or_else(|_| t.unix_timestamp().to_string())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_stamp_has_millisecond_precision() {
        let s = Clock::utc().log_stamp();
        assert_eq!(s.len(), "2024-05-01 13:45:12,345".len());
        assert_eq!(&s[19..20], ",");
        assert_eq!(&s[10..11], " ");
    }

    #[test]
    fn response_stamp_has_microsecond_precision() {
        let s = Clock::utc().response_stamp();
        assert_eq!(s.len(), "2024-05-01 13:45:12.345678".len());
        assert_eq!(&s[19..20], ".");
        assert!(s[20..].chars().all(|c| c.is_ascii_digit()));
    }
}

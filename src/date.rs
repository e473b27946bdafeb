//! Calendar helpers: day boundaries, partial ISO date buckets and the `[start, end]`
//! window handed to the clip listing endpoint.

use crate::error::DateError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use time::macros::time;
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset};

/// Inclusive time window. Both ends are kept with the session offset and rendered
/// in UTC (`YYYY-MM-DDTHH:MM:SSZ`) for the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl TimeWindow {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, DateError> {
        if end < start {
            return Err(DateError::EndBeforeStart);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> OffsetDateTime { self.start }
    pub fn end(&self) -> OffsetDateTime { self.end }

    /// `started_at` query value.
    pub fn started_at(&self) -> String { wire_format(self.start) }
    /// `ended_at` query value.
    pub fn ended_at(&self) -> String { wire_format(self.end) }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.started_at(), self.ended_at())
    }
}

/// `YYYY-MM-DDTHH:MM:SSZ` in UTC.
pub fn wire_format(dt: OffsetDateTime) -> String {
    let utc = dt.to_offset(UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        utc.year(),
        utc.month() as u8,
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second()
    )
}

pub fn start_of_day(dt: OffsetDateTime) -> OffsetDateTime {
    dt.replace_time(time!(00:00:00))
}

pub fn end_of_day(dt: OffsetDateTime) -> OffsetDateTime {
    dt.replace_time(time!(23:59:59))
}

/// Midnight of `date` in `offset`.
pub fn at_midnight(date: Date, offset: UtcOffset) -> OffsetDateTime {
    date.midnight().assume_offset(offset)
}

/// Granularity of a partial ISO date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    Year,
    Month,
    Day,
}

/// A partial ISO date such as `2023`, `2023-06`, `2023-06-15` or `20230615`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bucket {
    pub first_day: Date,
    pub span: Span,
}

fn bucket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<y>\d{4})(?:-(?P<m>\d{2})(?:-(?P<d>\d{2}))?|(?P<cm>\d{2})(?P<cd>\d{2}))?$")
            .expect("bucket regex is valid")
    })
}

impl Bucket {
    /// Parse a partial ISO date. Compact `YYYYMMDD` is the same bucket as `YYYY-MM-DD`;
    /// compact `YYYYMM` is not accepted.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let input = s.trim();
        let malformed = || DateError::Malformed(input.to_string());
        let caps = bucket_re().captures(input).ok_or_else(malformed)?;

        let year: i32 = caps["y"].parse().map_err(|_| malformed())?;
        let month = caps.name("m").or_else(|| caps.name("cm"));
        let day = caps.name("d").or_else(|| caps.name("cd"));

        let (month, day, span) = match (month, day) {
            (None, _) => (1u8, 1u8, Span::Year),
            (Some(m), None) => (m.as_str().parse().map_err(|_| malformed())?, 1, Span::Month),
            (Some(m), Some(d)) => (
                m.as_str().parse().map_err(|_| malformed())?,
                d.as_str().parse().map_err(|_| malformed())?,
                Span::Day,
            ),
        };
        let month = Month::try_from(month).map_err(|_| malformed())?;
        let first_day = Date::from_calendar_date(year, month, day).map_err(|_| malformed())?;
        Ok(Self { first_day, span })
    }

    /// First day of the following bucket, or `None` past the supported calendar range.
    fn next_first_day(&self) -> Option<Date> {
        let d = self.first_day;
        match self.span {
            Span::Year => Date::from_calendar_date(d.year() + 1, Month::January, 1).ok(),
            Span::Month => {
                let (year, month) = match d.month() {
                    Month::December => (d.year() + 1, Month::January),
                    m => (d.year(), m.next()),
                };
                Date::from_calendar_date(year, month, 1).ok()
            }
            Span::Day => d.next_day(),
        }
    }

    /// Window covering the whole bucket: start at midnight, end one second before the next bucket.
    pub fn window(&self, offset: UtcOffset) -> Result<TimeWindow, DateError> {
        let start = at_midnight(self.first_day, offset);
        let next = self
            .next_first_day()
            .ok_or_else(|| DateError::Malformed(self.first_day.to_string()))?;
        let end = at_midnight(next, offset) - Duration::SECOND;
        TimeWindow::new(start, end)
    }
}

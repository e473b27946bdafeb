//! Timeframe expressions ("today", "this month", "2023-06", "custom range", ...) and
//! their resolution into a concrete [`TimeWindow`] relative to a caller-supplied `now`.

use crate::date::{at_midnight, end_of_day, start_of_day, Bucket, TimeWindow};
use crate::error::DateError;
use std::fmt;
use std::str::FromStr;
use time::macros::{date, time};
use time::{Duration, Month, OffsetDateTime};

/// Earliest date the platform has clips for; `lifetime` starts here.
pub const LIFETIME_FLOOR: time::Date = date!(2016 - 01 - 01);

/// Keywords accepted besides partial ISO dates, in the order they are presented.
pub const NAMED_TIMEFRAMES: [&str; 7] =
    ["today", "yesterday", "this week", "this month", "this year", "lifetime", "custom range"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeExpression {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    ThisYear,
    Lifetime,
    Bucket(Bucket),
    /// Needs two more dates from the user, see [`resolve_custom`].
    CustomRange,
}

impl FromStr for TimeExpression {
    type Err = DateError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        let expr = match norm.as_str() {
            "today" => TimeExpression::Today,
            "yesterday" => TimeExpression::Yesterday,
            "this week" => TimeExpression::ThisWeek,
            "this month" => TimeExpression::ThisMonth,
            "this year" => TimeExpression::ThisYear,
            "lifetime" => TimeExpression::Lifetime,
            "custom range" => TimeExpression::CustomRange,
            _ => {
                let bucket = Bucket::parse(&norm)
                    .map_err(|_| DateError::InvalidExpression(s.trim().to_string()))?;
                TimeExpression::Bucket(bucket)
            }
        };
        Ok(expr)
    }
}

impl fmt::Display for TimeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeExpression::Today => f.write_str("today"),
            TimeExpression::Yesterday => f.write_str("yesterday"),
            TimeExpression::ThisWeek => f.write_str("this week"),
            TimeExpression::ThisMonth => f.write_str("this month"),
            TimeExpression::ThisYear => f.write_str("this year"),
            TimeExpression::Lifetime => f.write_str("lifetime"),
            TimeExpression::Bucket(b) => write!(f, "{} ({:?})", b.first_day, b.span),
            TimeExpression::CustomRange => f.write_str("custom range"),
        }
    }
}

impl TimeExpression {
    /// Resolve against `now`. Day boundaries are taken in `now`'s offset.
    pub fn resolve(&self, now: OffsetDateTime) -> Result<TimeWindow, DateError> {
        let today_start = start_of_day(now);
        let today_end = end_of_day(now);
        let offset = now.offset();

        let start = match self {
            TimeExpression::Today => today_start,
            TimeExpression::Yesterday => {
                let start = today_start - Duration::days(1);
                return TimeWindow::new(start, today_start - Duration::SECOND);
            }
            TimeExpression::ThisWeek => today_start - Duration::weeks(1),
            TimeExpression::ThisMonth => today_start.replace_day(1).map_err(|_| self.invalid())?,
            TimeExpression::ThisYear => today_start
                .replace_day(1)
                .and_then(|d| d.replace_month(Month::January))
                .map_err(|_| self.invalid())?,
            TimeExpression::Lifetime => at_midnight(LIFETIME_FLOOR, offset),
            TimeExpression::Bucket(b) => return b.window(offset),
            TimeExpression::CustomRange => return Err(DateError::CustomRangeRequired),
        };
        TimeWindow::new(start, today_end)
    }

    fn invalid(&self) -> DateError {
        DateError::InvalidExpression(self.to_string())
    }
}

/// Parse and resolve in one step.
pub fn resolve(expression: &str, now: OffsetDateTime) -> Result<TimeWindow, DateError> {
    expression.parse::<TimeExpression>()?.resolve(now)
}

/// Start of a custom range: midnight of the given day. Rejected when it lies after today's end.
pub fn custom_start(input: &str, now: OffsetDateTime) -> Result<OffsetDateTime, DateError> {
    let day = Bucket::parse(input)?.first_day;
    let start = at_midnight(day, now.offset());
    if start > end_of_day(now) {
        return Err(DateError::FutureDate);
    }
    Ok(start)
}

/// End of a custom range: 23:59:59 of the given day. Rejected when earlier than `start`.
pub fn custom_end(input: &str, start: OffsetDateTime) -> Result<OffsetDateTime, DateError> {
    let day = Bucket::parse(input)?.first_day;
    let end = at_midnight(day, start.offset()).replace_time(time!(23:59:59));
    if end < start {
        return Err(DateError::EndBeforeStart);
    }
    Ok(end)
}

pub fn resolve_custom(start_input: &str, end_input: &str, now: OffsetDateTime) -> Result<TimeWindow, DateError> {
    let start = custom_start(start_input, now)?;
    let end = custom_end(end_input, start)?;
    TimeWindow::new(start, end)
}

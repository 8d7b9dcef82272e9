//! Shorthand constructors for tests.

use chrono::FixedOffset;

use crate::{Date, YearMonth};

/// Panics if the civil date is out of range.
pub fn date(year: i32, month: i32, day: i32) -> Date {
    Date::from_ymd(year, month, day).expect("test date should be in range")
}

/// Panics if the year-month is out of range.
pub fn ym(year: i32, month: i32) -> YearMonth {
    YearMonth::from_ym(year, month).expect("test year-month should be in range")
}

/// A fixed zone `hours` east of UTC.
pub fn zone(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).expect("test offset should be under 24h")
}

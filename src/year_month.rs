use std::{fmt, str::FromStr};

use chrono::{
    DateTime, Datelike, LocalResult, Months, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone,
    Utc,
};
use serde::{Deserialize, Serialize};

use crate::{
    Date, EPOCH_YEAR, Error, MAX_ORDINAL, MONTHS_PER_YEAR, Ordinal, OrdinalKind, RangePolicy,
    ordinal::{format_layout, scan_date, scan_year_month, wrapping_arithmetic},
    prelude::*,
};

/// An ordinal year-month, stored as the number of months since 1970-01.
///
/// Incrementing the value for December 2019 yields January 2020. Each value
/// covers a whole month of days: `0` is 1970-01, i.e. 1970-01-01 through
/// 1970-01-31 inclusive.
///
/// The representable range is 1970-01 through 7431-04 inclusive. Only
/// 1970-01 through 2149-05 lie fully inside [`Date`]'s range and 2149-06 is
/// partially covered; `start_date` and `end_date` clamp to `Date::MAX` past
/// that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct YearMonth(u16);

wrapping_arithmetic!(YearMonth);

impl Ordinal for YearMonth {
    const KIND: OrdinalKind = OrdinalKind::YearMonth;
}

/// `12*(year-1970) + (month-1)`, for any month number
fn raw_months(year: i64, month: i64) -> i64 {
    MONTHS_PER_YEAR * (year - i64::from(EPOCH_YEAR)) + (month - 1)
}

fn first_day(months: u32) -> NaiveDate {
    // chrono's default date is 1970-01-01
    NaiveDate::default() + Months::new(months)
}

/// Midnight of `date` in `tz`. If the zone skips midnight on that date, the
/// first instant after the gap.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t,
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(midnight - TimeDelta::days(1)));
            let offset = i64::from(before.fix().local_minus_utc());
            tz.from_utc_datetime(&(midnight - TimeDelta::seconds(offset)))
        }
    }
}

impl YearMonth {
    /// 1970-01
    pub const MIN: Self = Self(0);
    /// 7431-04
    pub const MAX: Self = Self(MAX_ORDINAL);

    /// Returns the `YearMonth` for `year` and `month`, saturating at the
    /// representable extremes.
    ///
    /// `month` is 1-based but not limited to 1-12: the value is linear in
    /// `month`, so 13 is January of the following year and 0 is December of
    /// the previous one.
    pub fn clamp_from_ym(year: i32, month: i32) -> Self {
        Self::clamp_raw(raw_months(i64::from(year), i64::from(month)))
    }

    /// Like `clamp_from_ym`, but reports out-of-range input.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` outside 1970-01 through 7431-04. The error
    /// carries the value `clamp_from_ym` would have returned.
    pub fn from_ym(year: i32, month: i32) -> Result<Self, Error> {
        Self::from_ym_with(year, month, RangePolicy::Strict)
    }

    /// # Errors
    /// Returns `Error::OutOfRange` under `RangePolicy::Strict`.
    pub fn from_ym_with(year: i32, month: i32, policy: RangePolicy) -> Result<Self, Error> {
        Self::from_raw(raw_months(i64::from(year), i64::from(month)), policy)
    }

    /// True for the zero value, 1970-01.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True for 7431-04.
    pub const fn is_max(self) -> bool {
        self.0 == MAX_ORDINAL
    }

    /// The calendar year.
    pub const fn year(self) -> i32 {
        EPOCH_YEAR + (self.0 / 12) as i32
    }

    /// The 1-based month of the year.
    pub const fn month(self) -> u32 {
        (self.0 % 12) as u32 + 1
    }

    /// The first instant covered by this month in `tz`: the zeroth
    /// nanosecond of its first day.
    pub fn start_in<Tz: TimeZone>(self, tz: &Tz) -> DateTime<Tz> {
        local_midnight(tz, first_day(u32::from(self.0)))
    }

    /// The last instant covered by this month in `tz`: one nanosecond before
    /// the start of the following month.
    pub fn end_in<Tz: TimeZone>(self, tz: &Tz) -> DateTime<Tz> {
        // 7431-05 has no YearMonth but is still a valid calendar month
        let next = first_day(u32::from(self.0) + 1);
        local_midnight(tz, next) - TimeDelta::nanoseconds(1)
    }

    /// `start_in(&Utc)`.
    pub fn start_utc(self) -> DateTime<Utc> {
        self.start_in(&Utc)
    }

    /// `end_in(&Utc)`.
    pub fn end_utc(self) -> DateTime<Utc> {
        self.end_in(&Utc)
    }

    /// The first day of this month, or `Date::MAX` if that is not a
    /// representable `Date`.
    pub fn start_date(self) -> Date {
        Date::clamp_from_instant(&self.start_utc())
    }

    /// The last day of this month, or `Date::MAX` if that is not a
    /// representable `Date`.
    pub fn end_date(self) -> Date {
        Date::clamp_from_instant(&self.end_utc())
    }

    /// Formats `start_utc()` with a strftime-style layout.
    ///
    /// # Errors
    /// Returns `ParseError::Layout` if `layout` has a specifier chrono does
    /// not know.
    pub fn format(self, layout: &str) -> Result<String, Error> {
        Ok(format_layout(&self.start_utc(), layout)?)
    }
}

impl From<Date> for YearMonth {
    fn from(date: Date) -> Self {
        let (year, month, _) = date.ymd();
        Self::clamp_raw(raw_months(i64::from(year), i64::from(month)))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parses `YYYY-MM`, or `YYYY-MM-DD` whose day is validated and then
    /// discarded. Out-of-range months are an error, never clamped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = scan_date(s)
            .map(|date| (date.year(), date.month()))
            .or_else(|_| scan_year_month(s))?;
        Self::from_raw(raw_months(i64::from(year), i64::from(month)), RangePolicy::Strict)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Reads the `YYYY-MM` or `YYYY-MM-DD` string form. JSON `null` is an error
/// here; declare the field as `Option<YearMonth>` to accept it, or keep the
/// current value with `Ordinal::update_from_text(None)`.
impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

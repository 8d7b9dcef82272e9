use std::{fmt, str::FromStr};

use chrono::{
    DateTime, Datelike, Days, Local, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::{
    EPOCH_YEAR, Error, MAX_ORDINAL, MAX_UNIX, MIN_DAY, MONTHS_PER_YEAR, Ordinal, OrdinalKind,
    ParseError, RangePolicy, SECONDS_PER_DAY, YearMonth,
    consts::NANOS_PER_SECOND,
    ordinal::{format_layout, scan_date, wrapping_arithmetic},
    prelude::*,
};

/// A whole calendar day, stored as the number of days since 1970-01-01.
///
/// The representable range is 1970-01-01 (`Date::MIN`, the zero value)
/// through 2149-06-06 (`Date::MAX`) inclusive, in 2 bytes.
///
/// Construction from an instant keeps the civil date of that instant in its
/// own zone: every instant during a given local day maps to the same `Date`.
/// Converting back (`to_utc`, `to_local`, `in_tz`) yields midnight at the
/// start of that day in the requested zone.
///
/// Leap seconds are not handled: each unit is exactly 86400 Unix seconds.
///
/// Arithmetic with `u16` wraps on the raw value and never clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct Date(u16);

wrapping_arithmetic!(Date);

impl Ordinal for Date {
    const KIND: OrdinalKind = OrdinalKind::Date;
}

fn epoch() -> NaiveDate {
    // chrono's default date is 1970-01-01
    NaiveDate::default()
}

/// Days from the epoch to the civil date, rolling out-of-range months and
/// days over into neighbouring months. Dates chrono cannot represent
/// saturate toward their side of the epoch.
fn raw_days(year: i32, month: i32, day: i32) -> i64 {
    let months = i64::from(year) * MONTHS_PER_YEAR + i64::from(month) - 1;
    let norm_year = months.div_euclid(MONTHS_PER_YEAR);
    let first = i32::try_from(norm_year).ok().and_then(|y| {
        let m = u32::try_from(months.rem_euclid(MONTHS_PER_YEAR) + 1).ok()?;
        NaiveDate::from_ymd_opt(y, m, MIN_DAY)
    });

    match first {
        Some(first) => first
            .signed_duration_since(epoch())
            .num_days()
            .saturating_add(i64::from(day) - 1),
        None if norm_year < i64::from(EPOCH_YEAR) => i64::MIN,
        None => i64::MAX,
    }
}

impl Date {
    /// 1970-01-01
    pub const MIN: Self = Self(0);
    /// 2149-06-06
    pub const MAX: Self = Self(MAX_ORDINAL);

    /// Returns the date of `t` in `t`'s own zone.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if that date is not representable.
    pub fn from_instant<Tz: TimeZone>(t: &DateTime<Tz>) -> Result<Self, Error> {
        Self::from_instant_with(t, RangePolicy::Strict)
    }

    /// Like `from_instant`, but saturates out-of-range dates.
    pub fn clamp_from_instant<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self::clamp_raw(local_seconds(t).div_euclid(SECONDS_PER_DAY))
    }

    /// Returns the date of `t` in `t`'s own zone, applying `policy` to
    /// out-of-range dates.
    ///
    /// The zone offset is added to the Unix time before truncating to days,
    /// so instants on the same local civil day in different zones give the
    /// same value.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` under `RangePolicy::Strict`.
    pub fn from_instant_with<Tz: TimeZone>(
        t: &DateTime<Tz>,
        policy: RangePolicy,
    ) -> Result<Self, Error> {
        Self::from_unix_with(local_seconds(t), policy)
    }

    /// Creates a `Date` from Unix seconds, taken as UTC.
    ///
    /// Passing `t.timestamp()` for a non-UTC `t` yields the UTC date of that
    /// instant; use `from_instant` to keep the local date instead.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` unless `unix_in_range(seconds)`.
    pub fn from_unix(seconds: i64) -> Result<Self, Error> {
        Self::from_unix_with(seconds, RangePolicy::Strict)
    }

    /// Like `from_unix`, but negative input gives `Date::MIN` and input past
    /// `MAX_UNIX` gives `Date::MAX`.
    pub fn clamp_from_unix(seconds: i64) -> Self {
        Self::clamp_raw(seconds.div_euclid(SECONDS_PER_DAY))
    }

    /// # Errors
    /// Returns `Error::OutOfRange` under `RangePolicy::Strict`.
    pub fn from_unix_with(seconds: i64, policy: RangePolicy) -> Result<Self, Error> {
        Self::from_raw(seconds.div_euclid(SECONDS_PER_DAY), policy)
    }

    /// True if `seconds` falls on a representable date when passed to
    /// `from_unix`.
    pub const fn unix_in_range(seconds: i64) -> bool {
        seconds >= 0 && seconds <= MAX_UNIX
    }

    /// Creates a `Date` from civil year, month and day.
    ///
    /// Out-of-range month and day numbers roll over: month 13 is January of
    /// the following year, day 0 is the last day of the previous month.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if the normalized date is not
    /// representable.
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Result<Self, Error> {
        Self::from_ymd_with(year, month, day, RangePolicy::Strict)
    }

    /// Like `from_ymd`, but saturates out-of-range dates.
    pub fn clamp_from_ymd(year: i32, month: i32, day: i32) -> Self {
        Self::clamp_from_unix(raw_days(year, month, day).saturating_mul(SECONDS_PER_DAY))
    }

    /// # Errors
    /// Returns `Error::OutOfRange` under `RangePolicy::Strict`.
    pub fn from_ymd_with(
        year: i32,
        month: i32,
        day: i32,
        policy: RangePolicy,
    ) -> Result<Self, Error> {
        Self::from_unix_with(raw_days(year, month, day).saturating_mul(SECONDS_PER_DAY), policy)
    }

    /// # Errors
    /// Returns `Error::OutOfRange` if `date` is not representable.
    pub fn from_naive(date: NaiveDate) -> Result<Self, Error> {
        Self::from_raw(date.signed_duration_since(epoch()).num_days(), RangePolicy::Strict)
    }

    /// Like `from_naive`, but saturates out-of-range dates.
    pub fn clamp_from_naive(date: NaiveDate) -> Self {
        Self::clamp_raw(date.signed_duration_since(epoch()).num_days())
    }

    /// Today's date in the system's local zone. If that date is not
    /// representable the zero value is returned; see `try_today`.
    pub fn today() -> Self {
        swallow(Self::try_today())
    }

    /// Today's date in UTC, or the zero value if not representable.
    pub fn today_utc() -> Self {
        swallow(Self::try_today_utc())
    }

    /// Today's date in `tz`, or the zero value if not representable.
    pub fn today_in<Tz: TimeZone>(tz: &Tz) -> Self {
        swallow(Self::try_today_in(tz))
    }

    /// # Errors
    /// Returns `Error::OutOfRange` once the local date passes 2149-06-06.
    pub fn try_today() -> Result<Self, Error> {
        Self::from_instant(&Local::now())
    }

    /// # Errors
    /// Returns `Error::OutOfRange` once the UTC date passes 2149-06-06.
    pub fn try_today_utc() -> Result<Self, Error> {
        Self::from_instant(&Utc::now())
    }

    /// # Errors
    /// Returns `Error::OutOfRange` once the date in `tz` passes 2149-06-06.
    pub fn try_today_in<Tz: TimeZone>(tz: &Tz) -> Result<Self, Error> {
        Self::from_instant(&Utc::now().with_timezone(tz))
    }

    /// Parses `value` with a strftime-style `layout`, ignoring any
    /// time-of-day fields.
    ///
    /// # Errors
    /// Returns `ParseError::Layout` if `value` does not match `layout`, and
    /// `Error::OutOfRange` if the date is not representable.
    pub fn parse(layout: &str, value: &str) -> Result<Self, Error> {
        let date = NaiveDate::parse_from_str(value, layout)
            .map_err(|err| ParseError::Layout(format!("{value:?} with {layout:?}: {err}")))?;
        Self::from_naive(date)
    }

    /// Parses the canonical `YYYY-MM-DD` form. Same as `str::parse`.
    ///
    /// # Errors
    /// See the `FromStr` implementation.
    pub fn parse_rfc3339(value: &str) -> Result<Self, Error> {
        value.parse()
    }

    /// Like `parse`, but panics on error. Only for literals known to be valid.
    ///
    /// # Panics
    /// If `Date::parse(layout, value)` fails.
    pub fn must_parse(layout: &str, value: &str) -> Self {
        match Self::parse(layout, value) {
            Ok(date) => date,
            Err(err) => panic!("epoch_date: must_parse({layout:?}, {value:?}): {err}"),
        }
    }

    /// Like `parse_rfc3339`, but panics on error. Only for literals known to
    /// be valid.
    ///
    /// # Panics
    /// If `Date::parse_rfc3339(value)` fails.
    pub fn must_parse_rfc3339(value: &str) -> Self {
        match Self::parse_rfc3339(value) {
            Ok(date) => date,
            Err(err) => panic!("epoch_date: must_parse_rfc3339({value:?}): {err}"),
        }
    }

    /// Seconds since the Unix epoch at the start of this date, taken as a UTC
    /// date.
    pub const fn unix(self) -> i64 {
        self.0 as i64 * SECONDS_PER_DAY
    }

    /// Like `unix`, in nanoseconds.
    pub const fn unix_nanos(self) -> i64 {
        self.unix() * NANOS_PER_SECOND
    }

    /// The month containing this date.
    pub fn year_month(self) -> YearMonth {
        YearMonth::from(self)
    }

    /// True for the zero value, 1970-01-01.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Equivalent to `is_zero`.
    pub const fn is_min(self) -> bool {
        self.0 == 0
    }

    /// True for 2149-06-06.
    pub const fn is_max(self) -> bool {
        self.0 == MAX_ORDINAL
    }

    /// The civil date.
    pub fn naive(self) -> NaiveDate {
        epoch() + Days::new(u64::from(self.0))
    }

    /// Returns `(year, month, day)`, month and day 1-based.
    pub fn ymd(self) -> (i32, u32, u32) {
        let date = self.naive();
        (date.year(), date.month(), date.day())
    }

    /// Midnight UTC at the start of this date.
    pub fn to_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.naive().and_time(NaiveTime::MIN))
    }

    /// Midnight in the system's local zone at the start of this date.
    pub fn to_local(self) -> DateTime<Local> {
        self.in_tz(&Local)
    }

    /// Midnight in `tz` at the start of this date. The wall clock of the
    /// result reads `00:00:00` on the same civil day, whatever the zone.
    pub fn in_tz<Tz: TimeZone>(self, tz: &Tz) -> DateTime<Tz> {
        let t = self.to_utc().with_timezone(tz);
        let offset = i64::from(t.offset().fix().local_minus_utc());
        t - TimeDelta::seconds(offset)
    }

    /// Formats midnight UTC of this date with a strftime-style layout.
    /// Time-of-day fields render as `00:00:00`.
    ///
    /// # Errors
    /// Returns `ParseError::Layout` if `layout` has a specifier chrono does
    /// not know, such as `%Q` or a trailing `%`.
    pub fn format(self, layout: &str) -> Result<String, Error> {
        Ok(format_layout(&self.to_utc(), layout)?)
    }
}

fn local_seconds<Tz: TimeZone>(t: &DateTime<Tz>) -> i64 {
    let offset = i64::from(t.offset().fix().local_minus_utc());
    t.timestamp().saturating_add(offset)
}

fn swallow(result: Result<Date, Error>) -> Date {
    result.unwrap_or_else(|err| {
        log::warn!("current date is not representable, using {}: {err}", Date::MIN);
        Date::MIN
    })
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.ymd();
        write!(f, "{year:04}-{month:02}-{day:02}")
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Strictly parses `YYYY-MM-DD`. Out-of-range dates are an error, never
    /// clamped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_naive(scan_date(s)?)
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_naive(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.naive()
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Reads the `YYYY-MM-DD` string form. JSON `null` is an error here; declare
/// the field as `Option<Date>` to accept it, or keep the current value with
/// `Ordinal::update_from_text(None)`.
impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//! Compact dates as 16-bit ordinals since the Unix epoch.
//!
//! [`Date`] counts whole days since 1970-01-01 and covers 1970-01-01 through
//! 2149-06-06. [`YearMonth`] counts whole months since 1970-01 and covers
//! 1970-01 through 7431-04. Both take 2 bytes, against 12 or more for a
//! `chrono::DateTime`.
//!
//! Every constructor comes in three flavors: a strict one returning
//! `Error::OutOfRange` for unrepresentable input (`Date::from_unix`), a
//! `clamp_*` one saturating to the nearest bound (`Date::clamp_from_unix`),
//! and a `*_with` one taking a [`RangePolicy`]. Syntax errors are reported
//! regardless of policy.
//!
//! Calendar and timezone work is delegated to `chrono`. Leap seconds are not
//! handled.
//!
//! ```
//! use epoch_date::{Date, Ordinal, YearMonth};
//!
//! let date: Date = "2024-02-29".parse().unwrap();
//! assert_eq!(date.year_month(), YearMonth::clamp_from_ym(2024, 2));
//! assert_eq!((date + 1).to_text(), "2024-03-01");
//! assert_eq!(Date::clamp_from_unix(-1), Date::MIN);
//! ```

mod consts;
mod date;
mod error;
mod ordinal;
mod policy;
mod prelude;
mod year_month;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use date::Date;
pub use error::{Error, OrdinalKind, ParseError};
pub use ordinal::Ordinal;
pub use policy::RangePolicy;
pub use year_month::YearMonth;

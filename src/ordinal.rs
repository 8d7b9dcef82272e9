//! The bounded ordinal shared by [`Date`](crate::Date) and
//! [`YearMonth`](crate::YearMonth): a `u16` counting whole calendar units
//! since the 1970 epoch.

use std::{fmt, fmt::Write, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    DATE_SEPARATOR, DECEMBER, Error, JANUARY, MAX_ORDINAL, OrdinalKind, ParseError, RangePolicy,
    consts::{FIELD_WIDTH, YEAR_WIDTH},
};

/// Behavior common to the epoch ordinals.
///
/// Implementors are thin `u16` newtypes. `raw` arguments are signed counts of
/// the implementor's unit since its epoch, before any range check.
pub trait Ordinal: Copy + From<u16> + Into<u16> + FromStr<Err = Error> + fmt::Display {
    /// Identifies the type in range errors.
    const KIND: OrdinalKind;

    /// Builds a value from a raw unit count, applying `policy` if the count
    /// is outside `[0, 65535]`.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` for out-of-range counts under
    /// `RangePolicy::Strict`.
    fn from_raw(raw: i64, policy: RangePolicy) -> Result<Self, Error> {
        if let Ok(value) = u16::try_from(raw) {
            return Ok(Self::from(value));
        }

        let saturated = saturate(raw);
        if policy.clamps() {
            log::trace!("clamped raw ordinal {raw} to {saturated}: {}", Self::KIND);
            Ok(Self::from(saturated))
        } else {
            Err(Error::OutOfRange {
                kind: Self::KIND,
                saturated,
            })
        }
    }

    /// Like `from_raw` with `RangePolicy::Clamp`, which cannot fail.
    fn clamp_raw(raw: i64) -> Self {
        Self::from(saturate(raw))
    }

    /// Returns the underlying ordinal.
    fn get(self) -> u16 {
        self.into()
    }

    /// Decodes the canonical text form from UTF-8 bytes.
    ///
    /// # Errors
    /// Returns `Error::Parse` for malformed input and `Error::OutOfRange` for
    /// well formed input outside the representable range. Never clamps.
    fn from_text(text: &[u8]) -> Result<Self, Error> {
        std::str::from_utf8(text)
            .map_err(|_| ParseError::InvalidUtf8)?
            .parse()
    }

    /// Encodes the canonical text form.
    fn to_text(&self) -> String {
        self.to_string()
    }

    /// Decodes `token` into `self`. A `None` token (null or absent in the
    /// source format) leaves `self` unchanged, as does a failed decode.
    ///
    /// # Errors
    /// Same as [`Ordinal::from_text`].
    fn update_from_text(&mut self, token: Option<&[u8]>) -> Result<(), Error> {
        if let Some(text) = token {
            *self = Self::from_text(text)?;
        }
        Ok(())
    }
}

/// Nearest representable raw value.
fn saturate(raw: i64) -> u16 {
    u16::try_from(raw).unwrap_or(if raw < 0 { 0 } else { MAX_ORDINAL })
}

/// Strictly scans `YYYY-MM-DD`.
///
/// Every field must have its exact width in ASCII digits. The month must be
/// 1-12 and the day must exist in that month.
pub(crate) fn scan_date(s: &str) -> Result<NaiveDate, ParseError> {
    let [year, month, day] = split_fields::<3>(s)?;
    let (year, month) = scan_year_and_month(year, month, s)?;
    let day = scan_field(day, FIELD_WIDTH, s)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDay { year, month, day })
}

/// Strictly scans `YYYY-MM`, returning the year and 1-based month.
pub(crate) fn scan_year_month(s: &str) -> Result<(i32, u32), ParseError> {
    let [year, month] = split_fields::<2>(s)?;
    scan_year_and_month(year, month, s)
}

fn split_fields<const N: usize>(s: &str) -> Result<[&str; N], ParseError> {
    if s.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
    parts
        .try_into()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

fn scan_year_and_month(year: &str, month: &str, input: &str) -> Result<(i32, u32), ParseError> {
    let year = scan_field(year, YEAR_WIDTH, input)?;
    let year = i32::try_from(year).map_err(|_| ParseError::InvalidFormat(input.to_owned()))?;
    let month = scan_field(month, FIELD_WIDTH, input)?;
    if !(JANUARY..=DECEMBER).contains(&month) {
        return Err(ParseError::InvalidMonth(month));
    }
    Ok((year, month))
}

fn scan_field(field: &str, width: usize, input: &str) -> Result<u32, ParseError> {
    if field.len() != width || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(input.to_owned()));
    }
    field
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidFormat(input.to_owned()))
}

/// Renders `t` with a strftime-style `layout`.
///
/// chrono reports unknown specifiers only while writing, so the output is
/// collected here and a failed write becomes `ParseError::Layout`.
pub(crate) fn format_layout(t: &DateTime<Utc>, layout: &str) -> Result<String, ParseError> {
    let mut out = String::new();
    write!(out, "{}", t.format(layout))
        .map_err(|_| ParseError::Layout(format!("unsupported specifier in {layout:?}")))?;
    Ok(out)
}

/// Implements wrapping `u16` arithmetic for an ordinal newtype. Arithmetic
/// never clamps: stepping past either end wraps around.
macro_rules! wrapping_arithmetic {
    ($ty:ident) => {
        impl std::ops::Add<u16> for $ty {
            type Output = Self;

            fn add(self, rhs: u16) -> Self {
                Self(self.0.wrapping_add(rhs))
            }
        }

        impl std::ops::Sub<u16> for $ty {
            type Output = Self;

            fn sub(self, rhs: u16) -> Self {
                Self(self.0.wrapping_sub(rhs))
            }
        }

        impl std::ops::AddAssign<u16> for $ty {
            fn add_assign(&mut self, rhs: u16) {
                self.0 = self.0.wrapping_add(rhs);
            }
        }

        impl std::ops::SubAssign<u16> for $ty {
            fn sub_assign(&mut self, rhs: u16) {
                self.0 = self.0.wrapping_sub(rhs);
            }
        }

        impl $ty {
            /// The next value, wrapping from the maximum to zero.
            pub const fn succ(self) -> Self {
                Self(self.0.wrapping_add(1))
            }

            /// The previous value, wrapping from zero to the maximum.
            pub const fn pred(self) -> Self {
                Self(self.0.wrapping_sub(1))
            }
        }
    };
}

pub(crate) use wrapping_arithmetic;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, YearMonth};

    #[test]
    fn test_from_raw_cases() {
        struct TestCase {
            raw:         i64,
            policy:      RangePolicy,
            expected:    Result<u16, u16>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                raw:         0,
                policy:      RangePolicy::Strict,
                expected:    Ok(0),
                description: "zero is in range",
            },
            TestCase {
                raw:         65535,
                policy:      RangePolicy::Strict,
                expected:    Ok(65535),
                description: "max is in range",
            },
            TestCase {
                raw:         -1,
                policy:      RangePolicy::Strict,
                expected:    Err(0),
                description: "underflow errors",
            },
            TestCase {
                raw:         65536,
                policy:      RangePolicy::Strict,
                expected:    Err(65535),
                description: "overflow errors",
            },
            TestCase {
                raw:         i64::MIN,
                policy:      RangePolicy::Clamp,
                expected:    Ok(0),
                description: "underflow clamps",
            },
            TestCase {
                raw:         i64::MAX,
                policy:      RangePolicy::Clamp,
                expected:    Ok(65535),
                description: "overflow clamps",
            },
        ];

        for case in &cases {
            let got = Date::from_raw(case.raw, case.policy).map(Date::get);
            match case.expected {
                Ok(value) => assert_eq!(got, Ok(value), "{}", case.description),
                Err(saturated) => assert_eq!(
                    got,
                    Err(Error::OutOfRange {
                        kind: OrdinalKind::Date,
                        saturated,
                    }),
                    "{}",
                    case.description
                ),
            }
        }
    }

    #[test]
    fn test_clamp_raw() {
        assert_eq!(YearMonth::clamp_raw(-5).get(), 0);
        assert_eq!(YearMonth::clamp_raw(12).get(), 12);
        assert_eq!(YearMonth::clamp_raw(1 << 20).get(), 65535);
    }

    #[test]
    fn test_range_error_kind_follows_type() {
        let err = YearMonth::from_raw(-1, RangePolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange {
                kind: OrdinalKind::YearMonth,
                ..
            }
        ));
    }

    #[test]
    fn test_scan_date() {
        assert_eq!(scan_date("2024-02-29"), Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
    }

    #[test]
    fn test_scan_year_month() {
        assert_eq!(scan_year_month("7431-04"), Ok((7431, 4)));
    }

    #[test]
    fn test_scan_rejections() {
        struct TestCase {
            input:    &'static str,
            with_day: bool,
            expected: ParseError,
        }

        let cases = [
            TestCase {
                input:    "",
                with_day: true,
                expected: ParseError::EmptyInput,
            },
            TestCase {
                input:    "blah",
                with_day: true,
                expected: ParseError::InvalidFormat("blah".into()),
            },
            TestCase {
                input:    "1970-1-01",
                with_day: true,
                expected: ParseError::InvalidFormat("1970-1-01".into()),
            },
            TestCase {
                input:    "70-01-01",
                with_day: true,
                expected: ParseError::InvalidFormat("70-01-01".into()),
            },
            TestCase {
                input:    "+970-01-01",
                with_day: true,
                expected: ParseError::InvalidFormat("+970-01-01".into()),
            },
            TestCase {
                input:    "1970-01",
                with_day: true,
                expected: ParseError::InvalidFormat("1970-01".into()),
            },
            TestCase {
                input:    "1970-01-01",
                with_day: false,
                expected: ParseError::InvalidFormat("1970-01-01".into()),
            },
            TestCase {
                input:    "1970-13",
                with_day: false,
                expected: ParseError::InvalidMonth(13),
            },
            TestCase {
                input:    "2021-02-29",
                with_day: true,
                expected: ParseError::InvalidDay {
                    year:  2021,
                    month: 2,
                    day:   29,
                },
            },
            TestCase {
                input:    "2021-04-00",
                with_day: true,
                expected: ParseError::InvalidDay {
                    year:  2021,
                    month: 4,
                    day:   0,
                },
            },
        ];

        for case in &cases {
            let got = if case.with_day {
                scan_date(case.input).map(drop)
            } else {
                scan_year_month(case.input).map(drop)
            };
            assert_eq!(got, Err(case.expected.clone()), "input {:?}", case.input);
        }
    }

    #[test]
    fn test_format_layout_rejects_unknown_specifiers() {
        let t = Date::MIN.to_utc();
        assert_eq!(format_layout(&t, "%Y-%m"), Ok("1970-01".to_owned()));
        for layout in ["%Y-%Q", "%"] {
            assert!(
                matches!(format_layout(&t, layout), Err(ParseError::Layout(_))),
                "layout {layout:?}"
            );
        }
    }

    #[test]
    fn test_update_from_text_none_is_noop() {
        let mut date = Date::from(123);
        date.update_from_text(None).unwrap();
        assert_eq!(date.get(), 123);
    }

    #[test]
    fn test_update_from_text_assigns() {
        let mut ym = YearMonth::from(5);
        ym.update_from_text(Some(b"1971-01")).unwrap();
        assert_eq!(ym.get(), 12);
    }

    #[test]
    fn test_update_from_text_error_keeps_value() {
        let mut date = Date::from(7);
        assert!(date.update_from_text(Some(b"blah")).is_err());
        assert_eq!(date.get(), 7);
    }

    #[test]
    fn test_from_text_rejects_invalid_utf8() {
        let result = Date::from_text(&[0xff, 0xfe]);
        assert_eq!(result, Err(Error::Parse(ParseError::InvalidUtf8)));
    }
}

use crate::prelude::*;

/// Which ordinal type a range error refers to.
/// The display form is the human readable valid range of that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum OrdinalKind {
    #[display(fmt = "dates must be in the range [1970-01-01,2149-06-06]")]
    Date,
    #[display(fmt = "year-months must be in the range [1970-01,7431-04]")]
    YearMonth,
}

/// Syntax errors from decoding text. These are reported regardless of the
/// configured `RangePolicy`, which only governs range errors.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {_0} (must be 1-12)")]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
    #[display(fmt = "Input is not valid UTF-8")]
    InvalidUtf8,
    #[display(fmt = "Input does not match layout: {_0}")]
    Layout(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Error type for every fallible constructor in the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The computed ordinal does not fit in `[0, 65535]`.
    /// `saturated` is the nearest representable raw value.
    #[error("epoch_date: {kind}")]
    OutOfRange { kind: OrdinalKind, saturated: u16 },

    /// The input text matched none of the accepted layouts.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns the boundary value a clamping constructor would have produced,
    /// if this is a range error.
    pub const fn saturated(&self) -> Option<u16> {
        match self {
            Self::OutOfRange { saturated, .. } => Some(*saturated),
            Self::Parse(_) => None,
        }
    }

    /// True for `Error::OutOfRange`.
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Seconds in one `Date` unit. Leap seconds are not accounted for.
pub const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Nanoseconds per second, for `Date::unix_nanos`
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Months in one year, the stride of `YearMonth` per year
pub const MONTHS_PER_YEAR: i64 = 12;

/// Year of the epoch shared by `Date` and `YearMonth`
pub const EPOCH_YEAR: i32 = 1970;

/// Largest raw ordinal value of either type
pub const MAX_ORDINAL: u16 = u16::MAX;

/// Last Unix second that still falls on `Date::MAX` (2149-06-06T23:59:59Z)
pub const MAX_UNIX: i64 = (MAX_ORDINAL as i64 + 1) * SECONDS_PER_DAY - 1;

/// First month of the year, used as the lower bound for month numbers
pub const JANUARY: u32 = 1;
/// Last month of the year
pub const DECEMBER: u32 = 12;

/// First day of month
pub const MIN_DAY: u32 = 1;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// strftime layout of the canonical `Date` text form
pub const RFC3339: &str = "%Y-%m-%d";
/// strftime layout of the canonical `YearMonth` text form
pub const RFC3339_YEAR_MONTH: &str = "%Y-%m";
/// Unpadded month-first layout with a two digit year, e.g. `3-26-19`
pub const AMERICAN_SHORT: &str = "%-m-%-d-%y";
/// Zero padded month-first layout with a two digit year, e.g. `03-26-19`
pub const AMERICAN_COMMON: &str = "%m-%d-%y";

/// Digits in the fixed-width year field
pub(crate) const YEAR_WIDTH: usize = 4;
/// Digits in the fixed-width month and day fields
pub(crate) const FIELD_WIDTH: usize = 2;

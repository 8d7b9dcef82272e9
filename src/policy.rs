use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ParseError, prelude::*};

/// Selects what a constructor does with an input that is well formed but
/// falls outside the representable range.
///
/// This is the configuration passed to the `*_with` constructors. The
/// plain-named constructors always behave as [`RangePolicy::Strict`] and the
/// `clamp_*` constructors always behave as [`RangePolicy::Clamp`]; prefer
/// those when the behavior is known at the call site.
///
/// Clamping never affects syntax errors, and never applies to arithmetic on
/// the raw values, which wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Return `Error::OutOfRange`.
    #[default]
    #[display(fmt = "strict")]
    Strict,
    /// Saturate to the nearest representable value.
    #[display(fmt = "clamp")]
    Clamp,
}

impl RangePolicy {
    /// True for `RangePolicy::Clamp`.
    pub const fn clamps(self) -> bool {
        matches!(self, Self::Clamp)
    }
}

impl From<bool> for RangePolicy {
    fn from(clamp: bool) -> Self {
        if clamp { Self::Clamp } else { Self::Strict }
    }
}

impl FromStr for RangePolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "clamp" => Ok(Self::Clamp),
            "" => Err(ParseError::EmptyInput),
            _ => Err(ParseError::InvalidFormat(s.to_owned())),
        }
    }
}

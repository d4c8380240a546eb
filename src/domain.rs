//! The four number domains a quantified statement can range over, and the
//! check that a typed value belongs to one of them.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Naturals,
    Integers,
    Rationals,
    Reals,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Naturals,
        Domain::Integers,
        Domain::Rationals,
        Domain::Reals,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Domain::Naturals => "ℕ",
            Domain::Integers => "ℤ",
            Domain::Rationals => "ℚ",
            Domain::Reals => "ℝ",
        }
    }

    /// The singular noun used when reading a statement aloud.
    pub fn noun(self) -> &'static str {
        match self {
            Domain::Naturals => "natural number",
            Domain::Integers => "integer",
            Domain::Rationals => "rational number",
            Domain::Reals => "real number",
        }
    }

    /// Checks that `value` parses as a number that belongs to this domain and
    /// returns it.
    ///
    /// Values arrive as decimal text, so ℚ cannot be told apart from ℝ: any
    /// finite number is accepted as rational. ℝ accepts every number,
    /// including the infinities.
    pub fn check_membership(self, value: &str) -> Result<f64, Error> {
        let number = parse_number(value)?;
        let reason = match self {
            Domain::Naturals if !is_integer(number) => Some("natural numbers are whole numbers"),
            Domain::Naturals if number < 0.0 => Some("natural numbers are not negative"),
            Domain::Integers if !is_integer(number) => Some("integers are whole numbers"),
            Domain::Rationals if !number.is_finite() => Some("rational numbers are finite"),
            _ => None,
        };
        match reason {
            None => Ok(number),
            Some(reason) => Err(Error::NotInDomain {
                value: value.trim().to_string(),
                domain: self,
                reason,
            }),
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Domain::ALL
            .into_iter()
            .find(|domain| domain.symbol() == s)
            .ok_or_else(|| Error::InvalidDomain(s.to_string()))
    }
}

/// Parses a typed value as a floating point number.
///
/// Unlike a lenient prefix parse, trailing garbage such as `"4abc"` is
/// rejected. `"NaN"` parses but is not a number either.
pub fn parse_number(value: &str) -> Result<f64, Error> {
    match value.trim().parse::<f64>() {
        Ok(number) if !number.is_nan() => Ok(number),
        _ => Err(Error::NotANumber(value.trim().to_string())),
    }
}

pub(crate) fn is_integer(number: f64) -> bool {
    number.is_finite() && number.fract() == 0.0
}

/// Checks that `value` belongs to the domain named by `domain`.
pub fn validate_domain_membership(domain: &str, value: &str) -> Result<f64, Error> {
    domain.parse::<Domain>()?.check_membership(value)
}

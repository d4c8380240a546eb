//! Evaluation of the small, closed set of predicates the tutor understands.
//!
//! Predicates are free text. Rather than parse them, the evaluator looks for
//! one of a handful of recognized phrases, in priority order, and the first
//! phrase found decides what the predicate means. Anything else is rejected.

use crate::domain::{is_integer, parse_number};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKind {
    /// "x is even"
    Even,
    /// "x is odd"
    Odd,
    /// anything mentioning "≥ 0", compared against x itself
    NonNegative,
    /// "x² = -1", which no real number satisfies
    SquareIsMinusOne,
}

impl PredicateKind {
    /// Recognized phrases, checked in this order.
    const PATTERNS: [(&'static str, PredicateKind); 4] = [
        ("even", PredicateKind::Even),
        ("odd", PredicateKind::Odd),
        ("≥ 0", PredicateKind::NonNegative),
        ("x² = -1", PredicateKind::SquareIsMinusOne),
    ];

    pub fn recognize(predicate: &str) -> Result<Self, Error> {
        Self::PATTERNS
            .iter()
            .find(|(phrase, _)| predicate.contains(phrase))
            .map(|&(_, kind)| kind)
            .ok_or_else(|| Error::UnsupportedPredicate(predicate.trim().to_string()))
    }

    pub fn holds_for(self, x: f64) -> bool {
        match self {
            PredicateKind::Even => is_integer(x) && x % 2.0 == 0.0,
            PredicateKind::Odd => is_integer(x) && x % 2.0 != 0.0,
            PredicateKind::NonNegative => x >= 0.0,
            PredicateKind::SquareIsMinusOne => x * x == -1.0,
        }
    }
}

/// Decides whether `value` satisfies `predicate`.
pub fn evaluate_predicate(predicate: &str, value: &str) -> Result<bool, Error> {
    let x = parse_number(value)?;
    let kind = PredicateKind::recognize(predicate)?;
    let satisfies = kind.holds_for(x);
    log::debug!("{predicate:?} read as {kind:?}, {x} satisfies it: {satisfies}");
    Ok(satisfies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn even_and_odd() {
        assert!(evaluate_predicate("x is even", "4").unwrap());
        assert!(!evaluate_predicate("x is even", "3").unwrap());
        assert!(evaluate_predicate("x is odd", "-3").unwrap());
        assert!(!evaluate_predicate("x is odd", "2.5").unwrap());
        assert!(!evaluate_predicate("x is even", "2.5").unwrap());
    }

    #[test]
    fn first_recognized_phrase_wins() {
        // "even" is checked before "≥ 0"
        assert!(!evaluate_predicate("x is even and x ≥ 0", "3").unwrap());
        assert_eq!(
            PredicateKind::recognize("x² ≥ 0").unwrap(),
            PredicateKind::NonNegative
        );
        // the comparison is made against x itself
        assert!(!evaluate_predicate("x² ≥ 0", "-2").unwrap());
    }

    #[test]
    fn square_is_never_minus_one() {
        for value in ["-1", "0", "1", "1e9"] {
            assert!(!evaluate_predicate("x² = -1", value).unwrap());
        }
    }

    #[test]
    fn rejects_unknown_predicates_and_values() {
        assert_eq!(
            evaluate_predicate("x is prime", "7").unwrap_err().kind(),
            ErrorKind::UnsupportedPredicate
        );
        assert_eq!(
            evaluate_predicate("x is even", "four").unwrap_err().kind(),
            ErrorKind::NotANumber
        );
    }
}

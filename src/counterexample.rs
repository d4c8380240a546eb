use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::{evaluate_predicate, Domain, Error, ErrorKind};

/// The shape of the statement a test value is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementType {
    /// ∀x, P(x). Disproved by a value that fails P.
    Universal,
    /// ∃x, P(x). Shown true by a value that satisfies P.
    Existential,
    /// No x satisfies P, i.e. ∀x, ¬P(x). Disproved by a value that satisfies P.
    No,
}

impl StatementType {
    pub fn name(self) -> &'static str {
        match self {
            StatementType::Universal => "universal",
            StatementType::Existential => "existential",
            StatementType::No => "no",
        }
    }
}

impl Display for StatementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "universal" => Ok(StatementType::Universal),
            "existential" => Ok(StatementType::Existential),
            "no" => Ok(StatementType::No),
            other => Err(Error::InvalidStatementType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Counterexample,
    Example,
    NotCounterexample,
    NotExample,
}

impl Verdict {
    /// The mistake a rejected verdict is recorded as, `None` when accepted.
    pub fn mistake(self) -> Option<ErrorKind> {
        match self {
            Verdict::Counterexample | Verdict::Example => None,
            Verdict::NotCounterexample => Some(ErrorKind::NotCounterexample),
            Verdict::NotExample => Some(ErrorKind::NotExample),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    pub valid: bool,
    pub verdict: Verdict,
    pub message: String,
}

/// Decides whether `test_value` is a counterexample to (or, for an
/// existential statement, an example of) the statement described by
/// `statement_type`, `domain` and `predicate`.
///
/// The value must first belong to the domain and the predicate must be one
/// the evaluator understands; either failure is returned as an error.
pub fn validate_counterexample(
    statement_type: &str,
    domain: &str,
    predicate: &str,
    test_value: &str,
) -> Result<VerificationResult, Error> {
    let domain = domain.parse::<Domain>()?;
    domain.check_membership(test_value)?;
    let satisfies = evaluate_predicate(predicate, test_value)?;
    let statement_type = statement_type.parse::<StatementType>()?;

    let value = test_value.trim();
    let predicate = predicate.trim();
    let (verdict, message) = match (statement_type, satisfies) {
        (StatementType::Universal, false) => (
            Verdict::Counterexample,
            format!(
                "{value} is a counterexample: it does not satisfy \"{predicate}\", so \"∀x ∈ {domain}, {predicate}\" is false."
            ),
        ),
        (StatementType::Universal, true) => (
            Verdict::NotCounterexample,
            format!("{value} satisfies \"{predicate}\", so it's not a counterexample."),
        ),
        (StatementType::Existential, true) => (
            Verdict::Example,
            format!(
                "{value} is an example: it satisfies \"{predicate}\", so \"∃x ∈ {domain}, {predicate}\" is true."
            ),
        ),
        (StatementType::Existential, false) => (
            Verdict::NotExample,
            format!("{value} does not satisfy \"{predicate}\", so it's not an example."),
        ),
        (StatementType::No, true) => (
            Verdict::Counterexample,
            format!(
                "{value} is a counterexample: it satisfies \"{predicate}\", so it is false that no x ∈ {domain} does."
            ),
        ),
        (StatementType::No, false) => (
            Verdict::NotCounterexample,
            format!("{value} does not satisfy \"{predicate}\", so it's not a counterexample."),
        ),
    };
    log::debug!("{statement_type} statement over {domain}, {value}: {verdict:?}");
    Ok(VerificationResult {
        valid: verdict.mistake().is_none(),
        verdict,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(statement_type: &str, domain: &str, predicate: &str, value: &str) -> Verdict {
        validate_counterexample(statement_type, domain, predicate, value)
            .unwrap()
            .verdict
    }

    #[test]
    fn odd_integer_breaks_all_even() {
        let result = validate_counterexample("universal", "ℤ", "x is even", "3").unwrap();
        assert!(result.valid);
        assert_eq!(result.verdict, Verdict::Counterexample);
        assert_eq!(
            verdict("universal", "ℤ", "x is even", "4"),
            Verdict::NotCounterexample
        );
    }

    #[test]
    fn existential_needs_a_satisfying_value() {
        assert_eq!(verdict("existential", "ℕ", "x is even", "4"), Verdict::Example);
        let result = validate_counterexample("existential", "ℕ", "x is even", "5").unwrap();
        assert!(!result.valid);
        assert_eq!(result.verdict, Verdict::NotExample);
    }

    #[test]
    fn no_statement_is_disproved_by_a_satisfying_value() {
        assert_eq!(verdict("no", "ℤ", "x is odd", "7"), Verdict::Counterexample);
        assert_eq!(verdict("no", "ℤ", "x is odd", "8"), Verdict::NotCounterexample);
        assert_eq!(verdict("no", "ℝ", "x² = -1", "1"), Verdict::NotCounterexample);
    }

    #[test]
    fn input_errors_come_first() {
        let kind = |t, d, p, v| validate_counterexample(t, d, p, v).unwrap_err().kind();
        assert_eq!(kind("universal", "ℕ", "x is even", "-1"), ErrorKind::NotInDomain);
        assert_eq!(kind("universal", "ℕ", "x is even", "x"), ErrorKind::NotANumber);
        assert_eq!(kind("universal", "ℕ", "x is prime", "2"), ErrorKind::UnsupportedPredicate);
        assert_eq!(kind("sometimes", "ℕ", "x is even", "2"), ErrorKind::InvalidStatementType);
        assert_eq!(kind("universal", "ℂ", "x is even", "2"), ErrorKind::InvalidDomain);
    }

    #[test]
    fn verdict_message_explains_itself() {
        let result = validate_counterexample("universal", "ℤ", "x is even", "3").unwrap();
        assert_eq!(
            result.message,
            "3 is a counterexample: it does not satisfy \"x is even\", so \"∀x ∈ ℤ, x is even\" is false."
        );
    }
}

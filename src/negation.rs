//! Guided negation of a quantified statement.
//!
//! A derivation moves through four guarded steps: the statement is chosen,
//! its quantifier is switched (∀ ↔ ∃), its predicate is negated, and the
//! result is finalized. Each step is only taken if the text it produces
//! passes the matching check, so a derivation can never reach the final step
//! without a correct switch and a correct negation.

use std::fmt::{self, Display, Formatter};

use crate::util::normalize_whitespace;
use crate::{Error, Quantifier};

/// Statements offered to the student. Any other non-empty statement may be
/// negated as well.
pub const PRESET_STATEMENTS: [&str; 6] = [
    "∀x ∈ ℝ, x² ≥ 0",
    "∃x ∈ ℕ, x is even",
    "∀x ∈ ℤ, x is odd",
    "No x ∈ ℝ, x² = -1",
    "∃x ∈ ℤ, ¬(x ≥ 0)",
    "∀x ∈ ℕ, x ≥ 0",
];

/// What [`switched_form`] yields for a statement it cannot switch. It fails
/// the quantifier check, so the mistake surfaces at that gate.
pub const INVALID_FORMAT: &str = "Invalid statement format";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Step {
    #[default]
    Empty,
    Started,
    QuantifierSwitched,
    PredicateNegated,
    Finalized,
}

impl Step {
    pub fn index(self) -> u8 {
        match self {
            Step::Empty => 0,
            Step::Started => 1,
            Step::QuantifierSwitched => 2,
            Step::PredicateNegated => 3,
            Step::Finalized => 4,
        }
    }

    pub fn next_action(self) -> &'static str {
        match self {
            Step::Empty => "choose a statement",
            Step::Started => "switch the quantifier",
            Step::QuantifierSwitched => "negate the predicate",
            Step::PredicateNegated => "finalize the negation",
            Step::Finalized => "reset to start another derivation",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegationDerivation {
    original_statement: String,
    step: Step,
    switched_quantifier: String,
    negated_predicate: String,
    final_result: String,
}

impl NegationDerivation {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn original_statement(&self) -> &str {
        &self.original_statement
    }

    pub fn switched_quantifier(&self) -> &str {
        &self.switched_quantifier
    }

    pub fn negated_predicate(&self) -> &str {
        &self.negated_predicate
    }

    pub fn final_result(&self) -> &str {
        &self.final_result
    }

    fn require(&self, expected: Step, action: &'static str) -> Result<(), Error> {
        if self.step == expected {
            Ok(())
        } else {
            Err(Error::WrongStepOrder {
                action,
                step: self.step,
            })
        }
    }

    /// Begins a new derivation of `statement`, discarding any derivation in
    /// progress.
    pub fn start(&mut self, statement: &str) -> Result<(), Error> {
        let statement = normalize_whitespace(statement);
        if statement.is_empty() {
            return Err(Error::MissingComponent("statement"));
        }
        log::debug!("starting negation of {statement:?}");
        *self = Self {
            original_statement: statement,
            step: Step::Started,
            ..Self::default()
        };
        Ok(())
    }

    pub fn switch_quantifier(&mut self) -> Result<(), Error> {
        self.require(Step::Started, "switch the quantifier")?;
        let switched = switched_form(&self.original_statement);
        self.accept_switch(switched)
    }

    /// Like [`Self::switch_quantifier`], with the switched statement typed by
    /// the student.
    pub fn submit_switch(&mut self, candidate: &str) -> Result<(), Error> {
        self.require(Step::Started, "switch the quantifier")?;
        self.accept_switch(normalize_whitespace(candidate))
    }

    fn accept_switch(&mut self, switched: String) -> Result<(), Error> {
        if !quantifier_switched(&self.original_statement, &switched) {
            return Err(Error::QuantifierNotSwitched {
                original: self.original_statement.clone(),
                switched,
            });
        }
        log::debug!("quantifier switched: {switched:?}");
        self.switched_quantifier = switched;
        self.step = Step::QuantifierSwitched;
        Ok(())
    }

    pub fn negate_predicate(&mut self) -> Result<(), Error> {
        self.require(Step::QuantifierSwitched, "negate the predicate")?;
        let negated = negate_statement(&self.switched_quantifier)?;
        self.accept_negation(negated)
    }

    /// Like [`Self::negate_predicate`], with the negated statement typed by
    /// the student.
    pub fn submit_negation(&mut self, candidate: &str) -> Result<(), Error> {
        self.require(Step::QuantifierSwitched, "negate the predicate")?;
        let expected = negate_statement(&self.switched_quantifier)?;
        let candidate = normalize_whitespace(candidate);
        if candidate != expected {
            return Err(Error::PredicateNotNegated {
                expected,
                actual: candidate,
            });
        }
        self.accept_negation(candidate)
    }

    fn accept_negation(&mut self, negated: String) -> Result<(), Error> {
        if !predicate_negated(&self.original_statement, &negated) {
            let expected = effective_predicate(&self.original_statement)
                .map(|p| negate(&p))
                .unwrap_or_else(|| INVALID_FORMAT.to_string());
            let actual = split_predicate(&negated)
                .map(|(_, p)| p.to_string())
                .unwrap_or(negated);
            return Err(Error::PredicateNotNegated { expected, actual });
        }
        log::debug!("predicate negated: {negated:?}");
        self.negated_predicate = negated;
        self.step = Step::PredicateNegated;
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<(), Error> {
        self.require(Step::PredicateNegated, "finalize")?;
        self.final_result = self.negated_predicate.clone();
        self.step = Step::Finalized;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Display for NegationDerivation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.step == Step::Empty {
            return write!(f, "No statement chosen");
        }
        let steps = [
            ("Original", &self.original_statement),
            ("Switch quantifier", &self.switched_quantifier),
            ("Negate predicate", &self.negated_predicate),
            ("Negation", &self.final_result),
        ];
        write!(f, "Step {}/4", self.step.index())?;
        for (label, text) in steps {
            if !text.is_empty() {
                write!(f, "\n  {label}: {text}")?;
            }
        }
        if self.step != Step::Finalized {
            write!(f, "\n  Next: {}", self.step.next_action())?;
        }
        Ok(())
    }
}

/// Splits the leading quantifier off a statement, returning it and the rest
/// of the statement (`"x ∈ ℝ, x² ≥ 0"`).
fn split_leading_quantifier(statement: &str) -> Option<(Quantifier, &str)> {
    let statement = statement.trim_start();
    let (quantifier, rest) = if let Some(rest) = statement.strip_prefix('∀') {
        (Quantifier::ForAll, rest)
    } else if let Some(rest) = statement.strip_prefix('∃') {
        (Quantifier::Exists, rest)
    } else if let Some(rest) = statement.strip_prefix("No ") {
        (Quantifier::No, rest)
    } else {
        return None;
    };
    Some((quantifier, rest.trim_start()))
}

/// Splits a statement at its first comma into the quantifier-and-domain
/// prefix and the predicate.
fn split_predicate(statement: &str) -> Option<(&str, &str)> {
    let (prefix, predicate) = statement.split_once(',')?;
    let predicate = predicate.trim();
    if predicate.is_empty() {
        None
    } else {
        Some((prefix.trim(), predicate))
    }
}

/// The predicate a statement asserts for every (or some) x. A "No" statement
/// asserts the negation of its written predicate.
fn effective_predicate(statement: &str) -> Option<String> {
    let (quantifier, rest) = split_leading_quantifier(statement)?;
    let (_, predicate) = split_predicate(rest)?;
    Some(match quantifier {
        Quantifier::No => format!("¬({predicate})"),
        _ => predicate.to_string(),
    })
}

/// Removes one pair of parentheses if it encloses the whole of `text`.
fn strip_outer_parens(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return text;
    };
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return text,
            ')' => depth -= 1,
            _ => {}
        }
    }
    if depth == 0 {
        inner.trim()
    } else {
        text
    }
}

/// Negates a predicate, stripping an existing negation rather than stacking
/// a second one.
pub fn negate(predicate: &str) -> String {
    let predicate = predicate.trim();
    match predicate.strip_prefix('¬') {
        Some(inner) => strip_outer_parens(inner).to_string(),
        None => format!("¬({predicate})"),
    }
}

/// The statement with its leading quantifier switched: ∀ becomes ∃, ∃
/// becomes ∀, and "No x ∈ D, P" becomes "∃x ∈ D, ¬(P)".
pub fn switched_form(statement: &str) -> String {
    let switched = match split_leading_quantifier(statement) {
        Some((Quantifier::ForAll, rest)) => format!("∃{rest}"),
        Some((Quantifier::Exists, rest)) => format!("∀{rest}"),
        Some((Quantifier::No, rest)) => match split_predicate(rest) {
            Some((prefix, predicate)) => format!("∃{prefix}, ¬({predicate})"),
            None => return INVALID_FORMAT.to_string(),
        },
        None => return INVALID_FORMAT.to_string(),
    };
    normalize_whitespace(&switched)
}

/// Whether `switched` is `original` with its leading quantifier switched.
pub fn quantifier_switched(original: &str, switched: &str) -> bool {
    let expected = switched_form(original);
    expected != INVALID_FORMAT && normalize_whitespace(switched) == expected
}

/// Whether the predicate of `negated` is the negation of the predicate of
/// `original`.
pub fn predicate_negated(original: &str, negated: &str) -> bool {
    let Some(original) = effective_predicate(original) else {
        return false;
    };
    let Some((_, predicate)) = split_predicate(negated) else {
        return false;
    };
    normalize_whitespace(predicate) == normalize_whitespace(&negate(&original))
}

/// Negates the predicate of a statement, keeping its prefix.
fn negate_statement(statement: &str) -> Result<String, Error> {
    let (prefix, predicate) = split_predicate(statement)
        .ok_or_else(|| Error::InvalidStatementFormat(statement.to_string()))?;
    Ok(format!("{prefix}, {}", negate(predicate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn derive(statement: &str) -> NegationDerivation {
        let mut derivation = NegationDerivation::default();
        derivation.start(statement).unwrap();
        derivation.switch_quantifier().unwrap();
        derivation.negate_predicate().unwrap();
        derivation.finalize().unwrap();
        derivation
    }

    #[test]
    fn negates_universal_statement() {
        let derivation = derive("∀x ∈ ℝ, x² ≥ 0");
        assert_eq!(derivation.step(), Step::Finalized);
        assert_eq!(derivation.switched_quantifier(), "∃x ∈ ℝ, x² ≥ 0");
        assert_eq!(derivation.final_result(), "∃x ∈ ℝ, ¬(x² ≥ 0)");
    }

    #[test]
    fn negates_existential_statement() {
        let derivation = derive("∃x ∈ ℕ, x is even");
        assert_eq!(derivation.final_result(), "∀x ∈ ℕ, ¬(x is even)");
    }

    #[test]
    fn double_negation_is_stripped() {
        let derivation = derive("∀x ∈ ℤ, ¬(x is even)");
        assert_eq!(derivation.final_result(), "∃x ∈ ℤ, x is even");
        assert_eq!(negate("¬x ≥ 0"), "x ≥ 0");
        assert_eq!(negate("¬((x ≥ 0))"), "(x ≥ 0)");
        assert_eq!(negate("(x ≥ 0) ∧ (x ≤ 1)"), "¬((x ≥ 0) ∧ (x ≤ 1))");
    }

    #[test]
    fn no_statement_negates_to_existential() {
        let derivation = derive("No x ∈ ℝ, x² = -1");
        assert_eq!(derivation.switched_quantifier(), "∃x ∈ ℝ, ¬(x² = -1)");
        assert_eq!(derivation.final_result(), "∃x ∈ ℝ, x² = -1");
    }

    #[test]
    fn steps_cannot_be_skipped() {
        let mut derivation = NegationDerivation::default();
        assert_eq!(
            derivation.switch_quantifier().unwrap_err().kind(),
            ErrorKind::WrongStepOrder
        );
        derivation.start("∀x ∈ ℝ, x² ≥ 0").unwrap();
        assert_eq!(
            derivation.negate_predicate().unwrap_err().kind(),
            ErrorKind::WrongStepOrder
        );
        assert_eq!(
            derivation.finalize().unwrap_err().kind(),
            ErrorKind::WrongStepOrder
        );
        assert_eq!(derivation.step(), Step::Started);
        assert_eq!(derivation.step().index(), 1);
    }

    #[test]
    fn unknown_quantifier_fails_the_switch_check() {
        let mut derivation = NegationDerivation::default();
        derivation.start("Every x ∈ ℝ, x ≥ 0").unwrap();
        let err = derivation.switch_quantifier().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QuantifierNotSwitched);
        assert_eq!(derivation.step(), Step::Started);
        assert_eq!(switched_form("Every x ∈ ℝ, x ≥ 0"), INVALID_FORMAT);
    }

    #[test]
    fn statement_without_predicate_cannot_be_negated() {
        let mut derivation = NegationDerivation::default();
        derivation.start("∀x ∈ ℝ x ≥ 0").unwrap();
        derivation.switch_quantifier().unwrap();
        assert_eq!(
            derivation.negate_predicate().unwrap_err().kind(),
            ErrorKind::InvalidStatementFormat
        );
        assert_eq!(derivation.step(), Step::QuantifierSwitched);
    }

    #[test]
    fn student_answers_are_checked() {
        let mut derivation = NegationDerivation::default();
        derivation.start("∀x ∈ ℤ, x is odd").unwrap();
        assert_eq!(
            derivation.submit_switch("∀x ∈ ℤ, x is odd").unwrap_err().kind(),
            ErrorKind::QuantifierNotSwitched
        );
        derivation.submit_switch("∃x ∈ ℤ,   x is odd").unwrap();
        assert_eq!(
            derivation
                .submit_negation("∃x ∈ ℤ, x is even")
                .unwrap_err()
                .kind(),
            ErrorKind::PredicateNotNegated
        );
        derivation.submit_negation("∃x ∈ ℤ, ¬(x is odd)").unwrap();
        derivation.finalize().unwrap();
        assert_eq!(derivation.final_result(), "∃x ∈ ℤ, ¬(x is odd)");
    }

    #[test]
    fn start_requires_a_statement_and_reset_clears() {
        let mut derivation = NegationDerivation::default();
        assert_eq!(
            derivation.start("   ").unwrap_err().kind(),
            ErrorKind::MissingComponent
        );
        derivation.start(PRESET_STATEMENTS[0]).unwrap();
        derivation.switch_quantifier().unwrap();
        derivation.reset();
        assert_eq!(derivation, NegationDerivation::default());
        assert_eq!(derivation.to_string(), "No statement chosen");
    }

    #[test]
    fn checks_compare_predicates() {
        assert!(quantifier_switched("∀x ∈ ℝ, x² ≥ 0", "∃x ∈ ℝ, x² ≥ 0"));
        assert!(!quantifier_switched("∀x ∈ ℝ, x² ≥ 0", "∃x ∈ ℤ, x² ≥ 0"));
        assert!(predicate_negated("∀x ∈ ℝ, x² ≥ 0", "∃x ∈ ℝ, ¬(x² ≥ 0)"));
        assert!(predicate_negated("∀x ∈ ℤ, ¬(x is even)", "∃x ∈ ℤ, x is even"));
        assert!(!predicate_negated("∀x ∈ ℝ, x² ≥ 0", "∃x ∈ ℝ, x² ≥ 0"));
        assert!(!predicate_negated("∀x ∈ ℝ, x² ≥ 0", "∃x ∈ ℝ"));
    }

    #[test]
    fn display_shows_progress() {
        let mut derivation = NegationDerivation::default();
        derivation.start("∀x ∈ ℝ, x² ≥ 0").unwrap();
        derivation.switch_quantifier().unwrap();
        assert_eq!(
            derivation.to_string(),
            "Step 2/4\n  Original: ∀x ∈ ℝ, x² ≥ 0\n  Switch quantifier: ∃x ∈ ℝ, x² ≥ 0\n  Next: negate the predicate"
        );
    }
}

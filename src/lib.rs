//! # logic-tutor
//! logic-tutor is the checking engine behind an interactive discrete-math
//! tutor. It validates quantifier translations, evaluates candidate
//! counterexamples, walks a student through negating a quantified statement
//! one guarded step at a time, and checks applications of inference laws and
//! short line-numbered proofs.
//!
//! Everything is driven through a [`LogicTutor`] session, which owns the
//! negation derivation in progress and the per-category [`ProgressTracker`].
//! The same operations are also reachable through a small line-oriented
//! command language, see [`LogicTutor::run_program`].
//!
pub mod cli;
pub mod command;
pub mod counterexample;
pub mod domain;
pub mod laws;
pub mod negation;
pub mod predicate;
pub mod progress;
pub mod proof;
pub mod quantifier;
mod repl;
pub mod util;

use std::path::PathBuf;

use thiserror::Error;

pub use counterexample::{validate_counterexample, StatementType, Verdict, VerificationResult};
pub use domain::{validate_domain_membership, Domain};
pub use laws::{check_law_preconditions, Law, LawCheck};
pub use negation::{NegationDerivation, Step, PRESET_STATEMENTS};
pub use predicate::{evaluate_predicate, PredicateKind};
pub use progress::{Category, CategoryProgress, ProgressTracker};
pub use proof::{validate_proof, validate_proof_line, Justification, Proof, ProofLine};
pub use quantifier::{validate_quantifier_translation, QuantifiedStatement, Quantifier};

/// Settings for a tutor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorConfig {
    /// When set, calling a negation step out of order fails with
    /// [`Error::WrongStepOrder`]. Otherwise the call is ignored and leaves
    /// both the derivation and the progress counters untouched.
    pub strict_step_order: bool,
    /// Whether scripts report the output of each command.
    pub messages: bool,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            strict_step_order: true,
            messages: true,
        }
    }
}

/// A single student's session with the tutor.
///
/// Every checking operation counts as an attempt in its [`Category`], whether
/// it succeeds or fails. Failures record the [`ErrorKind`] (or verdict) as the
/// category's last mistake.
#[derive(Debug, Clone, Default)]
pub struct LogicTutor {
    config: TutorConfig,
    derivation: NegationDerivation,
    progress: ProgressTracker,
    pending_proof: Option<Proof>,
}

impl LogicTutor {
    pub fn new(config: TutorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    pub fn disable_messages(&mut self) {
        self.config.messages = false;
    }

    pub fn derivation(&self) -> &NegationDerivation {
        &self.derivation
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn reset_progress(&mut self) {
        self.progress.reset();
    }

    /// Counts `result` as an attempt in `category` and hands it back.
    fn tracked<T>(&mut self, category: Category, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.progress.record_success(category),
            Err(err) => self.progress.record_mistake(category, err.kind()),
        }
        result
    }

    /// Checks that `domain`, `quantifier` and `predicate` form a quantified
    /// statement and returns it, ready to be displayed.
    pub fn translate_quantifier(
        &mut self,
        domain: &str,
        quantifier: &str,
        predicate: &str,
    ) -> Result<QuantifiedStatement, Error> {
        let result = validate_quantifier_translation(domain, quantifier, predicate);
        if let Ok(statement) = &result {
            log::debug!("translated to {statement}");
        }
        self.tracked(Category::Quantifiers, result)
    }

    /// Decides whether `test_value` is a counterexample (or, for existential
    /// statements, an example) for the statement described by the arguments.
    ///
    /// Input errors are returned as `Err`. A well-formed value that simply is
    /// not a counterexample comes back as `Ok` with `valid == false`, and is
    /// still recorded as a mistake.
    pub fn verify_counterexample(
        &mut self,
        statement_type: &str,
        domain: &str,
        predicate: &str,
        test_value: &str,
    ) -> Result<VerificationResult, Error> {
        match validate_counterexample(statement_type, domain, predicate, test_value) {
            Ok(result) => {
                match result.verdict.mistake() {
                    None => self.progress.record_success(Category::Counterexamples),
                    Some(kind) => self.progress.record_mistake(Category::Counterexamples, kind),
                }
                Ok(result)
            }
            Err(err) => self.tracked(Category::Counterexamples, Err(err)),
        }
    }

    pub fn start_negation(&mut self, statement: &str) -> Result<(), Error> {
        let result = self.derivation.start(statement);
        self.tracked(Category::Negation, result)
    }

    pub fn switch_quantifier(&mut self) -> Result<(), Error> {
        let result = self.derivation.switch_quantifier();
        self.negation_step(result)
    }

    pub fn submit_switch(&mut self, candidate: &str) -> Result<(), Error> {
        let result = self.derivation.submit_switch(candidate);
        self.negation_step(result)
    }

    pub fn negate_predicate(&mut self) -> Result<(), Error> {
        let result = self.derivation.negate_predicate();
        self.negation_step(result)
    }

    pub fn submit_negation(&mut self, candidate: &str) -> Result<(), Error> {
        let result = self.derivation.submit_negation(candidate);
        self.negation_step(result)
    }

    pub fn finalize_negation(&mut self) -> Result<(), Error> {
        let result = self.derivation.finalize();
        if result.is_ok() {
            log::info!(
                "negation of {:?} finalized as {:?}",
                self.derivation.original_statement(),
                self.derivation.final_result()
            );
        }
        self.negation_step(result)
    }

    pub fn reset_negation(&mut self) {
        self.derivation.reset();
    }

    fn negation_step(&mut self, result: Result<(), Error>) -> Result<(), Error> {
        match result {
            Err(Error::WrongStepOrder { action, step }) if !self.config.strict_step_order => {
                log::warn!("ignoring {action} at step {}", step.index());
                Ok(())
            }
            result => self.tracked(Category::Negation, result),
        }
    }

    /// Checks that `premises` have the shape required by `law`.
    pub fn check_law<S: AsRef<str>>(
        &mut self,
        law: &str,
        premises: &[S],
        conclusion: &str,
    ) -> Result<LawCheck, Error> {
        let result = check_law_preconditions(law, premises, conclusion);
        self.tracked(Category::Laws, result)
    }

    /// Validates every line of `proof` and checks that it ends in its goal.
    pub fn check_proof(&mut self, proof: &Proof) -> Result<(), Error> {
        let result = validate_proof(&proof.lines, &proof.goal);
        if result.is_ok() {
            log::info!("proof of {:?} accepted", proof.goal);
        }
        self.tracked(Category::Proofs, result)
    }
}

/// The kind of an [`Error`], without its payload.
///
/// This is what the progress tracker remembers as a category's last mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingComponent,
    InvalidDomain,
    InvalidQuantifier,
    EmptyPredicate,
    NotANumber,
    NotInDomain,
    UnsupportedPredicate,
    InvalidStatementType,
    NotCounterexample,
    NotExample,
    WrongStepOrder,
    InvalidStatementFormat,
    QuantifierNotSwitched,
    PredicateNotNegated,
    InsufficientPremises,
    MissingComponents,
    InvalidPremise,
    UnsupportedLaw,
    ForwardReferencing,
    InvalidCitation,
    InvalidLawApplication,
    GoalNotReached,
    Parse,
    CheckFailed,
    ExpectFail,
    Io,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingComponent => "missing_component",
            ErrorKind::InvalidDomain => "invalid_domain",
            ErrorKind::InvalidQuantifier => "invalid_quantifier",
            ErrorKind::EmptyPredicate => "empty_predicate",
            ErrorKind::NotANumber => "not_a_number",
            ErrorKind::NotInDomain => "not_in_domain",
            ErrorKind::UnsupportedPredicate => "unsupported_predicate",
            ErrorKind::InvalidStatementType => "invalid_statement_type",
            ErrorKind::NotCounterexample => "not_counterexample",
            ErrorKind::NotExample => "not_example",
            ErrorKind::WrongStepOrder => "wrong_step_order",
            ErrorKind::InvalidStatementFormat => "invalid_statement_format",
            ErrorKind::QuantifierNotSwitched => "quantifier_not_switched",
            ErrorKind::PredicateNotNegated => "predicate_not_negated",
            ErrorKind::InsufficientPremises => "insufficient_premises",
            ErrorKind::MissingComponents => "missing_components",
            ErrorKind::InvalidPremise => "invalid_premise",
            ErrorKind::UnsupportedLaw => "unsupported_law",
            ErrorKind::ForwardReferencing => "forward_referencing",
            ErrorKind::InvalidCitation => "invalid_citation",
            ErrorKind::InvalidLawApplication => "invalid_law_application",
            ErrorKind::GoalNotReached => "goal_not_reached",
            ErrorKind::Parse => "parse",
            ErrorKind::CheckFailed => "check_failed",
            ErrorKind::ExpectFail => "expect_fail",
            ErrorKind::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing component: a {0} is required")]
    MissingComponent(&'static str),
    #[error("Invalid domain {0:?}, expected one of ℕ, ℤ, ℚ, ℝ")]
    InvalidDomain(String),
    #[error("Invalid quantifier {0:?}, expected one of ∀, ∃, No")]
    InvalidQuantifier(String),
    #[error("The predicate cannot be empty")]
    EmptyPredicate,
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("{value} is not in {domain}: {reason}")]
    NotInDomain {
        value: String,
        domain: Domain,
        reason: &'static str,
    },
    #[error("Unsupported predicate {0:?}, the tutor understands predicates about even, odd, ≥ 0 and x² = -1")]
    UnsupportedPredicate(String),
    #[error("Invalid statement type {0:?}, expected universal, existential or no")]
    InvalidStatementType(String),
    #[error("Cannot {action} at step {}, the next step is to {}", .step.index(), .step.next_action())]
    WrongStepOrder { action: &'static str, step: Step },
    #[error("Invalid statement format: {0:?}")]
    InvalidStatementFormat(String),
    #[error("The quantifier of {original:?} was not switched correctly, got {switched:?}")]
    QuantifierNotSwitched { original: String, switched: String },
    #[error("The predicate was not negated correctly: expected {expected:?}, got {actual:?}")]
    PredicateNotNegated { expected: String, actual: String },
    #[error("{law} needs at least {required} premises, {given} given")]
    InsufficientPremises {
        law: Law,
        required: usize,
        given: usize,
    },
    #[error("{0} needs a conditional (p → q) and, as a separate premise, its antecedent (p)")]
    MissingComponents(Law),
    #[error("{0} needs a conjunction (p ∧ q) as its premise")]
    InvalidPremise(Law),
    #[error("Unsupported law {0:?}, expected detachment or simplification")]
    UnsupportedLaw(String),
    #[error("Line {line} cannot cite line {cited}, which does not come before it")]
    ForwardReferencing { line: usize, cited: usize },
    #[error("Line {line} cites line {cited}, which does not exist")]
    InvalidCitation { line: usize, cited: usize },
    #[error("Invalid law application: {0}")]
    InvalidLawApplication(Box<Error>),
    #[error("The proof ends in {last:?}, not in the goal {goal:?}")]
    GoalNotReached { goal: String, last: String },
    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },
    #[error("Line {line} of the script: {message}")]
    Parse { line: usize, message: String },
    #[error("Check failed: {0}")]
    CheckFailed(String),
    #[error("Command should have failed: {0}")]
    ExpectFail(String),
    #[error("IO error: {}: {1}", .0.display())]
    Io(PathBuf, std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingComponent(_) => ErrorKind::MissingComponent,
            Error::InvalidDomain(_) => ErrorKind::InvalidDomain,
            Error::InvalidQuantifier(_) => ErrorKind::InvalidQuantifier,
            Error::EmptyPredicate => ErrorKind::EmptyPredicate,
            Error::NotANumber(_) => ErrorKind::NotANumber,
            Error::NotInDomain { .. } => ErrorKind::NotInDomain,
            Error::UnsupportedPredicate(_) => ErrorKind::UnsupportedPredicate,
            Error::InvalidStatementType(_) => ErrorKind::InvalidStatementType,
            Error::WrongStepOrder { .. } => ErrorKind::WrongStepOrder,
            Error::InvalidStatementFormat(_) => ErrorKind::InvalidStatementFormat,
            Error::QuantifierNotSwitched { .. } => ErrorKind::QuantifierNotSwitched,
            Error::PredicateNotNegated { .. } => ErrorKind::PredicateNotNegated,
            Error::InsufficientPremises { .. } => ErrorKind::InsufficientPremises,
            Error::MissingComponents(_) => ErrorKind::MissingComponents,
            Error::InvalidPremise(_) => ErrorKind::InvalidPremise,
            Error::UnsupportedLaw(_) => ErrorKind::UnsupportedLaw,
            Error::ForwardReferencing { .. } => ErrorKind::ForwardReferencing,
            Error::InvalidCitation { .. } => ErrorKind::InvalidCitation,
            Error::InvalidLawApplication(_) => ErrorKind::InvalidLawApplication,
            Error::GoalNotReached { .. } => ErrorKind::GoalNotReached,
            // a located error is classified by what went wrong on that line
            Error::AtLine { source, .. } => source.kind(),
            Error::Parse { .. } => ErrorKind::Parse,
            Error::CheckFailed(_) => ErrorKind::CheckFailed,
            Error::ExpectFail(_) => ErrorKind::ExpectFail,
            Error::Io(..) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_call_counts_as_an_attempt() {
        let mut tutor = LogicTutor::default();
        assert!(tutor.translate_quantifier("ℕ", "∀", "").is_err());
        let counters = tutor.progress().get(Category::Quantifiers);
        assert_eq!(counters.attempts, 1);
        assert_eq!(counters.correct, 0);
        assert_eq!(counters.last_mistake, Some(ErrorKind::EmptyPredicate));

        let statement = tutor.translate_quantifier("ℕ", "∀", "x is even").unwrap();
        assert_eq!(statement.to_string(), "∀x ∈ ℕ, x is even");
        let counters = tutor.progress().get(Category::Quantifiers);
        assert_eq!(counters.attempts, 2);
        assert_eq!(counters.correct, 1);
        assert_eq!(counters.last_mistake, None);
    }

    #[test]
    fn rejected_verdict_is_a_mistake() {
        let mut tutor = LogicTutor::default();
        let result = tutor
            .verify_counterexample("universal", "ℤ", "x is even", "4")
            .unwrap();
        assert!(!result.valid);
        let counters = tutor.progress().get(Category::Counterexamples);
        assert_eq!(counters.attempts, 1);
        assert_eq!(counters.last_mistake, Some(ErrorKind::NotCounterexample));

        let err = tutor
            .verify_counterexample("universal", "ℕ", "x is even", "-3")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotInDomain);
        assert_eq!(
            tutor.progress().get(Category::Counterexamples).last_mistake,
            Some(ErrorKind::NotInDomain)
        );
    }

    #[test]
    fn strict_step_order_records_a_mistake() {
        let mut tutor = LogicTutor::default();
        tutor.start_negation("∀x ∈ ℝ, x² ≥ 0").unwrap();
        let err = tutor.negate_predicate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongStepOrder);
        assert_eq!(tutor.derivation().step(), Step::Started);
        let counters = tutor.progress().get(Category::Negation);
        assert_eq!(counters.attempts, 2);
        assert_eq!(counters.last_mistake, Some(ErrorKind::WrongStepOrder));
    }

    #[test]
    fn lenient_step_order_is_a_no_op() {
        let mut tutor = LogicTutor::new(TutorConfig {
            strict_step_order: false,
            ..TutorConfig::default()
        });
        tutor.start_negation("∀x ∈ ℝ, x² ≥ 0").unwrap();
        tutor.negate_predicate().unwrap();
        tutor.finalize_negation().unwrap();
        assert_eq!(tutor.derivation().step(), Step::Started);
        assert_eq!(tutor.progress().get(Category::Negation).attempts, 1);
    }

    #[test]
    fn located_errors_keep_their_kind() {
        let err = Error::AtLine {
            line: 2,
            source: Box::new(Error::ForwardReferencing { line: 2, cited: 3 }),
        };
        assert_eq!(err.kind(), ErrorKind::ForwardReferencing);
        assert!(err.to_string().starts_with("Line 2: "));
    }
}

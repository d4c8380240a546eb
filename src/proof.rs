use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::util::ListDisplay;
use crate::{check_law_preconditions, Error};

/// Why a proof line holds: a law applied to earlier lines, cited by their
/// 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Justification {
    pub law: String,
    pub cited_lines: SmallVec<[usize; 2]>,
}

/// A line of a proof. Lines without a justification are premises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofLine {
    pub statement: String,
    pub justification: Option<Justification>,
}

impl ProofLine {
    pub fn premise(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            justification: None,
        }
    }

    pub fn by(
        statement: impl Into<String>,
        law: impl Into<String>,
        cited_lines: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            statement: statement.into(),
            justification: Some(Justification {
                law: law.into(),
                cited_lines: cited_lines.into_iter().collect(),
            }),
        }
    }
}

impl Display for ProofLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.justification {
            None => write!(f, "{}    [premise]", self.statement),
            Some(Justification { law, cited_lines }) => write!(
                f,
                "{}    [{law} {}]",
                self.statement,
                ListDisplay(cited_lines.as_slice(), ", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proof {
    pub goal: String,
    pub lines: Vec<ProofLine>,
}

impl Proof {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            lines: vec![],
        }
    }

    pub fn push(&mut self, line: ProofLine) -> &mut Self {
        self.lines.push(line);
        self
    }
}

impl Display for Proof {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Goal: {}", self.goal)?;
        for (i, line) in self.lines.iter().enumerate() {
            write!(f, "\n{}. {line}", i + 1)?;
        }
        Ok(())
    }
}

/// Validates line `line_number` (1-based) of `lines`.
///
/// A line may only cite lines that come before it. If it names a law, the
/// cited statements must satisfy that law's preconditions with this line's
/// statement as the conclusion.
pub fn validate_proof_line(lines: &[ProofLine], line_number: usize) -> Result<(), Error> {
    let line = line_number
        .checked_sub(1)
        .and_then(|i| lines.get(i))
        .ok_or(Error::InvalidCitation {
            line: line_number,
            cited: line_number,
        })?;
    let Some(justification) = &line.justification else {
        return Ok(());
    };
    for &cited in &justification.cited_lines {
        if cited >= line_number {
            return Err(Error::ForwardReferencing {
                line: line_number,
                cited,
            });
        }
        if cited == 0 {
            return Err(Error::InvalidCitation {
                line: line_number,
                cited,
            });
        }
    }
    let premises: Vec<&str> = justification
        .cited_lines
        .iter()
        .map(|&cited| lines[cited - 1].statement.as_str())
        .collect();
    check_law_preconditions(&justification.law, &premises, &line.statement)
        .map_err(|err| Error::InvalidLawApplication(Box::new(err)))?;
    Ok(())
}

/// Validates every line of a proof in order and checks that the last line
/// states `goal`.
pub fn validate_proof(lines: &[ProofLine], goal: &str) -> Result<(), Error> {
    for line_number in 1..=lines.len() {
        validate_proof_line(lines, line_number).map_err(|err| Error::AtLine {
            line: line_number,
            source: Box::new(err),
        })?;
    }
    let last = lines.last().map(|line| line.statement.trim()).unwrap_or("");
    if last != goal.trim() {
        return Err(Error::GoalNotReached {
            goal: goal.trim().to_string(),
            last: last.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn modus_ponens() -> Vec<ProofLine> {
        vec![
            ProofLine::premise("p → q"),
            ProofLine::premise("p"),
            ProofLine::by("q", "detachment", [1, 2]),
        ]
    }

    #[test]
    fn accepts_a_complete_proof() {
        validate_proof(&modus_ponens(), "q").unwrap();
    }

    #[test]
    fn chains_laws() {
        let lines = vec![
            ProofLine::premise("p ∧ r"),
            ProofLine::premise("p → q"),
            ProofLine::by("p", "simplification", [1]),
            ProofLine::by("q", "detachment", [2, 3]),
        ];
        validate_proof(&lines, "q").unwrap();
    }

    #[test]
    fn rejects_forward_references() {
        let lines = vec![
            ProofLine::premise("p → q"),
            ProofLine::by("q", "detachment", [1, 3]),
            ProofLine::premise("p"),
        ];
        let err = validate_proof_line(&lines, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ForwardReferencing);

        let err = validate_proof(&lines, "q").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ForwardReferencing);
        assert_eq!(
            err.to_string(),
            "Line 2: Line 2 cannot cite line 3, which does not come before it"
        );
    }

    #[test]
    fn rejects_self_and_missing_citations() {
        let lines = vec![ProofLine::by("p ∧ q", "simplification", [1])];
        assert_eq!(
            validate_proof_line(&lines, 1).unwrap_err().kind(),
            ErrorKind::ForwardReferencing
        );
        let lines = vec![
            ProofLine::premise("p ∧ q"),
            ProofLine::by("p", "simplification", [0]),
        ];
        assert_eq!(
            validate_proof_line(&lines, 2).unwrap_err().kind(),
            ErrorKind::InvalidCitation
        );
        assert_eq!(
            validate_proof_line(&lines, 3).unwrap_err().kind(),
            ErrorKind::InvalidCitation
        );
    }

    #[test]
    fn wraps_law_failures() {
        let lines = vec![
            ProofLine::premise("p"),
            ProofLine::by("q", "detachment", [1]),
        ];
        let err = validate_proof_line(&lines, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLawApplication);
        let Error::InvalidLawApplication(inner) = err else {
            panic!("expected a law application error");
        };
        assert_eq!(inner.kind(), ErrorKind::InsufficientPremises);
    }

    #[test]
    fn locally_valid_proof_must_reach_its_goal() {
        let err = validate_proof(&modus_ponens(), "r").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GoalNotReached);
        assert_eq!(
            validate_proof(&[], "q").unwrap_err().kind(),
            ErrorKind::GoalNotReached
        );
    }

    #[test]
    fn displays_numbered_lines() {
        let mut proof = Proof::new("q");
        for line in modus_ponens() {
            proof.push(line);
        }
        assert_eq!(
            proof.to_string(),
            "Goal: q\n1. p → q    [premise]\n2. p    [premise]\n3. q    [detachment 1, 2]"
        );
    }
}

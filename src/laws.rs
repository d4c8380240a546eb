//! Checks that the premises cited for an inference law have the shape the
//! law requires.
//!
//! The checks are structural: they look for the connective each law needs in
//! the premise text and do not match subformulas against each other. Citing
//! `p → q` and `r` for detachment passes.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Law {
    /// From p → q and p, conclude q.
    Detachment,
    /// From p ∧ q, conclude p (or q).
    Simplification,
}

impl Law {
    pub fn name(self) -> &'static str {
        match self {
            Law::Detachment => "detachment",
            Law::Simplification => "simplification",
        }
    }
}

impl Display for Law {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Law::Detachment => f.write_str("Law of Detachment"),
            Law::Simplification => f.write_str("Simplification"),
        }
    }
}

impl FromStr for Law {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        [Law::Detachment, Law::Simplification]
            .into_iter()
            .find(|law| law.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnsupportedLaw(name.to_string()))
    }
}

/// An accepted law application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LawCheck {
    pub law: Law,
    pub message: String,
}

/// Checks that `premises` satisfy the preconditions of the law named `law`.
pub fn check_law_preconditions<S: AsRef<str>>(
    law: &str,
    premises: &[S],
    conclusion: &str,
) -> Result<LawCheck, Error> {
    let law = law.parse::<Law>()?;
    let premises: Vec<&str> = premises.iter().map(|p| p.as_ref().trim()).collect();
    let conclusion = conclusion.trim();
    let message = match law {
        Law::Detachment => {
            if premises.len() < 2 {
                return Err(Error::InsufficientPremises {
                    law,
                    required: 2,
                    given: premises.len(),
                });
            }
            let conditional = premises.iter().find(|p| p.contains('→'));
            let antecedent = premises.iter().find(|p| !p.contains('→'));
            match (conditional, antecedent) {
                (Some(conditional), Some(antecedent)) => {
                    format!("{law}: from \"{conditional}\" and \"{antecedent}\", conclude \"{conclusion}\"")
                }
                _ => return Err(Error::MissingComponents(law)),
            }
        }
        Law::Simplification => match premises.first() {
            Some(conjunction) if conjunction.contains('∧') => {
                format!("{law}: from \"{conjunction}\", conclude \"{conclusion}\"")
            }
            _ => return Err(Error::InvalidPremise(law)),
        },
    };
    log::debug!("{message}");
    Ok(LawCheck { law, message })
}

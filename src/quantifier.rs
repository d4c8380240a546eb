use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::{Domain, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    ForAll,
    Exists,
    /// "No x satisfies P", read as ∀x, ¬P(x).
    No,
}

impl Quantifier {
    pub const ALL: [Quantifier; 3] = [Quantifier::ForAll, Quantifier::Exists, Quantifier::No];

    pub fn symbol(self) -> &'static str {
        match self {
            Quantifier::ForAll => "∀",
            Quantifier::Exists => "∃",
            Quantifier::No => "No",
        }
    }
}

impl Display for Quantifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Quantifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Quantifier::ALL
            .into_iter()
            .find(|q| q.symbol() == s)
            .ok_or_else(|| Error::InvalidQuantifier(s.to_string()))
    }
}

/// A well-formed quantified statement over a single variable `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantifiedStatement {
    pub quantifier: Quantifier,
    pub domain: Domain,
    pub predicate: String,
}

impl QuantifiedStatement {
    /// The statement read out in English.
    pub fn reading(&self) -> String {
        let noun = self.domain.noun();
        let article = if noun.starts_with('i') { "an" } else { "a" };
        match self.quantifier {
            Quantifier::ForAll => format!("For every {noun} x, {}", self.predicate),
            Quantifier::Exists => format!(
                "There exists {article} {noun} x such that {}",
                self.predicate
            ),
            Quantifier::No => format!("No {noun} x satisfies {}", self.predicate),
        }
    }
}

impl Display for QuantifiedStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.quantifier {
            Quantifier::No => write!(f, "∀x ∈ {}, ¬({})", self.domain, self.predicate),
            q => write!(f, "{q}x ∈ {}, {}", self.domain, self.predicate),
        }
    }
}

/// Checks that a domain, quantifier and predicate, as typed by the student,
/// form a quantified statement.
///
/// Missing pieces are reported before anything is classified, then the
/// domain, the quantifier and finally the predicate are checked in turn.
pub fn validate_quantifier_translation(
    domain: &str,
    quantifier: &str,
    predicate: &str,
) -> Result<QuantifiedStatement, Error> {
    for (value, component) in [
        (domain, "domain"),
        (quantifier, "quantifier"),
        (predicate, "predicate"),
    ] {
        // a blank predicate is always reported as EmptyPredicate
        if value.is_empty() {
            return Err(if component == "predicate" {
                Error::EmptyPredicate
            } else {
                Error::MissingComponent(component)
            });
        }
    }
    let domain = domain.parse::<Domain>()?;
    let quantifier = quantifier.parse::<Quantifier>()?;
    let predicate = predicate.trim();
    if predicate.is_empty() {
        return Err(Error::EmptyPredicate);
    }
    Ok(QuantifiedStatement {
        quantifier,
        domain,
        predicate: predicate.to_string(),
    })
}

use std::fmt::{self, Display, Formatter};

use crate::util::IndexMap;
use crate::ErrorKind;

/// The kinds of exercise the tutor keeps separate counts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Quantifiers,
    Negation,
    Counterexamples,
    Laws,
    Proofs,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Quantifiers,
        Category::Negation,
        Category::Counterexamples,
        Category::Laws,
        Category::Proofs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Quantifiers => "quantifiers",
            Category::Negation => "negation",
            Category::Counterexamples => "counterexamples",
            Category::Laws => "laws",
            Category::Proofs => "proofs",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name.trim())
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryProgress {
    pub attempts: u32,
    pub correct: u32,
    /// What went wrong on the most recent attempt, if it failed.
    pub last_mistake: Option<ErrorKind>,
}

impl CategoryProgress {
    /// Share of attempts that were correct, as a percentage.
    pub fn accuracy(&self) -> Option<f64> {
        (self.attempts > 0).then(|| 100.0 * self.correct as f64 / self.attempts as f64)
    }
}

/// Attempt and success counts for each [`Category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTracker {
    counters: IndexMap<Category, CategoryProgress>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            counters: Category::ALL
                .into_iter()
                .map(|category| (category, CategoryProgress::default()))
                .collect(),
        }
    }
}

impl ProgressTracker {
    pub fn get(&self, category: Category) -> CategoryProgress {
        self.counters.get(&category).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryProgress)> + '_ {
        self.counters.iter().map(|(category, progress)| (*category, progress))
    }

    pub fn record_success(&mut self, category: Category) {
        let progress = self.counters.entry(category).or_default();
        progress.attempts += 1;
        progress.correct += 1;
        progress.last_mistake = None;
        log::debug!("{category}: correct ({}/{})", progress.correct, progress.attempts);
    }

    pub fn record_mistake(&mut self, category: Category, mistake: ErrorKind) {
        let progress = self.counters.entry(category).or_default();
        progress.attempts += 1;
        progress.last_mistake = Some(mistake);
        log::debug!("{category}: {mistake} ({}/{})", progress.correct, progress.attempts);
    }

    pub fn total_attempts(&self) -> u32 {
        self.counters.values().map(|p| p.attempts).sum()
    }

    pub fn total_correct(&self) -> u32 {
        self.counters.values().map(|p| p.correct).sum()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Display for ProgressTracker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (category, progress) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(
                f,
                "{:<16} {}/{}",
                category.name(),
                progress.correct,
                progress.attempts
            )?;
            if let Some(accuracy) = progress.accuracy() {
                write!(f, " ({accuracy:.0}%)")?;
            }
            if let Some(mistake) = progress.last_mistake {
                write!(f, ", last mistake: {mistake}")?;
            }
        }
        Ok(())
    }
}

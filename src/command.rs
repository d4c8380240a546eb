//! The tutor's command language.
//!
//! Scripts hold one command per line. Blank lines and lines starting with
//! `;` are skipped. Arguments are split on whitespace, except that the last
//! argument of a command (a predicate or statement) runs to the end of the
//! line.
//!
//! ```text
//! translate ℕ ∀ x is even
//! check universal ℤ 3 x is even
//! negate start ∀x ∈ ℝ, x² ≥ 0
//! negate switch
//! law detachment p → q ; p => q
//! goal q
//! line p → q
//! line p
//! line q by detachment 1, 2
//! qed
//! fail negate finalize
//! expect-progress negation 2 1
//! ```

use smallvec::SmallVec;

use crate::{Category, Error, ProofLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegateCommand {
    Start(String),
    /// Switch the quantifier, optionally to the student's own answer.
    Switch(Option<String>),
    /// Negate the predicate, optionally to the student's own answer.
    Predicate(Option<String>),
    Finalize,
    Reset,
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Translate {
        domain: String,
        quantifier: String,
        predicate: String,
    },
    Evaluate {
        value: String,
        predicate: String,
    },
    Member {
        domain: String,
        value: String,
    },
    Check {
        statement_type: String,
        domain: String,
        value: String,
        predicate: String,
    },
    Negate(NegateCommand),
    Law {
        law: String,
        premises: Vec<String>,
        conclusion: String,
    },
    Goal(String),
    Line(ProofLine),
    Qed,
    Presets,
    Progress,
    ExpectStep(u8),
    ExpectProgress {
        category: Category,
        attempts: u32,
        correct: u32,
    },
    /// Succeeds only if the wrapped command fails. Keeps the command's text
    /// for reporting.
    Fail(Box<Command>, String),
}

/// Splits off the first whitespace-separated word. Both parts are empty when
/// `text` is.
fn next_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text.trim_end(), ""),
    }
}

fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parses a script into its commands, each paired with its 1-based line
/// number.
pub fn parse_program(input: &str) -> Result<Vec<(usize, Command)>, Error> {
    let mut commands = vec![];
    for (i, text) in input.lines().enumerate() {
        if let Some(command) = parse_line(i + 1, text)? {
            commands.push((i + 1, command));
        }
    }
    Ok(commands)
}

/// Parses a single line, returning `None` for blank lines and comments.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, Error> {
    let text = text.trim();
    if text.is_empty() || text.starts_with(';') {
        return Ok(None);
    }
    let error = |message: String| Error::Parse { line, message };
    let (head, rest) = next_word(text);
    let command = match head {
        "translate" => {
            let (domain, rest) = next_word(rest);
            let (quantifier, predicate) = next_word(rest);
            Command::Translate {
                domain: domain.to_string(),
                quantifier: quantifier.to_string(),
                predicate: predicate.to_string(),
            }
        }
        "evaluate" => {
            let (value, predicate) = next_word(rest);
            Command::Evaluate {
                value: value.to_string(),
                predicate: predicate.to_string(),
            }
        }
        "member" => {
            let (domain, value) = next_word(rest);
            Command::Member {
                domain: domain.to_string(),
                value: value.to_string(),
            }
        }
        "check" => {
            let (statement_type, rest) = next_word(rest);
            let (domain, rest) = next_word(rest);
            let (value, predicate) = next_word(rest);
            Command::Check {
                statement_type: statement_type.to_string(),
                domain: domain.to_string(),
                value: value.to_string(),
                predicate: predicate.to_string(),
            }
        }
        "negate" => {
            let (step, rest) = next_word(rest);
            Command::Negate(match step {
                "start" => NegateCommand::Start(rest.to_string()),
                "switch" => NegateCommand::Switch(optional(rest)),
                "predicate" => NegateCommand::Predicate(optional(rest)),
                "finalize" => NegateCommand::Finalize,
                "reset" => NegateCommand::Reset,
                "show" => NegateCommand::Show,
                other => return Err(error(format!("unknown negation step {other:?}"))),
            })
        }
        "law" => {
            let (law, rest) = next_word(rest);
            let (premises, conclusion) = rest
                .rsplit_once("=>")
                .ok_or_else(|| error("expected `=>` before the conclusion".to_string()))?;
            Command::Law {
                law: law.to_string(),
                premises: premises
                    .split(';')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect(),
                conclusion: conclusion.trim().to_string(),
            }
        }
        "goal" => Command::Goal(rest.to_string()),
        "line" => Command::Line(parse_proof_line(rest).map_err(error)?),
        "qed" => Command::Qed,
        "presets" => Command::Presets,
        "progress" => Command::Progress,
        "expect-step" => Command::ExpectStep(
            rest.parse()
                .map_err(|_| error(format!("expected a step between 0 and 4, got {rest:?}")))?,
        ),
        "expect-progress" => {
            let (category, rest) = next_word(rest);
            let category = Category::from_name(category)
                .ok_or_else(|| error(format!("unknown category {category:?}")))?;
            let (attempts, correct) = next_word(rest);
            let count = |text: &str| {
                text.parse::<u32>()
                    .map_err(|_| error(format!("expected a count, got {text:?}")))
            };
            Command::ExpectProgress {
                category,
                attempts: count(attempts)?,
                correct: count(correct)?,
            }
        }
        "fail" => match parse_line(line, rest)? {
            Some(command) => Command::Fail(Box::new(command), rest.to_string()),
            None => return Err(error("`fail` needs a command".to_string())),
        },
        other => return Err(error(format!("unknown command {other:?}"))),
    };
    Ok(Some(command))
}

/// Parses `<statement> [by <law> <n>[, <m>...]]`.
fn parse_proof_line(text: &str) -> Result<ProofLine, String> {
    let Some((statement, justification)) = text.rsplit_once(" by ") else {
        return Ok(ProofLine::premise(text.trim()));
    };
    let (law, cited) = next_word(justification);
    if law.is_empty() {
        return Err("expected a law after `by`".to_string());
    }
    let cited_lines = cited
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|n| !n.is_empty())
        .map(|n| {
            n.parse::<usize>()
                .map_err(|_| format!("expected a line number, got {n:?}"))
        })
        .collect::<Result<SmallVec<[usize; 2]>, _>>()?;
    Ok(ProofLine::by(statement.trim(), law, cited_lines))
}

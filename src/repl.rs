use std::io::{self, Read};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::command::{parse_line, parse_program, Command, NegateCommand};
use crate::{
    evaluate_predicate, validate_domain_membership, Error, LogicTutor, Proof, PRESET_STATEMENTS,
};

impl LogicTutor {
    /// Runs every command of a script in order, stopping at the first error.
    ///
    /// Returns the output of each command, unless messages are disabled.
    pub fn run_program(&mut self, input: &str) -> Result<Vec<String>, Error> {
        let mut messages = vec![];
        for (line, command) in parse_program(input)? {
            log::debug!("line {line}: {command:?}");
            if let Some(message) = self.run_command(command)? {
                if self.config().messages {
                    messages.push(message);
                }
            }
        }
        Ok(messages)
    }

    pub fn run_file(&mut self, path: &Path) -> Result<Vec<String>, Error> {
        let program =
            std::fs::read_to_string(path).map_err(|err| Error::Io(path.to_path_buf(), err))?;
        self.run_program(&program)
    }

    /// Runs a single command, returning its output if it has any.
    pub fn run_command(&mut self, command: Command) -> Result<Option<String>, Error> {
        let message = match command {
            Command::Translate {
                domain,
                quantifier,
                predicate,
            } => {
                let statement = self.translate_quantifier(&domain, &quantifier, &predicate)?;
                format!("{statement}\n  {}", statement.reading())
            }
            Command::Evaluate { value, predicate } => {
                if evaluate_predicate(&predicate, &value)? {
                    format!("{value} satisfies \"{predicate}\"")
                } else {
                    format!("{value} does not satisfy \"{predicate}\"")
                }
            }
            Command::Member { domain, value } => {
                validate_domain_membership(&domain, &value)?;
                format!("{value} ∈ {domain}")
            }
            Command::Check {
                statement_type,
                domain,
                value,
                predicate,
            } => {
                self.verify_counterexample(&statement_type, &domain, &predicate, &value)?
                    .message
            }
            Command::Negate(step) => match step {
                NegateCommand::Start(statement) => {
                    self.start_negation(&statement)?;
                    self.derivation().to_string()
                }
                NegateCommand::Switch(None) => {
                    self.switch_quantifier()?;
                    self.derivation().to_string()
                }
                NegateCommand::Switch(Some(candidate)) => {
                    self.submit_switch(&candidate)?;
                    self.derivation().to_string()
                }
                NegateCommand::Predicate(None) => {
                    self.negate_predicate()?;
                    self.derivation().to_string()
                }
                NegateCommand::Predicate(Some(candidate)) => {
                    self.submit_negation(&candidate)?;
                    self.derivation().to_string()
                }
                NegateCommand::Finalize => {
                    self.finalize_negation()?;
                    self.derivation().to_string()
                }
                NegateCommand::Reset => {
                    self.reset_negation();
                    return Ok(None);
                }
                NegateCommand::Show => self.derivation().to_string(),
            },
            Command::Law {
                law,
                premises,
                conclusion,
            } => self.check_law(&law, &premises, &conclusion)?.message,
            Command::Goal(goal) => {
                self.pending_proof = Some(Proof::new(goal.trim()));
                return Ok(None);
            }
            Command::Line(line) => {
                let proof = self
                    .pending_proof
                    .as_mut()
                    .ok_or(Error::MissingComponent("goal"))?;
                proof.push(line);
                return Ok(None);
            }
            Command::Qed => {
                let proof = self
                    .pending_proof
                    .take()
                    .ok_or(Error::MissingComponent("goal"))?;
                self.check_proof(&proof)?;
                format!("{proof}\nProof of {} accepted", proof.goal)
            }
            Command::Presets => {
                PRESET_STATEMENTS
                    .iter()
                    .enumerate()
                    .map(|(i, statement)| format!("{}. {statement}", i + 1))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Progress => self.progress().to_string(),
            Command::ExpectStep(expected) => {
                let step = self.derivation().step();
                if step.index() != expected {
                    return Err(Error::CheckFailed(format!(
                        "expected step {expected}, the derivation is at step {}",
                        step.index()
                    )));
                }
                return Ok(None);
            }
            Command::ExpectProgress {
                category,
                attempts,
                correct,
            } => {
                let progress = self.progress().get(category);
                if (progress.attempts, progress.correct) != (attempts, correct) {
                    return Err(Error::CheckFailed(format!(
                        "expected {category} at {correct}/{attempts}, got {}/{}",
                        progress.correct, progress.attempts
                    )));
                }
                return Ok(None);
            }
            Command::Fail(command, text) => match self.run_command(*command) {
                Ok(_) => return Err(Error::ExpectFail(text)),
                Err(err) => {
                    log::debug!("failed as expected: {err}");
                    return Ok(None);
                }
            },
        };
        Ok(Some(message))
    }

    /// Start a Read-Eval-Print Loop with standard I/O.
    pub fn repl(&mut self) -> io::Result<()> {
        self.repl_with(io::stdin(), io::stdout())
    }

    /// Start a Read-Eval-Print Loop with the given input and output channel.
    ///
    /// Unlike [`Self::run_program`], an error is reported and the loop goes on.
    pub fn repl_with<R, W>(&mut self, input: R, mut output: W) -> io::Result<()>
    where
        R: Read,
        W: Write,
    {
        for (i, line) in BufReader::new(input).lines().enumerate() {
            let line = line?;
            let result = parse_line(i + 1, &line).and_then(|command| match command {
                Some(command) => self.run_command(command),
                None => Ok(None),
            });
            match result {
                Ok(Some(message)) if self.config().messages => writeln!(output, "{message}")?,
                Ok(_) => {}
                Err(err) => log::error!("{err}"),
            }
        }
        Ok(())
    }
}

#[cfg(feature = "bin")]
pub mod bin {
    use crate::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Parser)]
    #[command(version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
    struct Args {
        /// Ignores negation steps taken out of order instead of reporting them
        #[clap(long)]
        lenient_steps: bool,
        /// Prevents the tutor from printing command output
        #[clap(long)]
        no_messages: bool,
        /// Tutor scripts to run. Starts a REPL when none are given
        inputs: Vec<PathBuf>,
    }

    /// Start the command-line interface of the tutor.
    #[allow(clippy::disallowed_macros)]
    pub fn cli() {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .format_timestamp(None)
            .format_target(false)
            .parse_default_env()
            .init();

        let args = Args::parse();
        let mut tutor = LogicTutor::new(TutorConfig {
            strict_step_order: !args.lenient_steps,
            messages: !args.no_messages,
        });

        if args.inputs.is_empty() {
            log::info!("Welcome to the logic tutor! Type `presets` to see statements to negate.");
            match tutor.repl() {
                Ok(()) => std::process::exit(0),
                Err(err) => {
                    log::error!("{err}");
                    std::process::exit(1)
                }
            }
        }

        for input in &args.inputs {
            match tutor.run_file(input) {
                Ok(msgs) => {
                    for msg in msgs {
                        println!("{msg}");
                    }
                }
                Err(err) => {
                    log::error!("{}: {err}", input.display());
                    std::process::exit(1)
                }
            }
        }
        log::info!(
            "{} of {} attempts correct",
            tutor.progress().total_correct(),
            tutor.progress().total_attempts()
        );
    }
}

mod console;
mod logging;

use std::fmt;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use services::{Clock, QuizRunner, QuizSession};
use tracing::info;

use crate::console::{OutputFormat, console_surfaces};
use crate::logging::{DEFAULT_LOG_FILTER, init_tracing};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidFormat { raw: String },
    EmptyPath,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidFormat { raw } => {
                write!(f, "invalid --format value: {raw} (expected text or json)")
            }
            ArgsError::EmptyPath => write!(f, "--file requires a non-empty path"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [--file <quiz.json>] [--format text|json] [--log <filter>]");
    eprintln!();
    eprintln!("Without --file the quiz asks for a path. Quiz files hold a JSON list of");
    eprintln!("{{\"question\", \"options\", \"correct_answer\", \"explanation\"}} objects.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --format text");
    eprintln!("  --log {DEFAULT_LOG_FILTER}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE, QUIZ_LOG");
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    file: Option<PathBuf>,
    format: OutputFormat,
    log_filter: String,
}

impl Args {
    /// Flags override the environment, which overrides defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut file = env("QUIZ_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut log_filter = env("QUIZ_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let mut format = OutputFormat::Text;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => {
                    let value = require_value(args, "--file")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyPath);
                    }
                    file = Some(PathBuf::from(value));
                }
                "--format" => {
                    let value = require_value(args, "--format")?;
                    format = OutputFormat::from_arg(&value)
                        .ok_or(ArgsError::InvalidFormat { raw: value })?;
                }
                "--log" => log_filter = require_value(args, "--log")?,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self {
            file,
            format,
            log_filter,
        }))
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing(&args.log_filter);

    let (mut display, mut input) =
        console_surfaces(args.format, io::stdin().lock(), io::stdout, io::stderr());
    if let Some(path) = &args.file {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| format!("could not read {}: {err}", path.display()))?;
        input = input.with_initial_quiz(raw);
    }

    let session = QuizSession::with_clock(Clock::System);
    info!(
        session_id = %session.id(),
        interactive = io::stdin().is_terminal(),
        "quiz runner ready"
    );

    let session = QuizRunner::new(session).run(display.as_mut(), &mut input)?;
    info!(
        session_id = %session.id(),
        status = %session.status(),
        round = session.round(),
        score = session.score(),
        "quiz runner finished"
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str], env: &[(&str, &str)]) -> Result<Parsed, ArgsError> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = argv.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter, |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let parsed = parse(&[], &[]).unwrap();
        assert_eq!(
            parsed,
            Parsed::Run(Args {
                file: None,
                format: OutputFormat::Text,
                log_filter: DEFAULT_LOG_FILTER.to_string(),
            })
        );
    }

    #[test]
    fn flags_override_environment() {
        let parsed = parse(
            &["--file", "cli.json", "--log", "debug", "--format", "json"],
            &[("QUIZ_FILE", "env.json"), ("QUIZ_LOG", "info")],
        )
        .unwrap();
        let Parsed::Run(args) = parsed else {
            panic!("expected run");
        };
        assert_eq!(args.file, Some(PathBuf::from("cli.json")));
        assert_eq!(args.log_filter, "debug");
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn environment_fills_in_missing_flags() {
        let Parsed::Run(args) = parse(&[], &[("QUIZ_FILE", "env.json")]).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(args.file, Some(PathBuf::from("env.json")));
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(matches!(
            parse(&["--file"], &[]).unwrap_err(),
            ArgsError::MissingValue { flag: "--file" }
        ));
        assert!(matches!(
            parse(&["--format", "xml"], &[]).unwrap_err(),
            ArgsError::InvalidFormat { .. }
        ));
        assert!(matches!(
            parse(&["--verbose"], &[]).unwrap_err(),
            ArgsError::UnknownArg(arg) if arg == "--verbose"
        ));
        assert!(matches!(
            parse(&["--file", " "], &[]).unwrap_err(),
            ArgsError::EmptyPath
        ));
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["-h", "--bogus"], &[]).unwrap(), Parsed::Help);
    }
}

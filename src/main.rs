use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use orthoc::{
    config::Config,
    error::FatalError,
    interpreter::evaluator::MAX_EXPR_ELEMENTS,
    report::{ColorMode, TerminalReporter, error_tag},
    run_stdio,
};
use tracing_subscriber::EnvFilter;

/// Exit status when the source file cannot be read.
const EXIT_OPEN_FAILURE: u8 = 1;
/// Exit status under `--strict` when diagnostics were reported.
const EXIT_DIAGNOSTICS: u8 = 2;
/// Exit status for other fatal errors.
const EXIT_FATAL: u8 = 3;

/// occ runs OrthoC programs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The program to run.
    file: PathBuf,

    /// Maximum number of operands or operators in one arithmetic expression.
    #[arg(long, default_value_t = MAX_EXPR_ELEMENTS)]
    max_expr_elements: usize,

    /// Exit with a failure status if any error was reported while running.
    #[arg(short, long)]
    strict: bool,

    /// When to color the error tag.
    #[arg(long, value_enum, default_value_t = Color::Auto)]
    color: Color,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Color {
    Auto,
    Always,
    Never,
}

impl From<Color> for ColorMode {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => Self::Auto,
            Color::Always => Self::Always,
            Color::Never => Self::Never,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env())
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();
    let mut reporter = TerminalReporter::stderr(args.color.into());

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(source) => {
            let error = FatalError::FileOpenFailure { path: args.file, source };
            eprintln!("{} {error}", error_tag(reporter.colors()));
            return ExitCode::from(EXIT_OPEN_FAILURE);
        },
    };

    let config = Config { max_expr_elements: args.max_expr_elements };

    if let Err(error) = run_stdio(&source, &config, &mut reporter) {
        eprintln!("{} {error}", error_tag(reporter.colors()));
        return ExitCode::from(EXIT_FATAL);
    }

    if args.strict && reporter.count() > 0 {
        return ExitCode::from(EXIT_DIAGNOSTICS);
    }

    ExitCode::SUCCESS
}

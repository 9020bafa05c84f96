//! # orthoc
//!
//! orthoc is an interpreter for OrthoC, a small line-oriented scripting
//! dialect. A program is a flat list of lines: function definitions, string
//! variables, output, arithmetic, interactive input and calls to functions,
//! including a call that repeats forever.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{self, BufRead, Write};

use crate::{
    config::Config,
    error::FatalError,
    interpreter::core::{Interpreter, Io},
    report::Reporter,
};

/// Interpreter settings.
///
/// Holds the knobs a host can turn, such as the capacity of the arithmetic
/// evaluation stacks.
pub mod config;
/// Provides the error types of the interpreter.
///
/// This module defines every error that can be raised while evaluating
/// expressions, scanning the source or executing statements. Recoverable
/// errors carry the source line they refer to; fatal errors stop the run.
///
/// # Responsibilities
/// - Defines error enums for evaluation, runtime and fatal failures.
/// - Attaches line numbers and messages for diagnostics.
/// - Integrates with the standard error traits.
pub mod error;
/// The execution engine.
///
/// Ties together the source index, the symbol tables, the scanner, the
/// statement dispatcher, the arithmetic evaluator and the program driver.
///
/// # Responsibilities
/// - Discovers functions and variables before anything runs.
/// - Executes function bodies line by line.
/// - Evaluates arithmetic expressions.
pub mod interpreter;
/// Diagnostics reporting.
///
/// Defines the [`Reporter`] trait the interpreter hands its diagnostics to,
/// plus an in-memory collector and a terminal renderer.
pub mod report;

/// Runs a program against the given streams.
///
/// Scans `source`, then executes its top-level call directives. Output goes
/// to `output`, `repent` reads from `input`, and every recoverable error is
/// handed to `reporter`.
///
/// # Errors
/// Returns an error only for fatal conditions: a table that cannot grow or
/// an output stream that cannot be written.
///
/// # Examples
/// ```
/// use std::io;
///
/// use orthoc::{config::Config, report::Diagnostics, run};
///
/// let program = "\
/// Prayer:
/// incense x = \"42\";
/// invoke main() {
///     theosis(10 + 5 > null)
///     chant(\"x is\", x)
/// }
/// call.upon main
/// ";
///
/// let mut output = Vec::<u8>::new();
/// let mut diagnostics = Diagnostics::default();
/// run(program, &Config::default(), &mut output, &mut io::empty(), &mut diagnostics).unwrap();
///
/// assert_eq!(String::from_utf8(output).unwrap(), "x is 42\n");
/// assert!(diagnostics.is_empty());
/// ```
pub fn run(source: &str,
           config: &Config,
           output: &mut impl Write,
           input: &mut impl BufRead,
           reporter: &mut impl Reporter)
           -> Result<(), FatalError> {
    let io = Io { output,
                  input,
                  reporter };

    Interpreter::new(source, *config, io).run()
}

/// Runs a program on standard output and standard input.
///
/// # Errors
/// See [`run`].
pub fn run_stdio(source: &str, config: &Config, reporter: &mut impl Reporter) -> Result<(), FatalError> {
    let mut output = io::stdout().lock();
    let mut input = io::stdin().lock();

    run(source, config, &mut output, &mut input, reporter)
}

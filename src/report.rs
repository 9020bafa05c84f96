use std::io::{self, Write};

use crate::error::RuntimeError;

/// ANSI escape sequences for the `[ERROR]` tag.
mod colors {
    pub const BACKGROUND: &str = "\x1b[41m";
    pub const FOREGROUND: &str = "\x1b[37m";
    pub const RESET: &str = "\x1b[0m";
}

/// Receives the recoverable errors raised while a program runs.
///
/// The interpreter never renders diagnostics itself; it hands each one to a
/// reporter and carries on with the next line.
pub trait Reporter {
    /// Reports a single diagnostic.
    fn report(&mut self, error: &RuntimeError);
}

/// Collects diagnostics in memory.
///
/// # Example
/// ```
/// use orthoc::{
///     error::RuntimeError,
///     report::{Diagnostics, Reporter},
/// };
///
/// let mut diagnostics = Diagnostics::default();
/// diagnostics.report(&RuntimeError::DivisionByZero { line: 4 });
/// assert_eq!(diagnostics.errors()[0].line(), 4);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<RuntimeError>,
}

impl Diagnostics {
    /// The diagnostics reported so far, in order.
    #[must_use]
    pub fn errors(&self) -> &[RuntimeError] {
        &self.errors
    }

    /// Returns `true` if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, error: &RuntimeError) {
        self.errors.push(error.clone());
    }
}

/// Color output mode for the terminal reporter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorMode {
    /// Resolves the mode; `is_tty` only matters for `Auto`.
    #[must_use]
    pub const fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            Self::Auto => is_tty,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Formats the `[ERROR]` tag.
#[must_use]
pub fn error_tag(colored: bool) -> String {
    if colored {
        format!("{}{}[ERROR]{}", colors::BACKGROUND, colors::FOREGROUND, colors::RESET)
    } else {
        "[ERROR]".to_string()
    }
}

/// Writes diagnostics as `[ERROR] Line N: message` lines.
///
/// # Example
/// ```
/// use orthoc::{
///     error::RuntimeError,
///     report::{Reporter, TerminalReporter},
/// };
///
/// let mut reporter = TerminalReporter::new(Vec::<u8>::new(), false);
/// reporter.report(&RuntimeError::UndefinedFunction { name: "greet".to_string(),
///                                                    line: 2, });
/// assert_eq!(reporter.count(), 1);
/// assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(),
///            "[ERROR] Line 2: Undefined function 'greet'\n");
/// ```
pub struct TerminalReporter<W: Write> {
    writer: W,
    colors: bool,
    count:  usize,
}

impl TerminalReporter<io::Stderr> {
    /// Creates a reporter on standard error with the given color mode.
    #[must_use]
    pub fn stderr(mode: ColorMode) -> Self {
        use std::io::IsTerminal;

        let is_tty = io::stderr().is_terminal();
        Self::new(io::stderr(), mode.should_use_colors(is_tty))
    }
}

impl<W: Write> TerminalReporter<W> {
    /// Creates a reporter writing to `writer`.
    pub const fn new(writer: W, colors: bool) -> Self {
        Self { writer,
               colors,
               count: 0 }
    }

    /// Number of diagnostics reported so far.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether the error tag is colored.
    #[must_use]
    pub const fn colors(&self) -> bool {
        self.colors
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn report(&mut self, error: &RuntimeError) {
        // Counted before writing so a failed write still fails `--strict`.
        self.count += 1;
        writeln!(self.writer, "{} {error}", error_tag(self.colors)).ok();
    }
}

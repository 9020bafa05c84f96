use tracing::{debug, warn};

use crate::{
    error::{FatalError, RuntimeError},
    interpreter::{
        directive::{TopLevel, classify_top_level, parse_declaration},
        source::Source,
        symbols::{Function, FunctionTable, VariableTable},
    },
    report::Reporter,
};

/// Everything the scan learns before execution starts.
#[derive(Debug, Default, Clone)]
pub struct ScanOutput {
    /// Every `invoke` definition in the program.
    pub functions:    FunctionTable,
    /// Every valid top-level `incense` declaration.
    pub variables:    VariableTable,
    /// Whether a `Prayer:` header line exists.
    pub header_seen:  bool,
    /// Indices of `invoke` lines whose body never reaches a `}` line.
    pub unterminated: Vec<usize>,
}

/// Scans the whole program once, before anything runs.
///
/// Function definitions are registered with the index of the line following
/// the `invoke` line. Declarations outside function bodies are evaluated
/// immediately; malformed ones are reported and skipped. Declarations inside
/// bodies are left for the executor. Every definition still open when the
/// source ends is reported as `MissingTerminator` and recorded in
/// [`ScanOutput::unterminated`].
///
/// # Errors
/// `MemoryExhaustion` if a table cannot grow.
///
/// # Example
/// ```
/// use orthoc::{
///     interpreter::{scanner::scan, source::Source},
///     report::Diagnostics,
/// };
///
/// let source = Source::new("Prayer:\nincense x = \"42\";\ninvoke main() {\nchant(\"hi\")\n}\n");
/// let mut diagnostics = Diagnostics::default();
/// let output = scan(&source, &mut diagnostics).unwrap();
///
/// assert!(output.header_seen);
/// assert_eq!(output.variables.get("x"), Some("42"));
/// assert_eq!(output.functions.get("main").unwrap().start, 3);
/// assert!(diagnostics.is_empty());
/// ```
pub fn scan(source: &Source<'_>, reporter: &mut dyn Reporter) -> Result<ScanOutput, FatalError> {
    let mut output = ScanOutput::default();
    let mut in_body = false;
    let mut open = Vec::new();

    for (index, raw) in source.lines() {
        let line_number = Source::line_number(index);

        match classify_top_level(raw.trim()) {
            Some(TopLevel::Header) => output.header_seen = true,
            Some(TopLevel::Definition { name }) => {
                in_body = true;
                open.push((name, index));
                if name.is_empty() {
                    warn!(line = line_number, "function definition without a name ignored");
                    continue;
                }
                debug!(name, line = line_number, "function defined");
                output.functions.define(name, Function { start:      index + 1,
                                                         definition: index, })?;
            },
            Some(TopLevel::Terminator) => {
                in_body = false;
                open.clear();
            },
            Some(TopLevel::Declaration { rest }) if !in_body => {
                match parse_declaration(rest, line_number) {
                    Ok(declaration) => {
                        output.variables
                              .define(declaration.name, declaration.value, line_number)?;
                    },
                    Err(error) => reporter.report(&error),
                }
            },
            _ => {},
        }
    }

    for (name, index) in open {
        if !name.is_empty() {
            reporter.report(&RuntimeError::MissingTerminator { name: name.to_string(),
                                                               line: Source::line_number(index), });
        }
        output.unterminated.push(index);
    }

    debug!(functions = output.functions.len(),
           variables = output.variables.len(),
           header = output.header_seen,
           "scan complete");

    Ok(output)
}

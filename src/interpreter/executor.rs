use tracing::trace;

use crate::{
    error::{FatalError, RuntimeError},
    interpreter::{
        core::Interpreter,
        directive::{Statement, parse_statement},
        evaluator::evaluate,
        source::Source,
        symbols::Function,
    },
};

impl Interpreter<'_, '_> {
    /// Runs the body of the function `name`.
    ///
    /// The cursor is saved, moved to the first line of the body, and
    /// restored once the body ends, whether through its `}` line, the end of
    /// the source, or an error. An unknown name is reported as
    /// `UndefinedFunction` at `call_line` and changes nothing.
    ///
    /// # Errors
    /// Only fatal errors are returned; everything else is reported.
    ///
    /// # Example
    /// ```
    /// use std::io;
    ///
    /// use orthoc::{
    ///     config::Config,
    ///     interpreter::core::{Interpreter, Io},
    ///     report::Diagnostics,
    /// };
    ///
    /// let program = "invoke count() {\ntheosis(1 + 1)\n}\n";
    /// let (mut output, mut input, mut diagnostics) = (Vec::<u8>::new(), io::empty(), Diagnostics::default());
    /// let mut interpreter = Interpreter::new(program,
    ///                                        Config::default(),
    ///                                        Io { output:   &mut output,
    ///                                             input:    &mut input,
    ///                                             reporter: &mut diagnostics, });
    /// interpreter.load().unwrap();
    /// interpreter.seek(2);
    ///
    /// interpreter.execute("count", 9).unwrap();
    /// interpreter.execute("missing", 9).unwrap();
    /// assert_eq!(interpreter.cursor(), 2);
    /// drop(interpreter);
    ///
    /// assert_eq!(String::from_utf8(output).unwrap(), "2.000000\n");
    /// assert_eq!(diagnostics.errors().len(), 1);
    /// ```
    pub fn execute(&mut self, name: &str, call_line: usize) -> Result<(), FatalError> {
        let Some(function) = self.functions.get(name) else {
            self.report(&RuntimeError::UndefinedFunction { name: name.to_string(),
                                                           line: call_line, });
            return Ok(());
        };

        trace!(name, line = call_line, "call");

        let saved = self.cursor;
        self.cursor = function.start;
        let result = self.run_body(name, function);
        self.cursor = saved;

        result
    }

    /// Executes body lines from the cursor until `}` or the end of the source.
    fn run_body(&mut self, name: &str, function: Function) -> Result<(), FatalError> {
        while let Some(raw) = self.source.line(self.cursor) {
            let line = Source::line_number(self.cursor);
            self.cursor += 1;

            match parse_statement(raw.trim(), line) {
                Some(Ok(Statement::Terminator)) => return Ok(()),
                Some(Ok(statement)) => self.run_statement(statement, line)?,
                Some(Err(error)) => self.report(&error),
                None => {},
            }
        }

        self.report(&RuntimeError::MissingTerminator { name: name.to_string(),
                                                       line: Source::line_number(function.definition), });
        Ok(())
    }

    /// Executes a single body statement.
    fn run_statement(&mut self, statement: Statement<'_>, line: usize) -> Result<(), FatalError> {
        match statement {
            Statement::Output { template,
                                variable: None, } => self.emit(format_args!("{template}\n")),
            Statement::Output { template,
                                variable: Some(name), } => {
                let Some(value) = self.variables.get(name) else {
                    self.report(&RuntimeError::UndefinedVariable { name: name.to_string(),
                                                                   line });
                    return Ok(());
                };
                let text = render_template(template, value);
                self.emit(format_args!("{text}\n"))
            },
            Statement::Declaration(declaration) => {
                self.variables.define(declaration.name, declaration.value, line)
            },
            Statement::Arithmetic { expression,
                                    suppressed, } => {
                match evaluate(expression, self.config.max_expr_elements) {
                    Ok(_) if suppressed => Ok(()),
                    Ok(value) => self.emit(format_args!("{value:.6}\n")),
                    Err(error) => {
                        self.report(&error.at_line(line));
                        Ok(())
                    },
                }
            },
            Statement::Input { prompt, variable } => self.read_input(prompt, variable, line),
            Statement::Terminator => Ok(()),
        }
    }

    /// Prompts, reads one line and stores it in `variable`.
    fn read_input(&mut self, prompt: &str, variable: &str, line: usize) -> Result<(), FatalError> {
        self.emit(format_args!("{prompt}"))?;
        self.io
            .output
            .flush()
            .map_err(|source| FatalError::OutputFailure { source })?;

        let mut buffer = String::new();
        let details = match self.io.input.read_line(&mut buffer) {
            Ok(0) => "Failed to read user input: end of input".to_string(),
            Err(error) => format!("Failed to read user input: {error}"),
            Ok(_) => {
                let value = buffer.strip_suffix('\n')
                                  .map_or(buffer.as_str(), |s| s.strip_suffix('\r').unwrap_or(s));
                return self.variables.define(variable, value, line);
            },
        };

        self.report(&RuntimeError::StreamReadFailure { details, line });
        Ok(())
    }
}

/// Substitutes `value` into an output template.
///
/// The first `%s` is replaced by `value` and `%%` renders as `%`. A template
/// without `%s` gets the value appended after a space.
///
/// # Example
/// ```
/// use orthoc::interpreter::executor::render_template;
///
/// assert_eq!(render_template("Hello, %s!", "Basil"), "Hello, Basil!");
/// assert_eq!(render_template("x is", "42"), "x is 42");
/// assert_eq!(render_template("100%% of %s", "us"), "100% of us");
/// ```
#[must_use]
pub fn render_template(template: &str, value: &str) -> String {
    let mut rendered = String::with_capacity(template.len() + value.len() + 1);
    let mut substituted = false;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    rendered.push('%');
                    continue;
                },
                Some('s') if !substituted => {
                    chars.next();
                    rendered.push_str(value);
                    substituted = true;
                    continue;
                },
                _ => {},
            }
        }
        rendered.push(c);
    }

    if !substituted {
        rendered.push(' ');
        rendered.push_str(value);
    }

    rendered
}

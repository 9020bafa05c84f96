use std::{
    fmt,
    io::{BufRead, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{
    config::Config,
    error::{FatalError, RuntimeError},
    interpreter::{
        source::Source,
        symbols::{FunctionTable, VariableTable},
    },
    report::Reporter,
};

/// The streams a running program talks to.
pub struct Io<'io> {
    /// Receives `chant` and `theosis` output and `repent` prompts.
    pub output:   &'io mut dyn Write,
    /// Supplies lines to `repent`.
    pub input:    &'io mut dyn BufRead,
    /// Receives diagnostics.
    pub reporter: &'io mut dyn Reporter,
}

/// Stops an `unceasingly.pray:` loop from outside the program.
///
/// The dialect itself has no way to leave the loop. A host that wants one
/// keeps a clone of the token and calls [`CancelToken::cancel`]; the driver
/// checks it before every iteration and stops the program once it is set.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`CancelToken::cancel`] was called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Stores the state of one program run.
///
/// Holds the source, both symbol tables and the cursor: the index of the
/// next line to read. Calling a function moves the cursor into the function
/// body and puts it back afterwards.
///
/// ## Usage
///
/// ```
/// use std::io;
///
/// use orthoc::{
///     config::Config,
///     interpreter::core::{Interpreter, Io},
///     report::Diagnostics,
/// };
///
/// let program = "Prayer:\ninvoke greet() {\nchant(\"Hello, world!\")\n}\ncall.upon greet\n";
///
/// let mut output = Vec::<u8>::new();
/// let mut input = io::empty();
/// let mut diagnostics = Diagnostics::default();
/// let io = Io { output:   &mut output,
///               input:    &mut input,
///               reporter: &mut diagnostics, };
///
/// Interpreter::new(program, Config::default(), io).run().unwrap();
/// assert_eq!(String::from_utf8(output).unwrap(), "Hello, world!\n");
/// ```
pub struct Interpreter<'src, 'io> {
    pub(crate) source:       Source<'src>,
    pub(crate) functions:    FunctionTable,
    pub(crate) variables:    VariableTable,
    pub(crate) cursor:       usize,
    /// Definitions whose body has no closing `}`.
    pub(crate) unterminated: Vec<usize>,
    pub(crate) config:       Config,
    pub(crate) io:           Io<'io>,
    pub(crate) cancel:       CancelToken,
}

impl<'src, 'io> Interpreter<'src, 'io> {
    /// Creates an interpreter for `text` with empty tables.
    #[must_use]
    pub fn new(text: &'src str, config: Config, io: Io<'io>) -> Self {
        Self { source: Source::new(text),
               functions: FunctionTable::new(),
               variables: VariableTable::new(),
               cursor: 0,
               unterminated: Vec::new(),
               config,
               io,
               cancel: CancelToken::new() }
    }

    /// Replaces the cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The index of the next line to read.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamped to the end of the source.
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.source.len());
    }

    /// The function table.
    #[must_use]
    pub const fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// The variable table.
    #[must_use]
    pub const fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub(crate) fn report(&mut self, error: &RuntimeError) {
        self.io.reporter.report(error);
    }

    /// Writes program output.
    pub(crate) fn emit(&mut self, args: fmt::Arguments<'_>) -> Result<(), FatalError> {
        self.io
            .output
            .write_fmt(args)
            .map_err(|source| FatalError::OutputFailure { source })
    }
}

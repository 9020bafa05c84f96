use tracing::debug;

use crate::{
    error::FatalError,
    interpreter::{
        core::Interpreter,
        directive::{TopLevel, classify_top_level},
        scanner::scan,
        source::Source,
    },
};

/// Printed when a program has no `Prayer:` header line.
pub const HEADER_REMINDER: &str =
    "Remember to pray to our Father and to the most holy saints in heaven";

impl Interpreter<'_, '_> {
    /// Scans the source and replaces both symbol tables with the result.
    ///
    /// Returns whether the header marker was found.
    ///
    /// # Errors
    /// `MemoryExhaustion` if a table cannot grow.
    pub fn load(&mut self) -> Result<bool, FatalError> {
        let output = scan(&self.source, self.io.reporter)?;
        self.functions = output.functions;
        self.variables = output.variables;
        self.unterminated = output.unterminated;
        self.cursor = 0;
        Ok(output.header_seen)
    }

    /// Runs the whole program.
    ///
    /// Scans the source, prints the header reminder when the header is
    /// missing, then walks the top-level lines from the start and performs
    /// every `call.upon` and `unceasingly.pray:` directive. Lines inside
    /// function bodies are skipped by this walk; a definition without a
    /// closing `}` opens no body, so the lines after it are still walked.
    ///
    /// # Errors
    /// Only fatal errors are returned; everything else is reported.
    pub fn run(&mut self) -> Result<(), FatalError> {
        if !self.load()? {
            self.emit(format_args!("{HEADER_REMINDER}\n"))?;
        }

        self.cursor = 0;
        let mut in_body = false;

        while let Some(raw) = self.source.line(self.cursor) {
            if self.cancel.is_cancelled() {
                debug!(line = Source::line_number(self.cursor), "run cancelled");
                break;
            }

            let index = self.cursor;
            let line = Source::line_number(index);
            self.cursor += 1;

            match classify_top_level(raw.trim()) {
                Some(TopLevel::Definition { .. }) => in_body = !self.unterminated.contains(&index),
                Some(TopLevel::Terminator) => in_body = false,
                _ if in_body => {},
                Some(TopLevel::Call { name }) => self.execute(name, line)?,
                Some(TopLevel::RepeatCall { name }) => self.repeat(name, line)?,
                _ => {},
            }
        }

        Ok(())
    }

    /// Executes `name` over and over.
    ///
    /// There is no exit condition in the language; only the host's
    /// [`CancelToken`](crate::interpreter::core::CancelToken) ends the loop.
    fn repeat(&mut self, name: &str, line: usize) -> Result<(), FatalError> {
        debug!(name, line, "entering unbounded repeat");

        while !self.cancel.is_cancelled() {
            self.execute(name, line)?;
        }

        Ok(())
    }
}

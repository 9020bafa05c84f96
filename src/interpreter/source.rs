/// A program split into lines.
///
/// Positions are 0-based line indexes; diagnostics use
/// [`Source::line_number`] to turn them into 1-based line numbers. The
/// interpreter's cursor is an index into this sequence.
#[derive(Debug, Clone)]
pub struct Source<'src> {
    lines: Vec<&'src str>,
}

impl<'src> Source<'src> {
    /// Splits `text` into lines. Both `\n` and `\r\n` endings are accepted.
    ///
    /// # Example
    /// ```
    /// use orthoc::interpreter::source::Source;
    ///
    /// let source = Source::new("Prayer:\r\ncall.upon greet\n");
    /// assert_eq!(source.len(), 2);
    /// assert_eq!(source.line(1), Some("call.upon greet"));
    /// assert_eq!(source.line(2), None);
    /// ```
    #[must_use]
    pub fn new(text: &'src str) -> Self {
        Self { lines: text.lines().collect() }
    }

    /// Returns the raw line at `index`, or `None` past the end.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&'src str> {
        self.lines.get(index).copied()
    }

    /// Iterates over `(index, line)` pairs from the start of the program.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &'src str)> + '_ {
        self.lines.iter().copied().enumerate()
    }

    /// Number of lines in the program.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` for an empty program.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Converts a line index into the 1-based number used in diagnostics.
    #[must_use]
    pub const fn line_number(index: usize) -> usize {
        index + 1
    }
}

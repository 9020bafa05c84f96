use std::{io, path::PathBuf};

#[derive(Debug)]
/// Represents the errors that terminate the interpreter.
pub enum FatalError {
    /// The program source could not be read.
    FileOpenFailure {
        /// The path that was requested.
        path:   PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },
    /// A symbol table could not grow.
    MemoryExhaustion {
        /// The source line being processed when the allocation failed.
        line: usize,
    },
    /// Writing program output failed.
    OutputFailure {
        /// The underlying I/O failure.
        source: io::Error,
    },
}

impl std::fmt::Display for FatalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileOpenFailure { path, source } => {
                write!(f, "Unable to open file '{}': {source}", path.display())
            },
            Self::MemoryExhaustion { line } => {
                write!(f, "Line {line}: Memory allocation failed")
            },
            Self::OutputFailure { source } => write!(f, "Unable to write output: {source}"),
        }
    }
}

impl std::error::Error for FatalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileOpenFailure { source, .. } | Self::OutputFailure { source } => Some(source),
            Self::MemoryExhaustion { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all recoverable errors raised while scanning or running a
/// program.
///
/// Every variant carries the 1-indexed source line of the offending statement.
pub enum RuntimeError {
    /// Tried to read a variable that was never declared.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that was never defined.
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An expression exceeded the evaluation stack capacity.
    ExpressionTooComplex {
        /// The configured stack capacity.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An arithmetic expression could not be evaluated.
    MalformedExpression {
        /// What was wrong with the expression.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An `incense` declaration was malformed.
    InvalidDeclarationSyntax {
        /// What was wrong with the declaration.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A `chant` directive was malformed.
    InvalidOutputSyntax {
        /// What was wrong with the directive.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A `repent` directive was malformed.
    InvalidInputSyntax {
        /// What was wrong with the directive.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Reading from the interactive input failed or hit end of input.
    StreamReadFailure {
        /// Details about the failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A function body ran to the end of the source without a `}` line.
    MissingTerminator {
        /// The name of the function.
        name: String,
        /// The line of the function definition.
        line: usize,
    },
}

impl RuntimeError {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::DivisionByZero { line }
            | Self::ExpressionTooComplex { line, .. }
            | Self::MalformedExpression { line, .. }
            | Self::InvalidDeclarationSyntax { line, .. }
            | Self::InvalidOutputSyntax { line, .. }
            | Self::InvalidInputSyntax { line, .. }
            | Self::StreamReadFailure { line, .. }
            | Self::MissingTerminator { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Line {line}: Undefined variable '{name}'")
            },
            Self::UndefinedFunction { name, line } => {
                write!(f, "Line {line}: Undefined function '{name}'")
            },
            Self::DivisionByZero { line } => write!(f, "Line {line}: Division by zero"),
            Self::ExpressionTooComplex { limit, line } => write!(f,
                                                                 "Line {line}: Expression too complex (more than {limit} elements)"),
            Self::MalformedExpression { details, line } => {
                write!(f, "Line {line}: Malformed expression: {details}")
            },
            Self::InvalidDeclarationSyntax { details, line }
            | Self::InvalidOutputSyntax { details, line }
            | Self::InvalidInputSyntax { details, line }
            | Self::StreamReadFailure { details, line } => write!(f, "Line {line}: {details}"),
            Self::MissingTerminator { name, line } => write!(f,
                                                             "Line {line}: Function '{name}' reached end of file without a closing '}}'"),
        }
    }
}

impl std::error::Error for RuntimeError {}

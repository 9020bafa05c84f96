use crate::error::RuntimeError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating an arithmetic
/// expression.
pub enum EvalError {
    /// The right-hand side of a division was zero.
    DivisionByZero,
    /// One of the evaluation stacks reached its capacity.
    ExpressionTooComplex {
        /// The configured stack capacity.
        limit: usize,
    },
    /// The expression text does not form a valid expression.
    MalformedExpression {
        /// What was wrong with the expression.
        details: String,
    },
}

impl EvalError {
    pub(crate) fn malformed(details: impl Into<String>) -> Self {
        Self::MalformedExpression { details: details.into() }
    }

    /// Attaches a source line, turning the error into a reportable
    /// [`RuntimeError`].
    ///
    /// # Example
    /// ```
    /// use orthoc::error::{EvalError, RuntimeError};
    ///
    /// let err = EvalError::DivisionByZero.at_line(7);
    /// assert!(matches!(err, RuntimeError::DivisionByZero { line: 7 }));
    /// ```
    #[must_use]
    pub fn at_line(self, line: usize) -> RuntimeError {
        match self {
            Self::DivisionByZero => RuntimeError::DivisionByZero { line },
            Self::ExpressionTooComplex { limit } => {
                RuntimeError::ExpressionTooComplex { limit, line }
            },
            Self::MalformedExpression { details } => {
                RuntimeError::MalformedExpression { details, line }
            },
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::ExpressionTooComplex { limit } => {
                write!(f, "Expression too complex (more than {limit} elements)")
            },
            Self::MalformedExpression { details } => write!(f, "Malformed expression: {details}"),
        }
    }
}

impl std::error::Error for EvalError {}

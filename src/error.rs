/// Expression evaluation errors.
///
/// Raised by the arithmetic evaluator. They carry no source location since the
/// evaluator only sees the expression text; the statement that invoked it
/// attaches the line when converting into a [`RuntimeError`].
pub mod eval_error;
/// Fatal errors.
///
/// Conditions that stop the interpreter: the source cannot be read, a table
/// cannot grow, or standard output is gone.
pub mod fatal_error;
/// Recoverable runtime errors.
///
/// Contains every diagnostic a running program can produce: malformed
/// directives, unknown names, failed input and evaluation failures. These are
/// reported and execution continues with the next line.
pub mod runtime_error;

pub use eval_error::EvalError;
pub use fatal_error::FatalError;
pub use runtime_error::RuntimeError;

/// Interpreter state and the streams it talks to.
///
/// Declares [`Interpreter`](crate::interpreter::core::Interpreter), which owns the source, both
/// symbol tables and the cursor, together with the [`Io`](crate::interpreter::core::Io) bundle and
/// the host-side [`CancelToken`](crate::interpreter::core::CancelToken).
pub mod core;
/// Line classification.
///
/// Recognizes the directive forms of the dialect by their keyword prefix and
/// parses them into typed statements, or into the diagnostic describing why a
/// recognized form is malformed.
pub mod directive;
/// The arithmetic evaluator.
///
/// A two-stack shunting-yard evaluator over whitespace-separated tokens with
/// bounded stacks.
pub mod evaluator;
/// Function execution.
///
/// Moves the cursor into a function body, runs its statements until the
/// closing `}` and restores the cursor.
pub mod executor;
/// Expression tokens.
pub mod lexer;
/// The program driver.
///
/// Runs the scan, then walks the top-level lines and performs the call
/// directives.
pub mod program;
/// The pre-execution scan that fills the symbol tables.
pub mod scanner;
/// The program text as an indexed sequence of lines.
pub mod source;
/// Function and variable tables.
pub mod symbols;

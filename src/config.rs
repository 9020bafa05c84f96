use crate::interpreter::evaluator::MAX_EXPR_ELEMENTS;

/// Interpreter settings.
///
/// The binary builds this from its command-line flags; library users start
/// from [`Config::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Capacity of each arithmetic evaluation stack. Longer expressions fail
    /// with `ExpressionTooComplex`.
    pub max_expr_elements: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_expr_elements: MAX_EXPR_ELEMENTS }
    }
}

use std::fmt;

use crate::{error::EvalError, interpreter::lexer::{ExprToken, classify_word}};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, EvalError>;

/// Default capacity of the operand and operator stacks.
pub const MAX_EXPR_ELEMENTS: usize = 100;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Operator {
    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    /// Applies the operator to two operands.
    ///
    /// # Example
    /// ```
    /// use orthoc::{error::EvalError, interpreter::evaluator::Operator};
    ///
    /// assert_eq!(Operator::Sub.apply(7.0, 2.0), Ok(5.0));
    /// assert_eq!(Operator::Div.apply(1.0, 0.0), Err(EvalError::DivisionByZero));
    /// ```
    pub fn apply(self, left: f64, right: f64) -> EvalResult<f64> {
        match self {
            Self::Add => Ok(left + right),
            Self::Sub => Ok(left - right),
            Self::Mul => Ok(left * right),
            Self::Div => {
                if right == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(left / right)
            },
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{symbol}")
    }
}

/// An entry on the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Paren,
    Binary(Operator),
}

/// The two bounded stacks of the shunting-yard algorithm.
struct Stacks {
    operands:  Vec<f64>,
    operators: Vec<Pending>,
    limit:     usize,
}

impl Stacks {
    fn new(limit: usize) -> Self {
        Self { operands: Vec::with_capacity(limit.min(MAX_EXPR_ELEMENTS)),
               operators: Vec::with_capacity(limit.min(MAX_EXPR_ELEMENTS)),
               limit }
    }

    fn is_full(&self) -> bool {
        self.operands.len() >= self.limit || self.operators.len() >= self.limit
    }

    /// Pops two operands, applies `op` and pushes the result.
    fn reduce(&mut self, op: Operator) -> EvalResult<()> {
        let (Some(right), Some(left)) = (self.operands.pop(), self.operands.pop()) else {
            return Err(EvalError::malformed(format!("operator '{op}' is missing an operand")));
        };
        self.operands.push(op.apply(left, right)?);
        Ok(())
    }

    /// Applies operators down to the nearest `(`, which is discarded.
    ///
    /// Without a `(` on the stack every pending operator is applied.
    fn close_paren(&mut self) -> EvalResult<()> {
        while let Some(top) = self.operators.pop() {
            match top {
                Pending::Paren => return Ok(()),
                Pending::Binary(op) => self.reduce(op)?,
            }
        }
        Ok(())
    }

    fn push_operator(&mut self, incoming: Operator) -> EvalResult<()> {
        while let Some(&Pending::Binary(top)) = self.operators.last() {
            if top.precedence() < incoming.precedence() {
                break;
            }
            self.operators.pop();
            self.reduce(top)?;
        }
        self.operators.push(Pending::Binary(incoming));
        Ok(())
    }

    fn finish(mut self) -> EvalResult<f64> {
        while let Some(top) = self.operators.pop() {
            match top {
                Pending::Paren => return Err(EvalError::malformed("unmatched '('")),
                Pending::Binary(op) => self.reduce(op)?,
            }
        }

        match self.operands.as_slice() {
            [value] if value.is_nan() => Err(EvalError::malformed("result is not a number")),
            [value] => Ok(*value),
            [] => Err(EvalError::malformed("expression is empty")),
            _ => Err(EvalError::malformed("operands without an operator between them")),
        }
    }
}

/// Evaluates an arithmetic expression of whitespace-separated tokens.
///
/// Supports `+ - * /` with the usual precedence, left associativity and
/// parentheses. Every token, parentheses included, must be separated by
/// whitespace. A `)` without a matching `(` applies all pending operators and
/// is otherwise ignored.
///
/// # Parameters
/// - `expression`: The expression text, for example `( 2 + 3 ) * 4`.
/// - `limit`: Capacity of each evaluation stack.
///
/// # Errors
/// - `DivisionByZero` when any division has a zero divisor.
/// - `ExpressionTooComplex` when a stack already holds `limit` entries.
/// - `MalformedExpression` for invalid words, missing operands, unbalanced
///   `(` and a result that is not a number.
///
/// # Example
/// ```
/// use orthoc::{error::EvalError, interpreter::evaluator::evaluate};
///
/// assert_eq!(evaluate("2 + 3 * 4", 100), Ok(14.0));
/// assert_eq!(evaluate("( 2 + 3 ) * 4", 100), Ok(20.0));
/// assert_eq!(evaluate("1 / 0", 100), Err(EvalError::DivisionByZero));
/// ```
pub fn evaluate(expression: &str, limit: usize) -> EvalResult<f64> {
    let mut stacks = Stacks::new(limit);

    for word in expression.split_whitespace() {
        if stacks.is_full() {
            return Err(EvalError::ExpressionTooComplex { limit });
        }

        let token = classify_word(word).ok_or_else(|| {
                                           EvalError::malformed(format!("invalid number in expression: '{word}'"))
                                       })?;

        match token {
            ExprToken::LParen => stacks.operators.push(Pending::Paren),
            ExprToken::RParen => stacks.close_paren()?,
            ExprToken::Plus => stacks.push_operator(Operator::Add)?,
            ExprToken::Minus => stacks.push_operator(Operator::Sub)?,
            ExprToken::Star => stacks.push_operator(Operator::Mul)?,
            ExprToken::Slash => stacks.push_operator(Operator::Div)?,
            ExprToken::Number(value) => stacks.operands.push(value),
        }
    }

    stacks.finish()
}

/// Evaluates an expression with the default stack capacity.
///
/// # Errors
/// See [`evaluate`].
pub fn evaluate_default(expression: &str) -> EvalResult<f64> {
    evaluate(expression, MAX_EXPR_ELEMENTS)
}

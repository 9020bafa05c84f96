use logos::Logos;

/// A single word of an arithmetic expression.
///
/// Expressions are split on whitespace first; every word must then lex to
/// exactly one of these tokens.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum ExprToken {
    /// Numeric literal tokens, such as `3`, `-2.5`, `.5` or `1e-3`.
    #[regex(r"[+-]?[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"[+-]?\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
}

/// Classifies one whitespace-delimited word.
///
/// Returns `None` when the word is not exactly one token, for example `2x`,
/// `(3` or `foo`.
///
/// # Example
/// ```
/// use orthoc::interpreter::lexer::{ExprToken, classify_word};
///
/// assert_eq!(classify_word("-2.5"), Some(ExprToken::Number(-2.5)));
/// assert_eq!(classify_word("-"), Some(ExprToken::Minus));
/// assert_eq!(classify_word("2x"), None);
/// ```
#[must_use]
pub fn classify_word(word: &str) -> Option<ExprToken> {
    let mut lexer = ExprToken::lexer(word);

    match (lexer.next(), lexer.next()) {
        (Some(Ok(token)), None) => Some(token),
        _ => None,
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the slice is not a valid float.
fn parse_number(lex: &logos::Lexer<ExprToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

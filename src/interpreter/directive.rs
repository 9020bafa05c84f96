use crate::error::RuntimeError;

/// Line prefixes of the dialect. Matching is case-sensitive and happens on
/// trimmed lines.
pub mod keywords {
    /// Header marker line.
    pub const HEADER: &str = "Prayer:";
    /// Function definition: `invoke name() {`.
    pub const DEFINITION: &str = "invoke";
    /// Variable declaration: `incense name = "value";`.
    pub const DECLARATION: &str = "incense";
    /// Output: `chant("text"[, name])`.
    pub const OUTPUT: &str = "chant(";
    /// Arithmetic: `theosis(expr)[ > null]`.
    pub const ARITHMETIC: &str = "theosis(";
    /// Interactive input: `repent("prompt", name)`.
    pub const INPUT: &str = "repent(";
    /// End of a function body.
    pub const TERMINATOR: &str = "}";
    /// Single call: `call.upon name`.
    pub const CALL: &str = "call.upon";
    /// Unbounded repeat call: `unceasingly.pray: name`.
    pub const REPEAT_CALL: &str = "unceasingly.pray:";
    /// Discards the result of `theosis`.
    pub const SUPPRESS: &str = "> null";
}

/// A statement inside a function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `chant("template"[, variable])`
    Output {
        /// Text between the quotes.
        template: &'a str,
        /// Variable substituted into the template.
        variable: Option<&'a str>,
    },
    /// `incense name = "value";`
    Declaration(Declaration<'a>),
    /// `theosis(expression)[ > null]`
    Arithmetic {
        /// Text handed to the evaluator.
        expression: &'a str,
        /// `true` when the result must not be printed.
        suppressed: bool,
    },
    /// `repent("prompt", variable)`
    Input {
        /// Printed before reading.
        prompt:   &'a str,
        /// Receives the line read.
        variable: &'a str,
    },
    /// `}`
    Terminator,
}

/// A parsed `incense` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// The variable name.
    pub name:  &'a str,
    /// The string value without its quotes.
    pub value: &'a str,
}

/// A line as seen by the scanner and the program driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevel<'a> {
    /// `Prayer:`
    Header,
    /// `invoke name(...)`
    Definition {
        /// The function name, possibly empty.
        name: &'a str,
    },
    /// `incense ...`; the text after the keyword is parsed on demand.
    Declaration {
        /// Everything after `incense`.
        rest: &'a str,
    },
    /// `}`
    Terminator,
    /// `call.upon name`
    Call {
        /// The called function.
        name: &'a str,
    },
    /// `unceasingly.pray: name`
    RepeatCall {
        /// The repeated function.
        name: &'a str,
    },
}

/// Classifies a trimmed line outside of function execution.
///
/// Returns `None` for lines that carry no top-level meaning.
///
/// # Example
/// ```
/// use orthoc::interpreter::directive::{TopLevel, classify_top_level};
///
/// assert_eq!(classify_top_level("invoke greet() {"),
///            Some(TopLevel::Definition { name: "greet" }));
/// assert_eq!(classify_top_level("unceasingly.pray: greet"),
///            Some(TopLevel::RepeatCall { name: "greet" }));
/// assert_eq!(classify_top_level("chant(\"hi\")"), None);
/// ```
#[must_use]
pub fn classify_top_level(line: &str) -> Option<TopLevel<'_>> {
    use keywords::{CALL, DECLARATION, DEFINITION, HEADER, REPEAT_CALL, TERMINATOR};

    if line.starts_with(HEADER) {
        Some(TopLevel::Header)
    } else if let Some(rest) = line.strip_prefix(DEFINITION) {
        let name = rest.split_once('(').map_or(rest, |(name, _)| name);
        Some(TopLevel::Definition { name: name.trim() })
    } else if let Some(rest) = line.strip_prefix(DECLARATION) {
        Some(TopLevel::Declaration { rest })
    } else if line == TERMINATOR {
        Some(TopLevel::Terminator)
    } else if let Some(name) = line.strip_prefix(CALL) {
        Some(TopLevel::Call { name: name.trim() })
    } else {
        line.strip_prefix(REPEAT_CALL)
            .map(|name| TopLevel::RepeatCall { name: name.trim() })
    }
}

/// Classifies and parses a trimmed line of a function body.
///
/// Returns `None` for lines that are not statements; those are skipped
/// without a diagnostic. A recognized but malformed statement yields the
/// diagnostic to report.
///
/// # Example
/// ```
/// use orthoc::interpreter::directive::{Statement, parse_statement};
///
/// let statement = parse_statement("chant(\"x is %s\", x)", 3);
/// assert_eq!(statement,
///            Some(Ok(Statement::Output { template: "x is %s",
///                                        variable: Some("x"), })));
/// assert_eq!(parse_statement("call.upon greet", 3), None);
/// ```
#[must_use]
pub fn parse_statement(line: &str, line_number: usize) -> Option<Result<Statement<'_>, RuntimeError>> {
    use keywords::{ARITHMETIC, DECLARATION, INPUT, OUTPUT, TERMINATOR};

    if line.starts_with(OUTPUT) {
        Some(parse_output(line, line_number))
    } else if let Some(rest) = line.strip_prefix(DECLARATION) {
        Some(parse_declaration(rest, line_number).map(Statement::Declaration))
    } else if line.starts_with(ARITHMETIC) {
        Some(parse_arithmetic(line, line_number))
    } else if line.starts_with(INPUT) {
        Some(parse_input(line, line_number))
    } else if line == TERMINATOR {
        Some(Ok(Statement::Terminator))
    } else {
        None
    }
}

/// Parses the text following `incense`.
///
/// The value must be a double-quoted string whose closing quote (the last
/// quote on the line) is immediately followed by `;`.
///
/// # Errors
/// `InvalidDeclarationSyntax` describing the first problem found.
///
/// # Example
/// ```
/// use orthoc::interpreter::directive::parse_declaration;
///
/// let declaration = parse_declaration(" name = \"Basil\";", 1).unwrap();
/// assert_eq!((declaration.name, declaration.value), ("name", "Basil"));
///
/// assert!(parse_declaration(" name = \"Basil\"", 1).is_err());
/// ```
pub fn parse_declaration(rest: &str, line: usize) -> Result<Declaration<'_>, RuntimeError> {
    let error = |details: &str| RuntimeError::InvalidDeclarationSyntax { details: details.to_string(),
                                                                         line };

    let (name, value) =
        rest.split_once('=')
            .ok_or_else(|| error("Invalid variable declaration syntax"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(error("Missing variable name in declaration"));
    }

    let value = value.trim()
                     .strip_prefix('"')
                     .ok_or_else(|| error("Invalid variable value format"))?;
    let end_quote = value.rfind('"')
                         .ok_or_else(|| error("Unterminated string literal"))?;
    if !value[end_quote + 1..].starts_with(';') {
        return Err(error("Missing semicolon after variable declaration"));
    }

    Ok(Declaration { name,
                     value: &value[..end_quote] })
}

/// Why a quoted literal could not be extracted.
enum QuoteError {
    Missing,
    Unterminated,
}

/// Splits `text` into the first double-quoted literal and whatever follows
/// its closing quote.
fn split_quoted(text: &str) -> Result<(&str, &str), QuoteError> {
    let (_, after_open) = text.split_once('"').ok_or(QuoteError::Missing)?;
    after_open.split_once('"').ok_or(QuoteError::Unterminated)
}

/// Extracts the identifier of a trailing `, name)` argument.
fn trailing_argument(rest: &str) -> Option<&str> {
    let (_, argument) = rest.split_once(',')?;
    let argument = argument.split_once(')').map_or(argument, |(name, _)| name);
    Some(argument.trim())
}

fn parse_output(line: &str, line_number: usize) -> Result<Statement<'_>, RuntimeError> {
    let error = |details: &str| RuntimeError::InvalidOutputSyntax { details: details.to_string(),
                                                                    line:    line_number, };

    let (template, rest) = split_quoted(line).map_err(|e| match e {
                                                 QuoteError::Missing => error("Invalid chant syntax"),
                                                 QuoteError::Unterminated => error("Unterminated string in chant"),
                                             })?;

    Ok(Statement::Output { template,
                           variable: trailing_argument(rest) })
}

fn parse_arithmetic(line: &str, line_number: usize) -> Result<Statement<'_>, RuntimeError> {
    use keywords::{ARITHMETIC, SUPPRESS};

    let body = &line[ARITHMETIC.len()..];
    let Some(close) = body.rfind(')') else {
        let details = "Missing closing parenthesis in theosis".to_string();
        return Err(RuntimeError::MalformedExpression { details,
                                                       line: line_number });
    };

    let expression = body[..close].trim_end();
    let after = &body[close + 1..];

    Ok(match expression.strip_suffix(SUPPRESS) {
        Some(stripped) => Statement::Arithmetic { expression: stripped,
                                                  suppressed: true, },
        None => Statement::Arithmetic { expression,
                                        suppressed: after.contains(SUPPRESS) },
    })
}

fn parse_input(line: &str, line_number: usize) -> Result<Statement<'_>, RuntimeError> {
    let error = |details: &str| RuntimeError::InvalidInputSyntax { details: details.to_string(),
                                                                   line:    line_number, };

    let (prompt, rest) = split_quoted(line).map_err(|e| match e {
                                               QuoteError::Missing => error("Invalid repent syntax"),
                                               QuoteError::Unterminated => error("Unterminated string in repent"),
                                           })?;

    match trailing_argument(rest) {
        Some(variable) if !variable.is_empty() => Ok(Statement::Input { prompt, variable }),
        _ => Err(error("Invalid repent syntax, missing variable name")),
    }
}

pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod renderer;
pub mod symbol_table;
pub mod token;

use crate::debug;
use crate::interpreter::symbol_table::SymbolTable;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use string_builder::Builder;

/// Splits the given expression into classified tokens.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The tokens, in source order. Unrecognized input produces no
/// token and no error.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::tokenize;
///
/// let tokens = tokenize("(1 + 2) * 3".to_string());
/// assert_eq!(tokens.len(), 7);
/// ```
pub fn tokenize(expression: String) -> Vec<Token> {
    lexer::tokenize(SymbolTable::shared(), &expression)
}

/// Converts the given infix expression into a space-separated RPN string.
///
/// Unmatched parentheses and brackets are not an error; the conversion
/// drains whatever is pending at end of input, so malformed input yields
/// RPN that may not evaluate.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The equivalent expression in RPN, tokens separated by single
/// spaces.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use rpn_calculator::interpreter::infix_to_rpn;
///
/// let rpn = infix_to_rpn("(1 + 2) * (3 + 4)".to_string())?;
/// assert_eq!(rpn, "1 2 + 3 4 + *");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn infix_to_rpn(expression: String) -> Result<String> {
    let tokens = lexer::tokenize(SymbolTable::shared(), &expression);
    let postfix_tokens = parser::parse(SymbolTable::shared(), tokens);
    debug!(&postfix_tokens);
    tokens_to_string(postfix_tokens)
}

/// Evaluates the given RPN expression to a number.
///
/// Numeric domain errors propagate as NaN or infinity rather than failing;
/// structurally malformed input (operand underflow, unknown words, an empty
/// expression) is reported as an error.
///
/// # Arguments
///
/// * `expression`: A text expression in RPN format, tokens separated by
/// whitespace.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use rpn_calculator::interpreter::evaluate_rpn;
///
/// let value = evaluate_rpn("2 3 2 ^ ^".to_string())?;
/// assert_eq!(value, 512.0);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate_rpn(expression: String) -> Result<f64> {
    evaluator::evaluate(SymbolTable::shared(), &expression)
}

/// Rebuilds a fully parenthesized infix expression from the given RPN
/// expression. List literals are not reconstructed; their tokens pass
/// through verbatim.
///
/// # Arguments
///
/// * `expression`: A text expression in RPN format, tokens separated by
/// whitespace.
///
/// returns: The equivalent infix expression, fully parenthesized.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use rpn_calculator::interpreter::rpn_to_infix;
///
/// let infix = rpn_to_infix("2 10 pow".to_string())?;
/// assert_eq!(infix, "pow(2, 10)");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn rpn_to_infix(expression: String) -> Result<String> {
    renderer::render(SymbolTable::shared(), &expression)
}

/// Pretty-prints the given vector of tokens separated by single spaces.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::tokens_to_string;
/// use rpn_calculator::interpreter::token::Token;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::Number("2".to_string()),
///     Token::Number("3".to_string()),
///     Token::Operator("^".to_string()),
/// ];
/// let printed_tokens = tokens_to_string(tokens)?;
/// assert_eq!(printed_tokens, "2 3 ^");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());

    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            builder.append(" ");
        }
        builder.append(token.to_string());
    }

    builder.string().context("Failed to build token string")
}

#[macro_export]
#[cfg(debug_assertions)]
macro_rules! debug {
    ($( $args:expr ),*) => { dbg!( $( $args ),* ); }
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! debug {
    ($( $args:expr ),*) => {()}
}

use crate::interpreter::symbol_table::SymbolTable;
use anyhow::{Context, Result};

/// Rebuilds a fully parenthesized infix expression from a
/// whitespace-separated RPN expression.
///
/// Every operator application gains explicit parentheses, so precedence
/// never has to be reconstructed. List brackets and list-function names are
/// not understood here; they pass through as bare words, which does not
/// rebuild a valid list expression.
///
/// # Arguments
///
/// * `table`: The symbol registries used to resolve words.
/// * `expression`: A text expression in RPN format.
///
/// returns: The equivalent infix expression, fully parenthesized.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use rpn_calculator::interpreter::renderer::render;
/// use rpn_calculator::interpreter::symbol_table::SymbolTable;
///
/// let infix = render(SymbolTable::shared(), "16 sqrt 2 +")?;
/// assert_eq!(infix, "(sqrt(16) + 2)");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn render(table: &SymbolTable, expression: &str) -> Result<String> {
    let mut stack: Vec<String> = vec![];

    for token in expression.split_whitespace() {
        if table.is_operator(token) {
            let b = pop_rendered(&mut stack, token)?;
            let a = pop_rendered(&mut stack, token)?;
            stack.push(format!("({} {} {})", a, token, b));
            continue;
        }

        if table.is_unary_function(token) {
            let a = pop_rendered(&mut stack, token)?;
            stack.push(format!("{}({})", token, a));
            continue;
        }

        if table.is_binary_function(token) {
            let b = pop_rendered(&mut stack, token)?;
            let a = pop_rendered(&mut stack, token)?;
            stack.push(format!("{}({}, {})", token, a, b));
            continue;
        }

        // Numbers, constants, list brackets and list functions pass
        // through verbatim.
        stack.push(token.to_string());
    }

    stack.pop().context("The expression produced no value")
}

fn pop_rendered(stack: &mut Vec<String>, token: &str) -> Result<String> {
    stack
        .pop()
        .with_context(|| format!("Missing operand for '{}'", token))
}

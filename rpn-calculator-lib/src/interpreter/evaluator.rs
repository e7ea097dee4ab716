use crate::interpreter::symbol_table::SymbolTable;
use anyhow::{Context, Result};

/// A value on the evaluator's operand stack.
///
/// The list-start marker shares the stack with ordinary numbers. Keeping it
/// a separate variant means a computed NaN (say from `0 0 /`) cannot be
/// mistaken for a list boundary.
#[derive(Debug, Copy, Clone)]
enum StackValue {
    Number(f64),
    ListMarker,
}

impl StackValue {
    /// Reads the value as a number. The list marker reads as NaN, which is
    /// what arithmetic sees when it consumes one.
    fn into_number(self) -> f64 {
        match self {
            StackValue::Number(value) => value,
            StackValue::ListMarker => f64::NAN,
        }
    }
}

/// Reduces a whitespace-separated RPN expression to a single number.
///
/// The expression is split on whitespace, independently of the infix lexer,
/// so words like `ΣLIST` are valid here. NaN and infinity propagate through
/// the stack as values; structurally malformed input (operand underflow, a
/// word that is neither a symbol nor a number, an empty expression) is
/// reported as an error. Leftover values below the result are ignored.
///
/// # Arguments
///
/// * `table`: The symbol registries used to resolve words.
/// * `expression`: A text expression in RPN format.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use rpn_calculator::interpreter::evaluator::evaluate;
/// use rpn_calculator::interpreter::symbol_table::SymbolTable;
///
/// let value = evaluate(SymbolTable::shared(), "1 2 + 3 4 + *")?;
/// assert_eq!(value, 21.0);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate(table: &SymbolTable, expression: &str) -> Result<f64> {
    let mut stack: Vec<StackValue> = vec![];

    for token in expression.split_whitespace() {
        if token == "{" {
            stack.push(StackValue::ListMarker);
            continue;
        }
        if token == "}" {
            // List extraction happens at the consuming reducer.
            continue;
        }

        if let Some(operator) = table.operator(token) {
            let b = pop_operand(&mut stack, token)?;
            let a = pop_operand(&mut stack, token)?;
            stack.push(StackValue::Number((operator.apply)(a, b)));
            continue;
        }

        if let Some(function) = table.unary_function(token) {
            let a = pop_operand(&mut stack, token)?;
            stack.push(StackValue::Number((function.apply)(a)));
            continue;
        }

        if let Some(function) = table.binary_function(token) {
            let b = pop_operand(&mut stack, token)?;
            let a = pop_operand(&mut stack, token)?;
            stack.push(StackValue::Number((function.apply)(a, b)));
            continue;
        }

        if let Some(function) = table.list_function(token) {
            let values = pop_list(&mut stack);
            stack.push(StackValue::Number((function.reduce)(&values)));
            continue;
        }

        if let Some(value) = table.constant(token) {
            stack.push(StackValue::Number(value));
            continue;
        }

        let value: f64 = token
            .parse()
            .with_context(|| format!("'{}' is not a number, operator or function", token))?;
        stack.push(StackValue::Number(value));
    }

    stack
        .pop()
        .map(StackValue::into_number)
        .context("The expression produced no value")
}

fn pop_operand(stack: &mut Vec<StackValue>, token: &str) -> Result<f64> {
    stack
        .pop()
        .map(StackValue::into_number)
        .with_context(|| format!("Missing operand for '{}'", token))
}

/// Pops values back to the nearest list marker, restoring their original
/// push order. The marker itself is discarded; with no marker on the stack
/// the whole stack is consumed.
fn pop_list(stack: &mut Vec<StackValue>) -> Vec<f64> {
    let mut values: Vec<f64> = vec![];
    while let Some(&StackValue::Number(value)) = stack.last() {
        values.push(value);
        stack.pop();
    }
    if let Some(StackValue::ListMarker) = stack.last() {
        stack.pop();
    }
    values.reverse();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    fn evaluate_with_builtins(expression: &str) -> f64 {
        evaluate(SymbolTable::shared(), expression).unwrap()
    }

    #[parameterized(
    expression = {
    "1 2 +",
    "5 3 -",
    "4 5 *",
    "10 2 /",
    "7 3 %",
    "1 2 + 3 *",
    "1 2 + 3 4 + *",
    "2 3 2 ^ ^",
    },
    expected = {
    3.0,
    2.0,
    20.0,
    5.0,
    1.0,
    9.0,
    21.0,
    512.0,
    }
    )]
    fn arithmetic_evaluates_to_expected_value(expression: &str, expected: f64) {
        assert_eq!(evaluate_with_builtins(expression), expected);
    }

    #[parameterized(
    expression = {
    "16 sqrt",
    "-5 abs",
    "0 cos",
    "0 sin",
    "2 10 pow",
    "3 7 max",
    "10 5 min",
    "17 5 mod",
    },
    expected = {
    4.0,
    5.0,
    1.0,
    0.0,
    1024.0,
    7.0,
    5.0,
    2.0,
    }
    )]
    fn function_calls_evaluate_to_expected_value(expression: &str, expected: f64) {
        assert_eq!(evaluate_with_builtins(expression), expected);
    }

    #[test]
    fn transcendental_functions_evaluate_within_tolerance() {
        assert!((evaluate_with_builtins("1 exp") - std::f64::consts::E).abs() < 1e-10);
        assert!((evaluate_with_builtins("1 exp log") - 1.0).abs() < 1e-10);
        assert!((evaluate_with_builtins("1 1 atan2") - std::f64::consts::FRAC_PI_4).abs() < 1e-10);
    }

    #[test]
    fn constants_push_their_values() {
        assert!((evaluate_with_builtins("pi") - std::f64::consts::PI).abs() < 1e-10);
        assert!((evaluate_with_builtins("e") - std::f64::consts::E).abs() < 1e-10);
        assert!((evaluate_with_builtins("π") - std::f64::consts::PI).abs() < 1e-10);
        assert!((evaluate_with_builtins("τ") - std::f64::consts::TAU).abs() < 1e-10);
    }

    #[test]
    fn unicode_words_resolve_like_their_ascii_spellings() {
        assert_eq!(evaluate_with_builtins("3 4 ×"), 12.0);
        assert_eq!(evaluate_with_builtins("8 2 ÷"), 4.0);
        assert_eq!(evaluate_with_builtins("16 √"), 4.0);
        assert_eq!(evaluate_with_builtins("{ 1 2 3 } ΣLIST"), 6.0);
        assert_eq!(evaluate_with_builtins("{ 2 3 4 } ΠLIST"), 24.0);
    }

    #[test]
    fn negative_literals_are_operands() {
        assert_eq!(evaluate_with_builtins("-5 3 +"), -2.0);
        assert_eq!(evaluate_with_builtins("-3 -2 *"), 6.0);
        assert_eq!(evaluate_with_builtins("-9 abs"), 9.0);
    }

    #[parameterized(
    expression = {
    "{ 1 2 3 4 5 } sum",
    "{ 1 2 3 4 5 } product",
    "{ 2 4 6 8 10 } mean",
    "{ 1 3 5 } median",
    "{ 5 1 3 } median",
    "{ 1 2 3 4 } median",
    "{ 3 1 4 1 5 9 2 6 } median",
    "{ 2 4 6 8 } var",
    "{ 3 1 4 1 5 9 2 6 } lmax",
    "{ 3 1 4 1 5 9 2 6 } lmin",
    "{ 3 1 4 1 5 9 2 6 } range",
    "{ 10 20 30 } range",
    "{ 1 2 3 4 5 } count",
    },
    expected = {
    15.0,
    120.0,
    6.0,
    3.0,
    3.0,
    2.5,
    3.5,
    5.0,
    9.0,
    1.0,
    8.0,
    20.0,
    5.0,
    }
    )]
    fn list_reducers_evaluate_to_expected_value(expression: &str, expected: f64) {
        assert_eq!(evaluate_with_builtins(expression), expected);
    }

    #[test]
    fn sample_statistics_evaluate_within_tolerance() {
        assert!((evaluate_with_builtins("{ 2 4 6 8 } svar") - 20.0 / 3.0).abs() < 1e-10);
        assert!((evaluate_with_builtins("{ 2 4 6 8 } stddev") - 5.0_f64.sqrt()).abs() < 1e-10);
        assert!(
            (evaluate_with_builtins("{ 2 4 6 8 } sstddev") - (20.0 / 3.0_f64).sqrt()).abs()
                < 1e-10
        );
    }

    #[test]
    fn empty_lists_follow_the_reducer_policies() {
        assert_eq!(evaluate_with_builtins("{ } sum"), 0.0);
        assert_eq!(evaluate_with_builtins("{ } product"), 1.0);
        assert_eq!(evaluate_with_builtins("{ } svar"), 0.0);
        assert_eq!(evaluate_with_builtins("{ } count"), 0.0);
    }

    #[test]
    fn reduced_lists_combine_with_operators() {
        let expected = 5.0 + 5.0_f64.sqrt();
        let actual = evaluate_with_builtins("{ 2 4 6 8 } mean { 2 4 6 8 } stddev +");
        assert!((actual - expected).abs() < 1e-10);
    }

    #[test]
    fn division_by_zero_propagates_ieee_values() {
        assert!(evaluate_with_builtins("0 0 /").is_nan());
        assert_eq!(evaluate_with_builtins("1 0 /"), f64::INFINITY);
    }

    #[test]
    fn computed_nan_is_not_a_list_boundary() {
        // The NaN lands inside the list as an ordinary value; only the
        // marker ends the collection.
        assert_eq!(evaluate_with_builtins("{ 0 0 / 5 } count"), 2.0);
    }

    #[test]
    fn lone_list_marker_reads_as_nan() {
        assert!(evaluate_with_builtins("{ }").is_nan());
    }

    #[test]
    fn extra_values_below_the_result_are_ignored() {
        assert_eq!(evaluate_with_builtins("1 2 3"), 3.0);
    }

    #[test]
    fn malformed_expressions_are_errors() {
        assert!(evaluate(SymbolTable::shared(), "").is_err());
        assert!(evaluate(SymbolTable::shared(), "1 +").is_err());
        assert!(evaluate(SymbolTable::shared(), "garbage").is_err());
    }
}

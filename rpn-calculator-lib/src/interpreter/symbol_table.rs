use itertools::Itertools;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::f64::consts;

/// Which way equal-precedence chains of an operator group.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// A binary infix operator.
pub struct OperatorSpec {
    pub precedence: u8,
    pub associativity: Associativity,
    pub apply: fn(f64, f64) -> f64,
}

/// A function of one argument, called as `name(x)`.
pub struct UnaryFunctionSpec {
    pub apply: fn(f64) -> f64,
}

/// A function of two arguments, called as `name(x, y)`.
pub struct BinaryFunctionSpec {
    pub apply: fn(f64, f64) -> f64,
}

/// A reducer over the contents of a `{ ... }` list literal. Total over
/// possibly-empty slices; each reducer has its own empty-input policy.
pub struct ListFunctionSpec {
    pub reduce: fn(&[f64]) -> f64,
}

lazy_static! {
    static ref SHARED: SymbolTable = SymbolTable::new();
}

/// The read-only registries of operators, functions and constants, queried
/// by exact (case-sensitive) symbol match.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::symbol_table::SymbolTable;
///
/// let table = SymbolTable::shared();
/// assert!(table.is_operator("÷"));
/// assert!(table.is_right_associative("^"));
/// assert_eq!(table.precedence_of("*"), 2);
/// ```
pub struct SymbolTable {
    operators: HashMap<&'static str, OperatorSpec>,
    unary_functions: HashMap<&'static str, UnaryFunctionSpec>,
    binary_functions: HashMap<&'static str, BinaryFunctionSpec>,
    list_functions: HashMap<&'static str, ListFunctionSpec>,
    constants: HashMap<&'static str, f64>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            operators: build_operators(),
            unary_functions: build_unary_functions(),
            binary_functions: build_binary_functions(),
            list_functions: build_list_functions(),
            constants: build_constants(),
        }
    }

    /// The process-wide table of built-in symbols, initialized on first use
    /// and never mutated afterwards.
    pub fn shared() -> &'static SymbolTable {
        &SHARED
    }

    pub fn operator(&self, symbol: &str) -> Option<&OperatorSpec> {
        self.operators.get(symbol)
    }

    pub fn unary_function(&self, name: &str) -> Option<&UnaryFunctionSpec> {
        self.unary_functions.get(name)
    }

    pub fn binary_function(&self, name: &str) -> Option<&BinaryFunctionSpec> {
        self.binary_functions.get(name)
    }

    pub fn list_function(&self, name: &str) -> Option<&ListFunctionSpec> {
        self.list_functions.get(name)
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.operators.contains_key(symbol)
    }

    pub fn is_unary_function(&self, name: &str) -> bool {
        self.unary_functions.contains_key(name)
    }

    pub fn is_binary_function(&self, name: &str) -> bool {
        self.binary_functions.contains_key(name)
    }

    pub fn is_list_function(&self, name: &str) -> bool {
        self.list_functions.contains_key(name)
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    /// The precedence of the given operator symbol, or 0 for anything that
    /// is not a registered operator.
    pub fn precedence_of(&self, symbol: &str) -> u8 {
        self.operators
            .get(symbol)
            .map_or(0, |operator| operator.precedence)
    }

    pub fn is_right_associative(&self, symbol: &str) -> bool {
        self.operators
            .get(symbol)
            .map_or(false, |operator| operator.associativity == Associativity::Right)
    }
}

fn build_operators() -> HashMap<&'static str, OperatorSpec> {
    fn left(precedence: u8, apply: fn(f64, f64) -> f64) -> OperatorSpec {
        OperatorSpec {
            precedence,
            associativity: Associativity::Left,
            apply,
        }
    }

    let mut operators = HashMap::new();
    operators.insert("+", left(1, |a, b| a + b));
    operators.insert("-", left(1, |a, b| a - b));
    operators.insert("*", left(2, |a, b| a * b));
    operators.insert("/", left(2, |a, b| a / b));
    operators.insert("%", left(2, |a, b| a % b));
    operators.insert(
        "^",
        OperatorSpec {
            precedence: 3,
            associativity: Associativity::Right,
            apply: |a, b| f64::powf(a, b),
        },
    );
    // Unicode spellings of multiplication and division.
    operators.insert("×", left(2, |a, b| a * b));
    operators.insert("÷", left(2, |a, b| a / b));
    operators.insert("·", left(2, |a, b| a * b));
    operators
}

fn build_unary_functions() -> HashMap<&'static str, UnaryFunctionSpec> {
    let mut functions = HashMap::new();
    functions.insert("sqrt", UnaryFunctionSpec { apply: f64::sqrt });
    functions.insert("sin", UnaryFunctionSpec { apply: f64::sin });
    functions.insert("cos", UnaryFunctionSpec { apply: f64::cos });
    functions.insert("tan", UnaryFunctionSpec { apply: f64::tan });
    // `log` is the natural logarithm, like `ln`.
    functions.insert("log", UnaryFunctionSpec { apply: f64::ln });
    functions.insert("ln", UnaryFunctionSpec { apply: f64::ln });
    functions.insert("log10", UnaryFunctionSpec { apply: f64::log10 });
    functions.insert("abs", UnaryFunctionSpec { apply: f64::abs });
    functions.insert("exp", UnaryFunctionSpec { apply: f64::exp });
    functions.insert("floor", UnaryFunctionSpec { apply: f64::floor });
    functions.insert("ceil", UnaryFunctionSpec { apply: f64::ceil });
    functions.insert("√", UnaryFunctionSpec { apply: f64::sqrt });
    functions
}

fn build_binary_functions() -> HashMap<&'static str, BinaryFunctionSpec> {
    let mut functions = HashMap::new();
    functions.insert(
        "pow",
        BinaryFunctionSpec {
            apply: |a, b| f64::powf(a, b),
        },
    );
    functions.insert("max", BinaryFunctionSpec { apply: f64::max });
    functions.insert("min", BinaryFunctionSpec { apply: f64::min });
    functions.insert("atan2", BinaryFunctionSpec { apply: f64::atan2 });
    functions.insert("mod", BinaryFunctionSpec { apply: |a, b| a % b });
    functions
}

fn build_list_functions() -> HashMap<&'static str, ListFunctionSpec> {
    let mut functions = HashMap::new();
    functions.insert("sum", ListFunctionSpec { reduce: sum });
    functions.insert("ΣLIST", ListFunctionSpec { reduce: sum });
    functions.insert("product", ListFunctionSpec { reduce: product });
    functions.insert("ΠLIST", ListFunctionSpec { reduce: product });
    functions.insert("mean", ListFunctionSpec { reduce: mean });
    functions.insert("var", ListFunctionSpec { reduce: variance });
    functions.insert("svar", ListFunctionSpec { reduce: sample_variance });
    functions.insert(
        "stddev",
        ListFunctionSpec {
            reduce: standard_deviation,
        },
    );
    functions.insert(
        "sstddev",
        ListFunctionSpec {
            reduce: sample_standard_deviation,
        },
    );
    functions.insert("median", ListFunctionSpec { reduce: median });
    functions.insert("lmax", ListFunctionSpec { reduce: list_max });
    functions.insert("lmin", ListFunctionSpec { reduce: list_min });
    functions.insert("range", ListFunctionSpec { reduce: range });
    functions.insert("count", ListFunctionSpec { reduce: count });
    functions
}

fn build_constants() -> HashMap<&'static str, f64> {
    let mut constants = HashMap::new();
    constants.insert("pi", consts::PI);
    constants.insert("PI", consts::PI);
    constants.insert("π", consts::PI);
    constants.insert("e", consts::E);
    constants.insert("E", consts::E);
    constants.insert("τ", consts::TAU);
    constants
}

fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

fn product(values: &[f64]) -> f64 {
    values.iter().product()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Population variance: Σ(x − μ)² / n.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let squared_deviations: f64 = values.iter().map(|x| (x - mean) * (x - mean)).sum();
    squared_deviations / values.len() as f64
}

/// Sample variance: Σ(x − μ)² / (n − 1), 0 for fewer than two values.
fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let squared_deviations: f64 = values.iter().map(|x| (x - mean) * (x - mean)).sum();
    squared_deviations / (values.len() - 1) as f64
}

fn standard_deviation(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

fn sample_standard_deviation(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted: Vec<f64> = values.iter().copied().sorted_by(f64::total_cmp).collect();
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}

fn list_max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

fn list_min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

fn range(values: &[f64]) -> f64 {
    list_max(values) - list_min(values)
}

fn count(values: &[f64]) -> f64 {
    values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_unicode_operators_are_registered() {
        let table = SymbolTable::new();
        for symbol in ["+", "-", "*", "/", "%", "^", "×", "÷", "·"] {
            assert!(table.is_operator(symbol), "missing operator {}", symbol);
        }
        assert!(!table.is_operator("sqrt"));
        assert!(!table.is_operator("123"));
    }

    #[test]
    fn precedence_orders_additive_below_multiplicative_below_power() {
        let table = SymbolTable::new();
        assert_eq!(table.precedence_of("+"), 1);
        assert_eq!(table.precedence_of("-"), 1);
        assert_eq!(table.precedence_of("*"), 2);
        assert_eq!(table.precedence_of("/"), 2);
        assert_eq!(table.precedence_of("%"), 2);
        assert_eq!(table.precedence_of("×"), 2);
        assert_eq!(table.precedence_of("÷"), 2);
        assert_eq!(table.precedence_of("^"), 3);
        assert_eq!(table.precedence_of("sqrt"), 0);
    }

    #[test]
    fn only_exponentiation_is_right_associative() {
        let table = SymbolTable::new();
        assert!(table.is_right_associative("^"));
        for symbol in ["+", "-", "*", "/", "%", "×", "÷", "·"] {
            assert!(!table.is_right_associative(symbol));
        }
    }

    #[test]
    fn function_arities_do_not_overlap() {
        let table = SymbolTable::new();
        assert!(table.is_unary_function("sqrt"));
        assert!(table.is_unary_function("√"));
        assert!(!table.is_unary_function("pow"));
        assert!(table.is_binary_function("pow"));
        assert!(!table.is_binary_function("sqrt"));
        assert!(table.is_list_function("sum"));
        assert!(table.is_list_function("ΣLIST"));
        assert!(!table.is_list_function("max"));
    }

    #[test]
    fn constant_lookups_are_case_sensitive() {
        let table = SymbolTable::new();
        assert_eq!(table.constant("pi"), Some(consts::PI));
        assert_eq!(table.constant("PI"), Some(consts::PI));
        assert_eq!(table.constant("π"), Some(consts::PI));
        assert_eq!(table.constant("e"), Some(consts::E));
        assert_eq!(table.constant("τ"), Some(consts::TAU));
        assert!(!table.is_constant("Pi"));
        assert!(!table.is_constant("tau"));
    }

    #[test]
    fn median_of_even_count_averages_the_midpoints() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
    }

    #[test]
    fn reducers_follow_their_empty_input_policies() {
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(product(&[]), 1.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(sample_variance(&[]), 0.0);
        assert_eq!(sample_variance(&[7.0]), 0.0);
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(sample_standard_deviation(&[7.0]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(list_max(&[]), 0.0);
        assert_eq!(list_min(&[]), 0.0);
        assert_eq!(range(&[]), 0.0);
        assert_eq!(count(&[]), 0.0);
    }
}

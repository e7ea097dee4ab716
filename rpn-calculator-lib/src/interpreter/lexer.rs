use crate::interpreter::symbol_table::SymbolTable;
use crate::interpreter::token::Token;

/// Splits the given expression into classified tokens.
///
/// This is a total function: whitespace is skipped, and any code point or
/// name that matches no registry entry is dropped without a token and
/// without an error. The converter and evaluator never see unknown input.
///
/// # Arguments
///
/// * `table`: The symbol registries used to classify names and glyphs.
/// * `expression`: A text expression in infix format.
///
/// returns: The tokens, in source order.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::lexer::tokenize;
/// use rpn_calculator::interpreter::symbol_table::SymbolTable;
///
/// let tokens = tokenize(SymbolTable::shared(), "sqrt(16) + 2");
/// assert_eq!(tokens.len(), 6);
/// ```
pub fn tokenize(table: &SymbolTable, expression: &str) -> Vec<Token> {
    let characters: Vec<char> = expression.chars().collect();
    let mut tokens: Vec<Token> = vec![];
    let mut position = 0;

    while position < characters.len() {
        let character = characters[position];

        if character.is_whitespace() {
            position += 1;
            continue;
        }

        if character.is_ascii_digit() || character == '.' {
            tokens.push(lex_number(&characters, &mut position, String::new()));
            continue;
        }

        match character {
            '(' => {
                tokens.push(Token::LeftParen);
                position += 1;
                continue;
            }
            ')' => {
                tokens.push(Token::RightParen);
                position += 1;
                continue;
            }
            ',' => {
                tokens.push(Token::Comma);
                position += 1;
                continue;
            }
            '{' => {
                tokens.push(Token::ListStart);
                position += 1;
                continue;
            }
            '}' => {
                tokens.push(Token::ListEnd);
                position += 1;
                continue;
            }
            _ => {}
        }

        if character == '-' && starts_negative_number(&characters, position, tokens.last()) {
            position += 1;
            tokens.push(lex_number(&characters, &mut position, "-".to_string()));
            continue;
        }

        if matches!(character, '+' | '-' | '*' | '/' | '%' | '^') {
            tokens.push(Token::Operator(character.to_string()));
            position += 1;
            continue;
        }

        if !character.is_ascii() {
            let symbol = character.to_string();
            if table.is_operator(&symbol) {
                tokens.push(Token::Operator(symbol));
            } else if table.is_unary_function(&symbol) {
                tokens.push(Token::UnaryFunction(symbol));
            } else if table.is_constant(&symbol) {
                tokens.push(Token::Constant(symbol));
            }
            // Unknown glyphs produce no token.
            position += 1;
            continue;
        }

        if character.is_ascii_alphabetic() {
            let name = lex_name(&characters, &mut position);
            if table.is_constant(&name) {
                tokens.push(Token::Constant(name));
            } else if table.is_unary_function(&name) {
                tokens.push(Token::UnaryFunction(name));
            } else if table.is_binary_function(&name) {
                tokens.push(Token::BinaryFunction(name));
            } else if table.is_list_function(&name) {
                tokens.push(Token::ListFunction(name));
            }
            // Unknown names produce no token.
            continue;
        }

        // Anything else is dropped.
        position += 1;
    }

    tokens
}

/// Consumes a run of ASCII digits and decimal points. A second decimal
/// point is not rejected here; the evaluator faults on it instead.
fn lex_number(characters: &[char], position: &mut usize, mut text: String) -> Token {
    while let Some(&character) = characters.get(*position) {
        if character.is_ascii_digit() || character == '.' {
            text.push(character);
            *position += 1;
        } else {
            break;
        }
    }
    Token::Number(text)
}

/// Consumes an ASCII letter run continued by letters or digits, so names
/// like `log10` and `atan2` lex as one word.
fn lex_name(characters: &[char], position: &mut usize) -> String {
    let mut name = String::new();
    while let Some(&character) = characters.get(*position) {
        if character.is_ascii_alphanumeric() {
            name.push(character);
            *position += 1;
        } else {
            break;
        }
    }
    name
}

/// A `-` begins a negative literal only in operand position: at the very
/// start, or right after an operator, `(`, `,` or `{`, and only when an
/// ASCII digit or decimal point follows.
fn starts_negative_number(
    characters: &[char],
    position: usize,
    previous: Option<&Token>,
) -> bool {
    let operand_position = matches!(
        previous,
        None | Some(Token::Operator(_))
            | Some(Token::LeftParen)
            | Some(Token::Comma)
            | Some(Token::ListStart)
    );
    let next = characters.get(position + 1);
    operand_position && matches!(next, Some(c) if c.is_ascii_digit() || *c == '.')
}

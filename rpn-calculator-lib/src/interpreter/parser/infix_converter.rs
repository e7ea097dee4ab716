use crate::interpreter::symbol_table::SymbolTable;
use crate::interpreter::token::Token;
use std::collections::VecDeque;

/// Reorders infix tokens into postfix (RPN) order with a single
/// left-to-right pass over an operator stack.
///
/// Functions are deferred on the stack until their closing scope; list
/// literals are the exception, their contents stay in output order and only
/// the brackets are tracked. Unmatched parentheses and brackets are not an
/// error: whatever remains on the stack at end of input drains into the
/// output verbatim.
pub(crate) fn infix_to_postfix(table: &SymbolTable, original_tokens: Vec<Token>) -> Vec<Token> {
    let mut tokens: VecDeque<Token> = VecDeque::from(original_tokens);
    let mut operators: VecDeque<Token> = VecDeque::new();
    let mut output: Vec<Token> = vec![];
    while let Some(token) = tokens.pop_front() {
        match token {
            Token::Number(_) | Token::Constant(_) => output.push(token),
            Token::UnaryFunction(_) | Token::BinaryFunction(_) | Token::ListFunction(_) => {
                operators.push_front(token)
            }
            Token::LeftParen => operators.push_front(token),
            Token::ListStart => {
                // List contents are not deferred, so the start marker goes
                // to the output right away as well as onto the stack for
                // the matching ListEnd to find.
                output.push(Token::ListStart);
                operators.push_front(token);
            }
            Token::Operator(_) => {
                parse_operator_token(table, &mut operators, &mut output, &token);
                operators.push_front(token);
            }
            Token::Comma => parse_comma_token(&mut operators, &mut output),
            Token::RightParen => parse_closing_parenthesis_token(&mut operators, &mut output),
            Token::ListEnd => parse_list_end_token(&mut operators, &mut output),
        };
    }

    transfer_leftover_operators(&mut operators, &mut output);

    output
}

fn transfer_leftover_operators(operators: &mut VecDeque<Token>, output: &mut Vec<Token>) {
    while let Some(operator) = operators.pop_front() {
        output.push(operator);
    }
}

fn parse_operator_token(
    table: &SymbolTable,
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    token: &Token,
) {
    let incoming_precedence = table.precedence_of(token.text());
    loop {
        let pop_top = match operators.front() {
            None | Some(Token::LeftParen) | Some(Token::ListStart) => false,
            Some(top_of_operator_stack) => {
                let top_precedence = table.precedence_of(top_of_operator_stack.text());
                top_of_operator_stack.is_function()
                    || top_precedence > incoming_precedence
                    || (top_precedence == incoming_precedence
                        && !table.is_right_associative(token.text()))
            }
        };
        if !pop_top {
            break;
        }
        if let Some(top_of_operator_stack) = operators.pop_front() {
            output.push(top_of_operator_stack);
        }
    }
}

fn parse_comma_token(operators: &mut VecDeque<Token>, output: &mut Vec<Token>) {
    // Arguments are already in RPN order; only the pending operators since
    // the opening scope need to flush. No arity marker is emitted.
    loop {
        match operators.front() {
            None | Some(Token::LeftParen) | Some(Token::ListStart) => break,
            Some(_) => {}
        }
        if let Some(top_of_operator_stack) = operators.pop_front() {
            output.push(top_of_operator_stack);
        }
    }
}

fn parse_closing_parenthesis_token(operators: &mut VecDeque<Token>, output: &mut Vec<Token>) {
    loop {
        match operators.front() {
            None | Some(Token::LeftParen) => break,
            Some(_) => {}
        }
        if let Some(top_of_operator_stack) = operators.pop_front() {
            output.push(top_of_operator_stack);
        }
    }
    if let Some(Token::LeftParen) = operators.front() {
        // Discard the open parenthesis.
        operators.pop_front();
    }
    // A function name in front of the parentheses belongs to the call that
    // just closed.
    if let Some(Token::UnaryFunction(_) | Token::BinaryFunction(_)) = operators.front() {
        if let Some(function) = operators.pop_front() {
            output.push(function);
        }
    }
}

fn parse_list_end_token(operators: &mut VecDeque<Token>, output: &mut Vec<Token>) {
    loop {
        match operators.front() {
            None | Some(Token::ListStart) => break,
            Some(_) => {}
        }
        if let Some(top_of_operator_stack) = operators.pop_front() {
            output.push(top_of_operator_stack);
        }
    }
    if let Some(Token::ListStart) = operators.front() {
        // Discard the start marker; the output already carries one.
        operators.pop_front();
    }
    output.push(Token::ListEnd);
}

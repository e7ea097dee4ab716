use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression
#[derive(Clone, PartialEq)]
pub enum Token {
    Number(String),
    Operator(String),
    UnaryFunction(String),
    BinaryFunction(String),
    ListFunction(String),
    Constant(String),
    LeftParen,
    RightParen,
    Comma,
    ListStart,
    ListEnd,
}

impl Token {
    /// The literal source text of the token. A negative literal keeps its
    /// leading `-`.
    pub fn text(&self) -> &str {
        match self {
            Token::Number(text)
            | Token::Operator(text)
            | Token::UnaryFunction(text)
            | Token::BinaryFunction(text)
            | Token::ListFunction(text)
            | Token::Constant(text) => text,
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Comma => ",",
            Token::ListStart => "{",
            Token::ListEnd => "}",
        }
    }

    /// A 'function' is a token that is deferred on the operator stack until
    /// its enclosing scope closes.
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            Token::UnaryFunction(_) | Token::BinaryFunction(_) | Token::ListFunction(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

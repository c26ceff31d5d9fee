use crate::executor::ExecError;
use crate::lexer::LexError;
use crate::parser::SyntaxError;

/// Everything that can go wrong while handling one input line.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("{0}")]
    Exec(#[from] ExecError),
}

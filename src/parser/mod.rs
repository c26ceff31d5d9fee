pub mod default;

use crate::ast::{Pipeline, RedirectKind};

pub use default::DefaultParser;

pub trait Parser {
    /// Builds the pipeline for one line. `Ok(None)` means the line held no
    /// command at all (blank input).
    fn parse(&mut self) -> Result<Option<Pipeline>, SyntaxError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("missing command after '|'")]
    MissingCommandAfterPipe,
    #[error("missing file name after '{0}'")]
    MissingFilename(RedirectKind),
    #[error("missing command")]
    MissingCommand,
    #[error("'&' is only allowed at the end of a line")]
    UnexpectedBackground,
    #[error("illegal token '{0}'")]
    IllegalToken(String),
}

mod lexer;
mod token;

pub use lexer::{LexError, Lexer, DEFAULT_MAX_LINE_LENGTH};
pub use token::{Token, TokenKind};

pub fn is_metachar(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b'|' | b'&')
}

// Same set as C's isspace in the "C" locale.
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

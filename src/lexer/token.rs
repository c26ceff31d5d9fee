#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,        // cat, file.txt, -l
    Pipe,        // |
    RedirectIn,  // <
    RedirectOut, // >
    Background,  // &
    EndOfInput,
    Error,       // byte that reached the metachar state without being one
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,       // Original text
    pub span: (usize, usize), // Byte range [start, end)
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

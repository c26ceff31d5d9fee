use tracing::trace;

use super::token::{Token, TokenKind};
use super::{is_metachar, is_space};

pub const DEFAULT_MAX_LINE_LENGTH: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("input line is {len} bytes long, the maximum is {max}")]
    LineTooLong { len: usize, max: usize },
}

/// States of the scanner. Each one knows how to consume its lexeme and
/// which state comes next; `None` means the input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Base,
    Word,
    Metachar,
}

/// Single-pass scanner over one input line.
///
/// `start` marks the first byte of the lexeme not yet emitted and `current`
/// the scan position, so `start <= current <= input.len()` holds except for
/// the instant between reading a byte and putting it back.
pub struct Lexer<'a> {
    input: &'a str,
    start: usize,
    current: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            input,
            start: 0,
            current: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes a whole line. Always ends with an `EndOfInput` token.
    pub fn tokenize(line: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(line);
        lexer.run();
        trace!(line, tokens = lexer.tokens.len(), "tokenized");
        lexer.tokens
    }

    /// Like [`Lexer::tokenize`], but refuses lines longer than `max_len`
    /// bytes instead of scanning a truncated prefix.
    pub fn tokenize_bounded(line: &str, max_len: usize) -> Result<Vec<Token>, LexError> {
        if line.len() > max_len {
            return Err(LexError::LineTooLong {
                len: line.len(),
                max: max_len,
            });
        }
        Ok(Self::tokenize(line))
    }

    fn run(&mut self) {
        let mut state = Some(State::Base);
        while let Some(s) = state {
            state = self.step(s);
        }
    }

    fn step(&mut self, state: State) -> Option<State> {
        match state {
            State::Base => self.lex_base(),
            State::Word => self.lex_word(),
            State::Metachar => self.lex_metachar(),
        }
    }

    fn lex_base(&mut self) -> Option<State> {
        while let Some(b) = self.next() {
            if is_space(b) {
                self.ignore();
            } else if is_metachar(b) {
                self.backup();
                return Some(State::Metachar);
            } else {
                self.backup();
                return Some(State::Word);
            }
        }
        self.emit(TokenKind::EndOfInput);
        None
    }

    fn lex_word(&mut self) -> Option<State> {
        while let Some(b) = self.next() {
            if is_space(b) || is_metachar(b) {
                self.backup();
                break;
            }
        }
        self.emit(TokenKind::Word);
        Some(State::Base)
    }

    fn lex_metachar(&mut self) -> Option<State> {
        let kind = match self.next() {
            Some(b'<') => TokenKind::RedirectIn,
            Some(b'>') => TokenKind::RedirectOut,
            Some(b'|') => TokenKind::Pipe,
            Some(b'&') => TokenKind::Background,
            _ => TokenKind::Error,
        };
        self.emit(kind);
        Some(State::Base)
    }

    fn next(&mut self) -> Option<u8> {
        let b = *self.input.as_bytes().get(self.current)?;
        self.current += 1;
        Some(b)
    }

    // Only ever called right after `next` returned a byte.
    fn backup(&mut self) {
        self.current -= 1;
    }

    fn ignore(&mut self) {
        self.start = self.current;
    }

    fn emit(&mut self, kind: TokenKind) {
        // Lexeme boundaries always sit next to ASCII bytes, so the slice is
        // on char boundaries even for non-ASCII words.
        let lexeme = self.input[self.start..self.current].to_string();
        self.tokens.push(Token {
            kind,
            lexeme,
            span: (self.start, self.current),
        });
        self.start = self.current;
    }
}

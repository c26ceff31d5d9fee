use tracing::debug;

use crate::ast::{CommandNode, ExecMode, Pipeline, RedirectKind};
use crate::lexer::{Token, TokenKind};
use crate::parser::{Parser, SyntaxError};

/// Splits a flat token stream into pipeline stages in one pass over the
/// pipe boundaries.
pub struct DefaultParser<'a> {
    tokens: &'a [Token],
}

impl<'a> DefaultParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    // Drops the end marker and a trailing '&', returning the mode it implies.
    fn strip_terminators(&self) -> (&'a [Token], ExecMode) {
        let mut tokens = self.tokens;
        if let Some((last, rest)) = tokens.split_last() {
            if last.kind == TokenKind::EndOfInput {
                tokens = rest;
            }
        }
        match tokens.split_last() {
            Some((last, rest)) if last.kind == TokenKind::Background => {
                (rest, ExecMode::Background)
            }
            _ => (tokens, ExecMode::Foreground),
        }
    }
}

impl<'a> Parser for DefaultParser<'a> {
    fn parse(&mut self) -> Result<Option<Pipeline>, SyntaxError> {
        if self
            .tokens
            .iter()
            .all(|t| t.kind == TokenKind::EndOfInput)
        {
            return Ok(None);
        }

        let (tokens, mode) = self.strip_terminators();

        for token in tokens {
            match token.kind {
                TokenKind::Background => return Err(SyntaxError::UnexpectedBackground),
                TokenKind::Error | TokenKind::EndOfInput => {
                    return Err(SyntaxError::IllegalToken(token.lexeme.clone()));
                }
                _ => {}
            }
        }

        for (i, token) in tokens.iter().enumerate() {
            if token.kind != TokenKind::Pipe {
                continue;
            }
            match tokens.get(i + 1) {
                None => return Err(SyntaxError::MissingCommandAfterPipe),
                Some(next) if next.kind == TokenKind::Pipe => {
                    return Err(SyntaxError::MissingCommandAfterPipe);
                }
                Some(_) => {}
            }
        }

        let commands = tokens
            .split(|t| t.kind == TokenKind::Pipe)
            .map(parse_command)
            .collect::<Result<Vec<_>, _>>()?;

        if commands.len() == 1 && commands[0].is_empty() {
            return Err(SyntaxError::MissingCommand);
        }

        debug!(stages = commands.len(), ?mode, "parsed pipeline");
        Ok(Some(Pipeline { commands, mode }))
    }
}

fn parse_command(tokens: &[Token]) -> Result<CommandNode, SyntaxError> {
    let mut command = CommandNode::default();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        let kind = match token.kind {
            TokenKind::Word => {
                command.argv.push(token.lexeme.clone());
                continue;
            }
            TokenKind::RedirectIn => RedirectKind::In,
            TokenKind::RedirectOut => RedirectKind::Out,
            _ => return Err(SyntaxError::IllegalToken(token.lexeme.clone())),
        };
        let file = match iter.next() {
            Some(t) if t.is_word() => t.lexeme.clone(),
            _ => return Err(SyntaxError::MissingFilename(kind)),
        };
        match kind {
            RedirectKind::In => command.stdin = Some(file),
            RedirectKind::Out => command.stdout = Some(file),
        }
    }

    Ok(command)
}

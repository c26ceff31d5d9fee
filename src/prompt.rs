use std::io::{self, BufRead, Read, StdinLock, Stdout, Write};

use crate::lexer::LexError;

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The line was consumed and dropped.
    #[error(transparent)]
    TooLong(#[from] LexError),
}

/// Reads input lines and writes the prompt.
pub struct ShellPrompt<R, W> {
    prompt: String,
    show: bool,
    input: R,
    output: W,
}

impl ShellPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio(prompt: &str, show: bool) -> Self {
        ShellPrompt::new(prompt, show, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ShellPrompt<R, W> {
    pub fn new(prompt: &str, show: bool, input: R, output: W) -> Self {
        ShellPrompt {
            prompt: prompt.to_string(),
            show,
            input,
            output,
        }
    }

    pub fn show_prompt(&mut self) -> io::Result<()> {
        if self.show {
            write!(self.output, "{}", self.prompt)?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Returns the next line without its line terminator, or `None` at end
    /// of input. At most `max_len` bytes of content are buffered; a longer
    /// line is skipped up to its newline and reported as too long. Invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn read_line(&mut self, max_len: usize) -> Result<Option<String>, ReadError> {
        let mut buf = Vec::new();
        // Room for the content plus a "\r\n" terminator.
        let limit = max_len.saturating_add(2) as u64;
        let bytes_read = (&mut self.input).take(limit).read_until(b'\n', &mut buf)?;
        if bytes_read == 0 {
            // EOF (e.g., Ctrl-D)
            if self.show {
                writeln!(self.output)?;
            }
            return Ok(None);
        }

        let terminated = buf.ends_with(b"\n");
        if terminated {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        if buf.len() > max_len {
            let skipped = if terminated { 0 } else { self.discard_line()? };
            return Err(ReadError::TooLong(LexError::LineTooLong {
                len: buf.len() + skipped,
                max: max_len,
            }));
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    // Consumes input through the next newline, returning how many bytes
    // came before it.
    fn discard_line(&mut self) -> io::Result<usize> {
        let mut skipped = 0;
        loop {
            let available = self.input.fill_buf()?;
            if available.is_empty() {
                return Ok(skipped);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => {
                    self.input.consume(i + 1);
                    return Ok(skipped + i);
                }
                None => {
                    let n = available.len();
                    self.input.consume(n);
                    skipped += n;
                }
            }
        }
    }
}

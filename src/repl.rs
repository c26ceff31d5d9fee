use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{exit_code, ExecOutcome, Executor, ProcessExecutor};
use crate::lexer::{Lexer, Token};
use crate::parser::{DefaultParser, Parser};
use crate::prompt::{ReadError, ShellPrompt};

pub struct Repl<E: Executor = ProcessExecutor> {
    config: Config,
    executor: E,
}

impl Repl<ProcessExecutor> {
    pub fn new(config: Config) -> Self {
        Repl::with_executor(config, ProcessExecutor::new())
    }
}

impl<E: Executor> Repl<E> {
    pub fn with_executor(config: Config, executor: E) -> Self {
        Repl { config, executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Lexes, parses and runs one line. Blank lines yield `Ok(None)`.
    pub fn process_line(&mut self, line: &str) -> Result<Option<ExecOutcome>, ShellError> {
        let tokens = Lexer::tokenize_bounded(line, self.config.max_line_length)?;
        self.execute(&tokens)
    }

    fn execute(&mut self, tokens: &[Token]) -> Result<Option<ExecOutcome>, ShellError> {
        debug!(?tokens, "lexed line");
        let Some(pipeline) = DefaultParser::new(tokens).parse()? else {
            return Ok(None);
        };
        Ok(Some(self.executor.exec(&pipeline)?))
    }

    /// Reports background processes that exited since the last call.
    pub fn report_finished_jobs(&mut self) {
        for job in self.executor.reap_background() {
            eprintln!("[{}] done {}", job.pid, exit_code(job.status));
        }
    }

    /// Runs until the input is exhausted. Errors on a line are reported and
    /// the loop moves on to the next one.
    pub fn run<R: BufRead, W: Write>(&mut self, prompt: &mut ShellPrompt<R, W>) -> io::Result<()> {
        loop {
            self.report_finished_jobs();
            prompt.show_prompt()?;

            let line = match prompt.read_line(self.config.max_line_length) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(ReadError::Io(e)) => return Err(e),
                Err(ReadError::TooLong(e)) => {
                    eprintln!("pipesh: {}", e);
                    continue;
                }
            };

            // The prompt already bounded the raw line.
            if let Err(e) = self.execute(&Lexer::tokenize(&line)) {
                eprintln!("pipesh: {}", e);
            }
        }
        self.report_finished_jobs();
        Ok(())
    }
}

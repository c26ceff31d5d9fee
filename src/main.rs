use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipesh::config::{Config, ConfigLoader};
use pipesh::prompt::ShellPrompt;
use pipesh::Repl;

#[derive(FromArgs)]
/// A small line-oriented command interpreter with pipes, redirects and
/// background execution.
struct Args {
    /// do not print a prompt before each line
    #[argh(switch, short = 'n')]
    no_prompt: bool,

    /// path to a key=value configuration file
    #[argh(option)]
    config: Option<PathBuf>,

    /// longest accepted input line, in bytes
    #[argh(option)]
    max_line_length: Option<usize>,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with pipeline output (RUST_LOG).
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if args.no_prompt {
        config.show_prompt = false;
    }
    if let Some(max) = args.max_line_length {
        anyhow::ensure!(max > 0, "--max-line-length must be positive");
        config.max_line_length = max;
    }

    let mut prompt = ShellPrompt::stdio(&config.prompt, config.show_prompt);
    Repl::new(config).run(&mut prompt)?;
    Ok(())
}

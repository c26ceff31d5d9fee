mod executor;
mod jobs;
mod path_resolver;
mod process_executor;

pub use executor::{ExecError, ExecOutcome, ExecStatus, Executor};
pub use jobs::{BackgroundJobs, ReapedJob};
pub use path_resolver::PathResolver;
pub use process_executor::{exit_code, ProcessExecutor};

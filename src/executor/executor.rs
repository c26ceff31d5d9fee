use std::io;

use crate::ast::{Pipeline, RedirectKind};
use crate::executor::jobs::ReapedJob;

pub type ExecStatus = Result<ExecOutcome, ExecError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Foreground pipeline whose processes have all been waited on.
    /// `code` is the status of the last stage that was spawned.
    Completed { pids: Vec<u32>, code: Option<i32> },
    /// Pipeline left running; the pids are now owned by the job table.
    Background { pids: Vec<u32> },
}

impl ExecOutcome {
    pub fn spawned(&self) -> usize {
        self.pids().len()
    }

    pub fn pids(&self) -> &[u32] {
        match self {
            ExecOutcome::Completed { pids, .. } | ExecOutcome::Background { pids } => pids,
        }
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExecOutcome::Completed { code, .. } => *code,
            ExecOutcome::Background { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("cannot open '{path}': {source}")]
    Redirect {
        kind: RedirectKind,
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot create pipe: {0}")]
    Pipe(#[from] nix::Error),
    #[error("cannot start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("wait failed: {0}")]
    Wait(#[source] io::Error),
}

pub trait Executor {
    fn exec(&mut self, pipeline: &Pipeline) -> ExecStatus;

    /// Collects background processes that have exited without blocking.
    fn reap_background(&mut self) -> Vec<ReapedJob> {
        Vec::new()
    }
}

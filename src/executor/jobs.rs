use std::process::{Child, ExitStatus};

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReapedJob {
    pub pid: u32,
    pub status: ExitStatus,
}

/// Processes started with a trailing '&'. Nothing waits on them; `reap`
/// collects the ones that have exited so they do not linger as zombies.
#[derive(Debug, Default)]
pub struct BackgroundJobs {
    children: Vec<Child>,
}

impl BackgroundJobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adopt<I: IntoIterator<Item = Child>>(&mut self, children: I) {
        self.children.extend(children);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn pids(&self) -> Vec<u32> {
        self.children.iter().map(Child::id).collect()
    }

    /// Non-blocking reap of every tracked child.
    pub fn reap(&mut self) -> Vec<ReapedJob> {
        let mut reaped = Vec::new();
        self.children.retain_mut(|child| {
            let pid = child.id();
            match child.try_wait() {
                Ok(Some(status)) => {
                    info!(pid, %status, "background process finished");
                    reaped.push(ReapedJob { pid, status });
                    false
                }
                Ok(None) => true,
                Err(e) => {
                    // The kernel no longer knows the pid; keeping it would
                    // fail the same way on every prompt.
                    warn!(pid, error = %e, "dropping background process");
                    false
                }
            }
        });
        reaped
    }
}

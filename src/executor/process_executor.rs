use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::OwnedFd;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::{Child, Command, ExitStatus, Stdio};

use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::unistd::pipe2;
use tracing::{debug, warn};

use crate::ast::{Pipeline, RedirectKind};
use crate::executor::{ExecError, ExecOutcome, ExecStatus, Executor};
use super::jobs::{BackgroundJobs, ReapedJob};
use super::path_resolver::PathResolver;

/// Runs pipelines as real OS processes.
pub struct ProcessExecutor {
    resolver: PathResolver,
    jobs: BackgroundJobs,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for ProcessExecutor {
    fn exec(&mut self, pipeline: &Pipeline) -> ExecStatus {
        let mut children = Vec::with_capacity(pipeline.commands.len());
        let spawned = self.spawn_stages(pipeline, &mut children);
        if let Err(e) = &spawned {
            warn!(error = %e, started = children.len(), "pipeline aborted");
        }

        let pids: Vec<u32> = children.iter().map(Child::id).collect();
        if pipeline.is_background() {
            if let Some(pid) = pids.last() {
                eprintln!("[{}]", pid);
            }
            self.jobs.adopt(children);
            spawned?;
            return Ok(ExecOutcome::Background { pids });
        }

        let code = wait_all(children);
        spawned?;
        Ok(ExecOutcome::Completed { pids, code: code? })
    }

    fn reap_background(&mut self) -> Vec<ReapedJob> {
        self.jobs.reap()
    }
}

impl ProcessExecutor {
    pub fn new() -> Self {
        ProcessExecutor {
            resolver: PathResolver,
            jobs: BackgroundJobs::new(),
        }
    }

    pub fn jobs(&self) -> &BackgroundJobs {
        &self.jobs
    }

    /// Spawns the stages left to right. Every descriptor handed to a child
    /// is owned by its `Stdio` and closed in the parent once the iteration
    /// for that stage ends, so downstream readers see end of stream.
    fn spawn_stages(&self, pipeline: &Pipeline, children: &mut Vec<Child>) -> Result<(), ExecError> {
        let last = pipeline.commands.len().saturating_sub(1);
        let mut upstream: Option<OwnedFd> = None;

        for (i, cmd) in pipeline.commands.iter().enumerate() {
            let pipe_in = upstream.take();
            let pipe_out = if i < last {
                let (read, write) = pipe2(OFlag::O_CLOEXEC)?;
                upstream = Some(read);
                Some(write)
            } else {
                None
            };

            let Some(program) = cmd.name() else {
                debug!(stage = i, "skipping empty stage");
                continue;
            };

            // A redirect replaces the pipe end for its direction.
            let stdin = match cmd.redirect(RedirectKind::In) {
                Some(path) => Stdio::from(open_redirect(RedirectKind::In, path)?),
                None => pipe_in.map_or_else(Stdio::inherit, Stdio::from),
            };
            let stdout = match cmd.redirect(RedirectKind::Out) {
                Some(path) => Stdio::from(open_redirect(RedirectKind::Out, path)?),
                None => pipe_out.map_or_else(Stdio::inherit, Stdio::from),
            };

            let Some(path) = self.resolver.resolve(program) else {
                eprintln!("pipesh: command not found: {}", program);
                continue;
            };

            let mut command = Command::new(&path);
            command.arg0(program).args(cmd.args()).stdin(stdin).stdout(stdout);

            match command.spawn() {
                Ok(child) => {
                    debug!(stage = i, pid = child.id(), program, "spawned");
                    children.push(child);
                }
                Err(source) if is_resource_failure(&source) => {
                    return Err(ExecError::Spawn {
                        program: program.to_string(),
                        source,
                    });
                }
                // Anything else failed at exec time and only costs this stage.
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    eprintln!("pipesh: command not found: {}", program);
                }
                Err(e) => {
                    eprintln!("pipesh: {}: {}", program, e);
                }
            }
        }

        Ok(())
    }
}

fn open_redirect(kind: RedirectKind, path: &str) -> Result<File, ExecError> {
    let file = match kind {
        RedirectKind::In => File::open(path),
        RedirectKind::Out => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o644)
            .open(path),
    };
    file.map_err(|source| ExecError::Redirect {
        kind,
        path: path.to_string(),
        source,
    })
}

// Errors that mean the system could not create another process at all, as
// opposed to the program failing to execute.
fn is_resource_failure(e: &io::Error) -> bool {
    let Some(code) = e.raw_os_error() else {
        return false;
    };
    [Errno::EAGAIN, Errno::ENOMEM, Errno::EMFILE, Errno::ENFILE]
        .iter()
        .any(|&errno| errno as i32 == code)
}

// Waits for every child even if one wait fails, so none is left a zombie.
fn wait_all(children: Vec<Child>) -> Result<Option<i32>, ExecError> {
    let mut code = None;
    let mut failure = None;
    for mut child in children {
        match child.wait() {
            Ok(status) => code = Some(exit_code(status)),
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }
    match failure {
        Some(e) => Err(ExecError::Wait(e)),
        None => Ok(code),
    }
}

pub fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
}

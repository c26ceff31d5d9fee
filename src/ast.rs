use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectKind::In => write!(f, "<"),
            RedirectKind::Out => write!(f, ">"),
        }
    }
}

/// One stage of a pipeline: the argument vector plus the effective
/// redirect targets. An empty `argv` marks a stage that is not spawned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandNode {
    pub argv: Vec<String>,
    pub stdin: Option<String>,
    pub stdout: Option<String>,
}

impl CommandNode {
    pub fn name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    pub fn redirect(&self, kind: RedirectKind) -> Option<&str> {
        match kind {
            RedirectKind::In => self.stdin.as_deref(),
            RedirectKind::Out => self.stdout.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    Foreground,
    Background,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub commands: Vec<CommandNode>,
    pub mode: ExecMode,
}

impl Pipeline {
    pub fn is_background(&self) -> bool {
        self.mode == ExecMode::Background
    }
}

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ProcessExit;

/// Captured result of one git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit: ProcessExit,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit.success()
    }

    /// Everything the process printed, stdout first.
    pub fn combined(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Runs git with a given argument list.
///
/// All implementors must be `Send + Sync` so a gateway can be shared.
pub trait CommandRunner: Send + Sync {
    /// Runs git and captures its output.
    fn output(&self, args: &[String]) -> io::Result<CommandOutput>;

    /// Runs git with stdout/stderr connected to ours.
    fn status(&self, args: &[String]) -> io::Result<ProcessExit>;
}

/// Runs the real `git` binary
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
    repo_dir: Option<PathBuf>,
}

impl SystemGit {
    pub fn new() -> Self {
        SystemGit {
            program: "git".to_string(),
            repo_dir: None,
        }
    }

    /// Run every command inside `dir` instead of the current directory.
    pub fn with_repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    /// Use a different executable, e.g. a wrapper script.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }
        debug!(program = %self.program, ?args, "running git");
        cmd
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemGit {
    fn output(&self, args: &[String]) -> io::Result<CommandOutput> {
        let output = self.command(args).stdin(Stdio::null()).output()?;
        Ok(CommandOutput {
            exit: output.status.into(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn status(&self, args: &[String]) -> io::Result<ProcessExit> {
        let status = self.command(args).status()?;
        Ok(status.into())
    }
}

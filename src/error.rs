use std::fmt;

use thiserror::Error;

/// How an external process ended.
///
/// Renders as `exit status N`, or `terminated by signal` when the process
/// produced no exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn from_code(code: i32) -> Self {
        ProcessExit { code: Some(code) }
    }

    pub fn signaled() -> Self {
        ProcessExit { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessExit {
    fn from(status: std::process::ExitStatus) -> Self {
        ProcessExit {
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// A git invocation exited non-zero.
///
/// Keeps only the first line of the captured output, which is where git
/// puts its `fatal:` / `error:` summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{exit} - {first_line}")]
pub struct CommandError {
    pub exit: ProcessExit,
    pub first_line: String,
}

impl CommandError {
    pub fn new(exit: ProcessExit, output: &str) -> Self {
        let first_line = output.split('\n').next().unwrap_or_default().to_string();
        CommandError { exit, first_line }
    }
}

/// Unified error type for git-sv operations
#[derive(Error, Debug)]
pub enum GitSvError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Tag creation or push failed; the formatted tag name is kept for reporting.
    #[error("{source}")]
    Tag {
        tag: String,
        #[source]
        source: CommandError,
    },

    /// Git could not be started for tag creation or push.
    #[error("I/O error: {source}")]
    TagIo {
        tag: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Exit(ProcessExit),

    #[error("{0}")]
    SymbolicRef(String),

    #[error("Malformed log record: {0}")]
    Record(String),

    #[error("Commit message error: {0}")]
    Message(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-sv
pub type Result<T> = std::result::Result<T, GitSvError>;

impl GitSvError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitSvError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitSvError::Version(msg.into())
    }

    /// Create a commit message error with context
    pub fn message(msg: impl Into<String>) -> Self {
        GitSvError::Message(msg.into())
    }

    /// Tag name carried by a failed `tag` call, if any.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            GitSvError::Tag { tag, .. } | GitSvError::TagIo { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for GitSvError {
    fn from(err: toml::de::Error) -> Self {
        GitSvError::Config(err.to_string())
    }
}

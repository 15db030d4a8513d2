//! Git access through the `git` command line
//!
//! This module drives the external `git` binary and turns its output into
//! typed records for version and changelog decisions.
//!
//! # Overview
//!
//! The primary abstraction is the [Git] trait. The concrete implementation is
//! [GitGateway], which builds each invocation, runs it through a
//! [CommandRunner] and decodes the output:
//!
//! - [RecordSplitter]: cuts `git log` output on the end-of-record marker
//! - [parser]: decodes commit and tag records
//! - [LogRange]: turns a tag/date/hash query into `git log` arguments
//! - [SystemGit]: runs the real binary; [MockRunner] replays scripted output
//!
//! Every operation is one blocking subprocess call. Nothing here serializes
//! overlapping calls against the same working tree; callers that issue them
//! concurrently rely on git's own locking.
//!
//! ```rust,no_run
//! # use git_sv::config::TagConfig;
//! # use git_sv::git::{Git, GitGateway, LogRange, LogRangeType};
//! # use git_sv::message::ConventionalProcessor;
//! # fn example() -> git_sv::Result<()> {
//! let git = GitGateway::new(ConventionalProcessor::default(), TagConfig::default());
//! let last = git.last_tag();
//! let commits = git.log(&LogRange::new(LogRangeType::Tag, last, ""))?;
//! # Ok(())
//! # }
//! ```

pub mod gateway;
pub mod mock;
pub mod parser;
pub mod range;
pub mod runner;
pub mod splitter;

pub use gateway::GitGateway;
pub use mock::MockRunner;
pub use range::{LogRange, LogRangeType};
pub use runner::{CommandOutput, CommandRunner, SystemGit};
pub use splitter::RecordSplitter;

use chrono::{DateTime, FixedOffset};
use semver::Version;

use crate::error::Result;
use crate::message::CommitMessage;

/// Separator between fields of one log record.
pub const LOG_SEPARATOR: &str = "###";

/// Terminator of one log record.
pub const END_LINE: &str = "~~~";

/// Separator between date and name in tag listings.
pub const TAG_SEPARATOR: char = '#';

/// One commit as listed by `git log`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLog {
    /// Author date, `YYYY-MM-DD`
    pub date: String,
    /// Author date as unix seconds; 0 when git printed something unparseable
    pub timestamp: i64,
    pub author_name: String,
    /// Abbreviated commit hash
    pub hash: String,
    pub message: CommitMessage,
}

/// A tag with its creation date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitTag {
    pub name: String,
    /// `None` when git printed a date that could not be parsed
    pub date: Option<DateTime<FixedOffset>>,
}

/// Git operations needed for versioning and changelogs.
///
/// ## Error Handling
///
/// Lookups that feed defaulting logic ([Git::last_tag], [Git::branch]) never
/// fail; they return an empty string instead. Everything else returns
/// [crate::error::Result].
pub trait Git: Send + Sync {
    /// Most recent tag matching the configured filter, by version order then
    /// creation date. Empty when there is none or git fails.
    fn last_tag(&self) -> String;

    /// Commits in `range`, newest first.
    ///
    /// # Returns
    /// * `Ok(Vec<CommitLog>)` - Commits in the order git listed them
    /// * `Err(GitSvError::Command)` - `git log` exited non-zero
    /// * `Err` - Whatever the message processor returned for the first bad record
    fn log(&self, range: &LogRange) -> Result<Vec<CommitLog>>;

    /// Creates a commit from header, body and footer paragraphs. Git's own
    /// output goes straight to the terminal.
    fn commit(&self, header: &str, body: &str, footer: &str) -> Result<()>;

    /// Creates an annotated tag for `version` and pushes it to `origin`.
    ///
    /// # Returns
    /// * `Ok(String)` - The tag name
    /// * `Err(GitSvError::Tag)` - Tagging or pushing failed; the error still carries the name
    /// * `Err(GitSvError::TagIo)` - git could not be started; the name is kept here too
    fn tag(&self, version: &Version) -> Result<String>;

    /// Tags matching the configured filter, oldest first.
    fn tags(&self) -> Result<Vec<GitTag>>;

    /// Current branch name; empty when detached or on any error.
    fn branch(&self) -> String;

    /// Whether HEAD points straight at a commit instead of a branch.
    fn is_detached(&self) -> Result<bool>;
}

use semver::Version;
use tracing::{debug, warn};

use super::parser::{parse_log_output, parse_tags_output};
use super::{CommitLog, Git, GitTag, LogRange, END_LINE, LOG_SEPARATOR};
use crate::config::TagConfig;
use crate::error::{CommandError, GitSvError, Result};
use crate::git::{CommandOutput, CommandRunner, SystemGit};
use crate::message::MessageProcessor;

/// [Git] implemented by running the `git` command line.
///
/// The message processor and tag configuration are fixed at construction.
pub struct GitGateway<P, R = SystemGit> {
    processor: P,
    tag_config: TagConfig,
    runner: R,
}

impl<P: MessageProcessor> GitGateway<P, SystemGit> {
    /// Gateway running `git` in the current directory
    pub fn new(processor: P, tag_config: TagConfig) -> Self {
        Self::with_runner(processor, tag_config, SystemGit::new())
    }
}

impl<P: MessageProcessor, R: CommandRunner> GitGateway<P, R> {
    pub fn with_runner(processor: P, tag_config: TagConfig, runner: R) -> Self {
        GitGateway {
            processor,
            tag_config,
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs git and returns its output, whatever the exit code.
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Ok(self.runner.output(&args)?)
    }

    /// Runs git, turning a non-zero exit into a [CommandError].
    fn run_checked(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(command_error(&output).into())
        }
    }

    /// Runs git and returns trimmed stdout, or `None` on any failure.
    fn run_lenient(&self, args: &[&str]) -> Option<String> {
        match self.run(args) {
            Ok(output) if output.success() => Some(output.stdout_text().trim().to_string()),
            Ok(output) => {
                debug!(?args, error = %command_error(&output), "git lookup failed");
                None
            }
            Err(err) => {
                warn!(?args, %err, "could not run git");
                None
            }
        }
    }
}

fn command_error(output: &CommandOutput) -> CommandError {
    CommandError::new(output.exit, &output.combined())
}

fn log_format() -> String {
    let fields = ["%ad", "%at", "%cN", "%h", "%s", "%b"].join(LOG_SEPARATOR);
    format!("--pretty=format:\"{}{}\"", fields, END_LINE)
}

impl<P: MessageProcessor, R: CommandRunner> Git for GitGateway<P, R> {
    fn last_tag(&self) -> String {
        let ref_pattern = self.tag_config.ref_pattern();
        self.run_lenient(&[
            "for-each-ref",
            ref_pattern.as_str(),
            "--sort",
            "-version:refname",
            "--sort",
            "-creatordate",
            "--format",
            "%(refname:short)",
            "--count",
            "1",
        ])
        .unwrap_or_default()
    }

    fn log(&self, range: &LogRange) -> Result<Vec<CommitLog>> {
        let format = log_format();
        let range_args = range.to_args();
        let mut args = vec!["log", "--date=short", format.as_str()];
        args.extend(range_args.iter().map(String::as_str));

        let output = self.run_checked(&args)?;
        let logs = parse_log_output(&self.processor, &output.stdout)?;
        debug!(count = logs.len(), range = %range.range_type(), "parsed commit log");
        Ok(logs)
    }

    fn commit(&self, header: &str, body: &str, footer: &str) -> Result<()> {
        let args: Vec<String> = [
            "commit", "-m", header, "-m", "", "-m", body, "-m", "", "-m", footer,
        ]
        .iter()
        .map(|a| a.to_string())
        .collect();

        let exit = self.runner.status(&args)?;
        if exit.success() {
            Ok(())
        } else {
            Err(GitSvError::Exit(exit))
        }
    }

    fn tag(&self, version: &Version) -> Result<String> {
        let tag = self
            .tag_config
            .format_tag(version.major, version.minor, version.patch);
        let message = format!(
            "Version {}.{}.{}",
            version.major, version.minor, version.patch
        );

        for args in [
            vec!["tag", "-a", tag.as_str(), "-m", message.as_str()],
            vec!["push", "origin", tag.as_str()],
        ] {
            let output = self.run(&args).map_err(|err| match err {
                GitSvError::Io(source) => GitSvError::TagIo {
                    tag: tag.clone(),
                    source,
                },
                other => other,
            })?;
            if !output.success() {
                return Err(GitSvError::Tag {
                    tag: tag.clone(),
                    source: command_error(&output),
                });
            }
        }

        Ok(tag)
    }

    fn tags(&self) -> Result<Vec<GitTag>> {
        let ref_pattern = self.tag_config.ref_pattern();
        let output = self.run_checked(&[
            "for-each-ref",
            "--sort",
            "creatordate",
            "--format",
            "%(creatordate:iso8601)#%(refname:short)",
            ref_pattern.as_str(),
        ])?;
        Ok(parse_tags_output(&output.stdout_text()))
    }

    fn branch(&self) -> String {
        self.run_lenient(&["symbolic-ref", "--short", "HEAD"])
            .unwrap_or_default()
    }

    fn is_detached(&self) -> Result<bool> {
        // With -q git exits non-zero without printing anything when HEAD is detached.
        let output = self.run(&["symbolic-ref", "-q", "HEAD"])?;
        if output.success() {
            return Ok(false);
        }

        let combined = output.combined();
        if combined.is_empty() {
            Ok(true)
        } else {
            Err(GitSvError::SymbolicRef(combined))
        }
    }
}

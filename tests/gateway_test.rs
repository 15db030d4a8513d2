use std::io;

use git_sv::config::TagConfig;
use git_sv::error::ProcessExit;
use git_sv::git::{CommandOutput, Git, GitGateway, LogRange, LogRangeType, MockRunner};
use git_sv::message::ConventionalProcessor;
use git_sv::GitSvError;
use semver::Version;

fn gateway(runner: MockRunner) -> GitGateway<ConventionalProcessor, MockRunner> {
    GitGateway::with_runner(
        ConventionalProcessor::default(),
        TagConfig::new("v%d.%d.%d", "v*"),
        runner,
    )
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// last_tag
// ============================================================================

#[test]
fn test_last_tag_trims_output() {
    let git = gateway(MockRunner::new().succeed("v1.4.0\n"));
    assert_eq!(git.last_tag(), "v1.4.0");
    assert_eq!(
        git.runner().calls(),
        vec![args(&[
            "for-each-ref",
            "refs/tags/v*",
            "--sort",
            "-version:refname",
            "--sort",
            "-creatordate",
            "--format",
            "%(refname:short)",
            "--count",
            "1",
        ])]
    );
}

#[test]
fn test_last_tag_empty_on_failure() {
    let git = gateway(MockRunner::new().fail(128, "fatal: not a git repository"));
    assert_eq!(git.last_tag(), "");
}

#[test]
fn test_last_tag_empty_when_git_cannot_run() {
    let git = gateway(MockRunner::new());
    assert_eq!(git.last_tag(), "");
}

#[test]
fn test_last_tag_empty_when_no_tags() {
    let git = gateway(MockRunner::new().succeed(""));
    assert_eq!(git.last_tag(), "");
}

// ============================================================================
// log
// ============================================================================

#[test]
fn test_log_parses_records_in_order() {
    let out = "\"2024-01-03###1704240000###Ann###bbb2222###feat(api): add endpoint###Adds /v2.\n\nCloses #7~~~\"\n\
               \"2024-01-02###1704153600###Jane Doe###abc1234###fix: bug###body text~~~\"";
    let git = gateway(MockRunner::new().succeed(out));

    let logs = git
        .log(&LogRange::new(LogRangeType::Tag, "v1.0.0", ""))
        .unwrap();

    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].hash, "bbb2222");
    assert_eq!(logs[0].message.ctype, "feat");
    assert_eq!(logs[0].message.scope.as_deref(), Some("api"));
    assert_eq!(logs[0].message.metadata.get("Closes"), Some(&"7".to_string()));
    assert_eq!(logs[1].date, "2024-01-02");
    assert_eq!(logs[1].timestamp, 1704153600);
    assert_eq!(logs[1].author_name, "Jane Doe");
    assert_eq!(logs[1].message.description, "bug");
    assert_eq!(logs[1].message.body, "body text");

    assert_eq!(
        git.runner().calls(),
        vec![args(&[
            "log",
            "--date=short",
            "--pretty=format:\"%ad###%at###%cN###%h###%s###%b~~~\"",
            "v1.0.0..HEAD",
        ])]
    );
}

#[test]
fn test_log_full_history_has_no_range_args() {
    let git = gateway(MockRunner::new().succeed(""));
    assert!(git.log(&LogRange::all()).unwrap().is_empty());
    assert_eq!(git.runner().calls()[0].len(), 3);
}

#[test]
fn test_log_date_range_makes_end_inclusive() {
    let git = gateway(MockRunner::new().succeed(""));
    git.log(&LogRange::new(LogRangeType::Date, "2024-04-01", "2024-05-01"))
        .unwrap();
    let call = &git.runner().calls()[0];
    assert_eq!(
        &call[3..],
        &args(&["--since", "2024-04-01", "--until", "2024-05-02"])[..]
    );
}

#[test]
fn test_log_command_failure() {
    let git = gateway(
        MockRunner::new().fail(128, "fatal: ambiguous argument 'v9..HEAD'\nUse '--' to separate"),
    );
    let err = git
        .log(&LogRange::new(LogRangeType::Tag, "v9", ""))
        .unwrap_err();
    assert!(matches!(err, GitSvError::Command(_)));
    assert_eq!(
        err.to_string(),
        "exit status 128 - fatal: ambiguous argument 'v9..HEAD'"
    );
}

#[test]
fn test_log_message_error_propagates_unchanged() {
    let out = "d###1###a###h1###feat: ok###~~~d###1###a###h2######~~~";
    let git = gateway(MockRunner::new().succeed(out));
    let err = git.log(&LogRange::all()).unwrap_err();
    assert!(matches!(err, GitSvError::Message(_)));
    assert_eq!(err.to_string(), "Commit message error: empty commit subject");
}

#[test]
fn test_log_bad_timestamp_is_zero() {
    let git = gateway(MockRunner::new().succeed("2024-01-02###x###A###h###fix: a###~~~"));
    let logs = git.log(&LogRange::all()).unwrap();
    assert_eq!(logs[0].timestamp, 0);
}

#[test]
fn test_log_spawn_failure_is_io() {
    let git = gateway(MockRunner::new().respond(Err(io::Error::new(
        io::ErrorKind::NotFound,
        "git not found",
    ))));
    assert!(matches!(
        git.log(&LogRange::all()).unwrap_err(),
        GitSvError::Io(_)
    ));
}

// ============================================================================
// commit
// ============================================================================

#[test]
fn test_commit_passes_paragraphs() {
    let git = gateway(MockRunner::new().succeed(""));
    git.commit("feat: add x", "more detail", "Closes #1").unwrap();
    assert_eq!(
        git.runner().calls(),
        vec![args(&[
            "commit",
            "-m",
            "feat: add x",
            "-m",
            "",
            "-m",
            "more detail",
            "-m",
            "",
            "-m",
            "Closes #1",
        ])]
    );
}

#[test]
fn test_commit_failure_is_raw_exit() {
    let git = gateway(MockRunner::new().fail(1, "nothing to commit"));
    let err = git.commit("h", "b", "f").unwrap_err();
    assert!(matches!(err, GitSvError::Exit(exit) if exit == ProcessExit::from_code(1)));
    assert_eq!(err.to_string(), "exit status 1");
}

// ============================================================================
// tag
// ============================================================================

#[test]
fn test_tag_creates_and_pushes() {
    let git = gateway(MockRunner::new().succeed("").succeed(""));
    let tag = git.tag(&Version::new(1, 2, 3)).unwrap();
    assert_eq!(tag, "v1.2.3");
    assert_eq!(
        git.runner().calls(),
        vec![
            args(&["tag", "-a", "v1.2.3", "-m", "Version 1.2.3"]),
            args(&["push", "origin", "v1.2.3"]),
        ]
    );
}

#[test]
fn test_tag_creation_failure_keeps_name_and_skips_push() {
    let git = gateway(MockRunner::new().fail(128, "fatal: tag 'v1.2.3' already exists\n"));
    let err = git.tag(&Version::new(1, 2, 3)).unwrap_err();
    assert_eq!(err.tag_name(), Some("v1.2.3"));
    assert_eq!(
        err.to_string(),
        "exit status 128 - fatal: tag 'v1.2.3' already exists"
    );
    assert_eq!(git.runner().calls().len(), 1);
}

#[test]
fn test_tag_push_failure_keeps_name() {
    let git = gateway(
        MockRunner::new()
            .succeed("")
            .fail(128, "fatal: 'origin' does not appear to be a git repository"),
    );
    let err = git.tag(&Version::new(2, 0, 0)).unwrap_err();
    assert_eq!(err.tag_name(), Some("v2.0.0"));
    assert!(err.to_string().contains("'origin' does not appear"));
}

#[test]
fn test_tag_spawn_failure_keeps_name() {
    let git = gateway(MockRunner::new());
    let err = git.tag(&Version::new(3, 1, 0)).unwrap_err();
    assert_eq!(err.tag_name(), Some("v3.1.0"));
    assert!(err.to_string().starts_with("I/O error"));
}

#[test]
fn test_tag_push_spawn_failure_keeps_name() {
    let git = gateway(MockRunner::new().succeed(""));
    let err = git.tag(&Version::new(3, 1, 0)).unwrap_err();
    assert_eq!(err.tag_name(), Some("v3.1.0"));
    assert_eq!(git.runner().calls().len(), 2);
}

// ============================================================================
// tags
// ============================================================================

#[test]
fn test_tags_listing() {
    let git = gateway(MockRunner::new().succeed(
        "2024-01-02 10:00:00 +0000#v1.2.3\nbroken#v1.2.4\n2024-02-03 10:00:00 +0000#v1.3.0\n",
    ));
    let tags = git.tags().unwrap();
    let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["v1.2.3", "v1.2.4", "v1.3.0"]);
    assert!(tags[1].date.is_none());
    assert_eq!(
        git.runner().calls()[0],
        args(&[
            "for-each-ref",
            "--sort",
            "creatordate",
            "--format",
            "%(creatordate:iso8601)#%(refname:short)",
            "refs/tags/v*",
        ])
    );
}

#[test]
fn test_tags_failure() {
    let git = gateway(MockRunner::new().fail(128, "fatal: not a git repository"));
    let err = git.tags().unwrap_err();
    assert_eq!(err.to_string(), "exit status 128 - fatal: not a git repository");
}

// ============================================================================
// branch / is_detached
// ============================================================================

#[test]
fn test_branch() {
    let git = gateway(MockRunner::new().succeed("main\n"));
    assert_eq!(git.branch(), "main");
}

#[test]
fn test_branch_empty_when_detached() {
    let git = gateway(MockRunner::new().fail(128, "fatal: ref HEAD is not a symbolic ref"));
    assert_eq!(git.branch(), "");
}

#[test]
fn test_is_detached_on_branch() {
    let git = gateway(MockRunner::new().succeed("refs/heads/main\n"));
    assert!(!git.is_detached().unwrap());
    assert_eq!(git.runner().calls()[0], args(&["symbolic-ref", "-q", "HEAD"]));
}

#[test]
fn test_is_detached_silent_failure_means_detached() {
    let git = gateway(MockRunner::new().fail(1, ""));
    assert!(git.is_detached().unwrap());
}

#[test]
fn test_is_detached_noisy_failure_is_error() {
    let git = gateway(MockRunner::new().fail(128, "fatal: not a git repository"));
    let err = git.is_detached().unwrap_err();
    assert!(matches!(err, GitSvError::SymbolicRef(_)));
    assert!(err.to_string().contains("not a git repository"));
}

#[test]
fn test_is_detached_reads_stdout_too() {
    let git = gateway(MockRunner::new().respond(Ok(CommandOutput {
        exit: ProcessExit::from_code(1),
        stdout: b"warning on stdout".to_vec(),
        stderr: Vec::new(),
    })));
    assert_eq!(
        git.is_detached().unwrap_err().to_string(),
        "warning on stdout"
    );
}

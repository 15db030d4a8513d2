use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use crate::error::ProcessExit;
use crate::git::{CommandOutput, CommandRunner};

/// Scripted runner for testing without a git binary.
///
/// Responses are handed out in the order they were queued; every call is
/// recorded so tests can assert on the exact arguments. Running out of
/// responses is an I/O error, as if git were missing.
pub struct MockRunner {
    responses: Mutex<VecDeque<io::Result<CommandOutput>>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockRunner {
    /// Create a runner with nothing queued
    pub fn new() -> Self {
        MockRunner {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful invocation printing `stdout`
    pub fn succeed(self, stdout: impl Into<String>) -> Self {
        self.respond(Ok(CommandOutput {
            exit: ProcessExit::from_code(0),
            stdout: stdout.into().into_bytes(),
            stderr: Vec::new(),
        }))
    }

    /// Queue a failed invocation printing `stderr`
    pub fn fail(self, code: i32, stderr: impl Into<String>) -> Self {
        self.respond(Ok(CommandOutput {
            exit: ProcessExit::from_code(code),
            stdout: Vec::new(),
            stderr: stderr.into().into_bytes(),
        }))
    }

    /// Queue an arbitrary response
    pub fn respond(self, response: io::Result<CommandOutput>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
        self
    }

    /// Argument lists of every call so far
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next(&self, args: &[String]) -> io::Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(args.to_vec());
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front())
            .unwrap_or_else(|| {
                Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "no scripted response left",
                ))
            })
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn output(&self, args: &[String]) -> io::Result<CommandOutput> {
        self.next(args)
    }

    fn status(&self, args: &[String]) -> io::Result<ProcessExit> {
        self.next(args).map(|output| output.exit)
    }
}

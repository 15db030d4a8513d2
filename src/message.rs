//! Commit message interpretation.
//!
//! The git layer hands each commit's subject and body to a [MessageProcessor];
//! whatever error the processor returns aborts the whole log read.

use std::collections::BTreeMap;

use regex::Regex;

use crate::config::CommitMessageConfig;
use crate::error::{GitSvError, Result};

/// Structured view of a commit message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitMessage {
    pub ctype: String,
    pub scope: Option<String>,
    pub description: String,
    pub body: String,
    pub is_breaking_change: bool,
    /// Trailer-style footers (`Refs: #12`, `Closes #3`), keyed by token.
    pub metadata: BTreeMap<String, String>,
}

/// Turns a raw subject/body pair into a [CommitMessage].
pub trait MessageProcessor: Send + Sync {
    fn parse(&self, subject: &str, body: &str) -> Result<CommitMessage>;
}

/// Conventional-commit processor
///
/// Subjects of the form `type(scope)!: description` are split into their
/// parts; anything else is kept whole as a `chore`.
pub struct ConventionalProcessor {
    config: CommitMessageConfig,
}

const HEADER_PATTERN: &str = r"^([a-z]+)(?:\(([^)]+)\))?(!?):\s*(.*)$";
const FOOTER_PATTERN: &str = r"^([A-Za-z][\w-]*|BREAKING CHANGE)(?::\s+|\s+#)(.*)$";

impl ConventionalProcessor {
    pub fn new(config: CommitMessageConfig) -> Self {
        ConventionalProcessor { config }
    }

    fn breaking_in_body(&self, body: &str) -> bool {
        self.config
            .breaking_change_indicators
            .iter()
            .any(|indicator| body.contains(indicator.as_str()))
    }

    fn footers(&self, body: &str) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        let Ok(footer) = Regex::new(FOOTER_PATTERN) else {
            return metadata;
        };
        for line in body.lines() {
            if let Some(captures) = footer.captures(line.trim()) {
                let key = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
                let value = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
                metadata.insert(key.to_string(), value.trim().to_string());
            }
        }
        metadata
    }
}

impl Default for ConventionalProcessor {
    fn default() -> Self {
        Self::new(CommitMessageConfig::default())
    }
}

impl MessageProcessor for ConventionalProcessor {
    fn parse(&self, subject: &str, body: &str) -> Result<CommitMessage> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(GitSvError::message("empty commit subject"));
        }

        let body = body.trim().to_string();
        let metadata = self.footers(&body);
        let breaking_in_body = self.breaking_in_body(&body);

        if let Some(captures) = Regex::new(HEADER_PATTERN)
            .ok()
            .and_then(|re| re.captures(subject))
        {
            let ctype = captures
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            if self.config.types.contains(&ctype) {
                let scope = captures.get(2).map(|m| m.as_str().to_string());
                let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
                let description = captures
                    .get(4)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();

                return Ok(CommitMessage {
                    ctype,
                    scope,
                    description,
                    body,
                    is_breaking_change: has_exclamation || breaking_in_body,
                    metadata,
                });
            }
        }

        // Default: non-conventional commit
        Ok(CommitMessage {
            ctype: "chore".to_string(),
            scope: None,
            description: subject.to_string(),
            body,
            is_breaking_change: breaking_in_body,
            metadata,
        })
    }
}

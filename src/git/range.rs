use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::GitSvError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How the boundaries of a [LogRange] are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRangeType {
    Tag,
    Date,
    Hash,
}

impl fmt::Display for LogRangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogRangeType::Tag => "tag",
            LogRangeType::Date => "date",
            LogRangeType::Hash => "hash",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LogRangeType {
    type Err = GitSvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tag" => Ok(LogRangeType::Tag),
            "date" => Ok(LogRangeType::Date),
            "hash" => Ok(LogRangeType::Hash),
            other => Err(GitSvError::config(format!("unknown range type '{}'", other))),
        }
    }
}

/// Which slice of history to list.
///
/// Tag and hash ranges are `start..end` ref ranges (start excluded, end
/// included). Date ranges are inclusive on both ends. Empty `start` and
/// `end` together mean the whole history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRange {
    range_type: LogRangeType,
    start: String,
    end: String,
}

impl LogRange {
    pub fn new(range_type: LogRangeType, start: impl Into<String>, end: impl Into<String>) -> Self {
        LogRange {
            range_type,
            start: start.into(),
            end: end.into(),
        }
    }

    /// The whole history.
    pub fn all() -> Self {
        Self::new(LogRangeType::Tag, "", "")
    }

    pub fn range_type(&self) -> LogRangeType {
        self.range_type
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Arguments appended to `git log` to restrict it to this range.
    pub fn to_args(&self) -> Vec<String> {
        if self.start.is_empty() && self.end.is_empty() {
            return Vec::new();
        }

        match self.range_type {
            LogRangeType::Date => vec![
                "--since".to_string(),
                self.start.clone(),
                "--until".to_string(),
                add_day(&self.end),
            ],
            LogRangeType::Tag | LogRangeType::Hash => {
                if self.start.is_empty() {
                    vec![self.end.clone()]
                } else {
                    vec![format!("{}..{}", self.start, or_default(&self.end, "HEAD"))]
                }
            }
        }
    }
}

/// Parses a `YYYY-MM-DD` date, reporting whether it succeeded.
///
/// Only the zero-padded form is accepted: the value must format back to
/// itself, which rules out `2024-5-1`, signs and surrounding whitespace.
pub fn parse_date(value: &str) -> (Option<NaiveDate>, bool) {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) if date.format(DATE_FORMAT).to_string() == value => (Some(date), true),
        _ => (None, false),
    }
}

/// Moves a `YYYY-MM-DD` date one day forward.
///
/// `git log --until` stops before the given day, so the day after makes the
/// requested end date inclusive. Values that are not dates pass through.
pub fn add_day(value: &str) -> String {
    let (date, ok) = parse_date(value);
    match date.and_then(|d| d.succ_opt()) {
        Some(next) if ok => next.format(DATE_FORMAT).to_string(),
        _ => {
            if !value.is_empty() {
                debug!(value, "until boundary is not a date, passing through");
            }
            value.to_string()
        }
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

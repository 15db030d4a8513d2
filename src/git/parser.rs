//! Decoding of `git log` and `git for-each-ref` output.
//!
//! Timestamps and tag dates are parsed leniently: a bad value becomes a
//! zero/empty value and the record is kept. Message errors are not lenient;
//! the first one aborts the batch.

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use super::splitter::{trim_record, RecordSplitter};
use super::{CommitLog, GitTag, END_LINE, LOG_SEPARATOR, TAG_SEPARATOR};
use crate::error::{GitSvError, Result};
use crate::message::MessageProcessor;

const FIELD_COUNT: usize = 6;
const TAG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Parses unix seconds, reporting whether it succeeded.
pub fn parse_timestamp(value: &str) -> (i64, bool) {
    match value.trim().parse::<i64>() {
        Ok(ts) => (ts, true),
        Err(_) => (0, false),
    }
}

/// Parses a `git --date=iso8601` timestamp, reporting whether it succeeded.
pub fn parse_tag_date(value: &str) -> (Option<DateTime<FixedOffset>>, bool) {
    match DateTime::parse_from_str(value.trim(), TAG_DATE_FORMAT) {
        Ok(date) => (Some(date), true),
        Err(_) => (None, false),
    }
}

/// Decodes one trimmed log record.
///
/// The body is the last field and keeps any separators it contains.
pub fn parse_commit_log<P: MessageProcessor + ?Sized>(
    processor: &P,
    record: &str,
) -> Result<CommitLog> {
    let content: Vec<&str> = trim_record(record)
        .splitn(FIELD_COUNT, LOG_SEPARATOR)
        .collect();
    if content.len() != FIELD_COUNT {
        return Err(GitSvError::Record(format!(
            "expected {} fields, got {} in '{}'",
            FIELD_COUNT,
            content.len(),
            record
        )));
    }

    let (timestamp, ok) = parse_timestamp(content[1]);
    if !ok {
        debug!(hash = content[3], raw = content[1], "unparseable commit timestamp, using 0");
    }
    let message = processor.parse(content[4], content[5])?;

    Ok(CommitLog {
        date: content[0].to_string(),
        timestamp,
        author_name: content[2].to_string(),
        hash: content[3].to_string(),
        message,
    })
}

/// Decodes full `git log` output, keeping git's order.
pub fn parse_log_output<P: MessageProcessor + ?Sized>(
    processor: &P,
    output: &[u8],
) -> Result<Vec<CommitLog>> {
    RecordSplitter::new(output, END_LINE.as_bytes())
        .map(|record| parse_commit_log(processor, &record))
        .collect()
}

/// Decodes `date#name` tag lines, keeping git's order.
pub fn parse_tags_output(output: &str) -> Vec<GitTag> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(TAG_SEPARATOR) {
            Some((raw_date, name)) => {
                let (date, ok) = parse_tag_date(raw_date);
                if !ok {
                    debug!(tag = name, raw = raw_date, "unparseable tag date, leaving empty");
                }
                GitTag {
                    name: name.to_string(),
                    date,
                }
            }
            None => GitTag {
                name: line.to_string(),
                date: None,
            },
        })
        .collect()
}

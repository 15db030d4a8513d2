use regex::Regex;
use semver::Version;

use crate::error::{GitSvError, Result};
use crate::message::CommitMessage;

/// Represents the type of semantic version bump to apply.
///
/// Ordered so that the strongest bump wins with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

/// Extracts the version from a tag built with `pattern`.
///
/// The pattern's three `%d` slots are matched as numbers; everything else in
/// the pattern must appear literally in the tag. An empty tag means no
/// release yet and yields `0.0.0`.
///
/// # Example
/// ```
/// # use git_sv::version::parse_tag_version;
/// let v = parse_tag_version("v1.2.3", "v%d.%d.%d").unwrap();
/// assert_eq!(v, semver::Version::new(1, 2, 3));
/// ```
pub fn parse_tag_version(tag: &str, pattern: &str) -> Result<Version> {
    if tag.is_empty() {
        return Ok(Version::new(0, 0, 0));
    }

    let parts: Vec<String> = pattern.split("%d").map(regex::escape).collect();
    if parts.len() != 4 {
        return Err(GitSvError::version(format!(
            "tag pattern '{}' must have exactly three %d slots",
            pattern
        )));
    }
    let re = Regex::new(&format!("^{}$", parts.join(r"(\d+)")))
        .map_err(|e| GitSvError::version(format!("invalid tag pattern '{}': {}", pattern, e)))?;

    let captures = re.captures(tag).ok_or_else(|| {
        GitSvError::version(format!("tag '{}' does not match pattern '{}'", tag, pattern))
    })?;

    let mut numbers = [0u64; 3];
    for (i, slot) in numbers.iter_mut().enumerate() {
        let raw = captures.get(i + 1).map(|m| m.as_str()).unwrap_or_default();
        *slot = raw
            .parse::<u64>()
            .map_err(|_| GitSvError::version(format!("invalid number '{}' in tag '{}'", raw, tag)))?;
    }

    Ok(Version::new(numbers[0], numbers[1], numbers[2]))
}

/// Strongest bump warranted by a set of commit messages, if any.
///
/// Breaking changes bump major, `feat` bumps minor, and `fix`, `perf` and
/// `refactor` bump patch. Other types do not produce a release.
pub fn determine_bump(messages: &[CommitMessage]) -> Option<VersionBump> {
    messages
        .iter()
        .filter_map(|message| {
            if message.is_breaking_change {
                return Some(VersionBump::Major);
            }
            match message.ctype.as_str() {
                "feat" => Some(VersionBump::Minor),
                "fix" | "perf" | "refactor" => Some(VersionBump::Patch),
                _ => None,
            }
        })
        .max()
}

/// Bumps a version according to the specified bump type.
///
/// Pre-1.0 versions treat breaking changes as minor bumps. Pre-release and
/// build metadata are dropped.
pub fn bump_version(version: &Version, bump_type: VersionBump) -> Version {
    match bump_type {
        VersionBump::Major if version.major == 0 => {
            Version::new(0, version.minor + 1, 0)
        }
        VersionBump::Major => Version::new(version.major + 1, 0, 0),
        VersionBump::Minor => Version::new(version.major, version.minor + 1, 0),
        VersionBump::Patch => Version::new(version.major, version.minor, version.patch + 1),
    }
}

/// Next version after `current` given the commits since it, or `None` when
/// nothing warrants a release.
pub fn next_version(current: &Version, messages: &[CommitMessage]) -> Option<Version> {
    determine_bump(messages).map(|bump| bump_version(current, bump))
}

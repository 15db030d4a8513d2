//! Terminal output.
//!
//! `format_*` functions build plain lines and are what the tests look at;
//! `display_*` functions style and print them.

use console::style;

use crate::git::{CommitLog, GitTag};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One commit as `hash date type(scope): description (author)`.
pub fn format_commit(commit: &CommitLog) -> String {
    let message = &commit.message;
    let kind = match &message.scope {
        Some(scope) => format!("{}({})", message.ctype, scope),
        None => message.ctype.clone(),
    };
    let breaking = if message.is_breaking_change { "!" } else { "" };
    format!(
        "{} {} {}{}: {} ({})",
        commit.hash, commit.date, kind, breaking, message.description, commit.author_name
    )
}

/// One tag as `name date`, with `-` for an unknown date.
pub fn format_tag(tag: &GitTag) -> String {
    match &tag.date {
        Some(date) => format!("{} {}", tag.name, date.format("%Y-%m-%d %H:%M:%S %z")),
        None => format!("{} -", tag.name),
    }
}

/// Print commits, newest first as git listed them.
pub fn display_commits(commits: &[CommitLog]) {
    if commits.is_empty() {
        display_status("No commits in range");
        return;
    }
    println!("{}", style(format!("{} commits:", commits.len())).bold());
    for commit in commits {
        println!("  {}", format_commit(commit));
    }
}

/// Print tags, oldest first.
pub fn display_tags(tags: &[GitTag]) {
    if tags.is_empty() {
        display_status("No tags found");
        return;
    }
    for tag in tags {
        println!("{}", format_tag(tag));
    }
}

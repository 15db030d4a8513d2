use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use git_sv::config::{self, Config};
use git_sv::git::{Git, GitGateway, LogRange, LogRangeType, SystemGit};
use git_sv::message::ConventionalProcessor;
use git_sv::{ui, version};

#[derive(Parser)]
#[command(
    name = "git-sv",
    version,
    about = "Semantic versions and commit history from git"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Run git inside this repository directory")]
    repo: Option<String>,

    #[arg(short, long, help = "Log every git invocation")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the most recent release tag
    LastTag,
    /// List release tags, oldest first
    Tags,
    /// List commits in a tag, date or hash range
    Log {
        #[arg(long, default_value = "tag", help = "Range type: tag, date or hash")]
        range: LogRangeType,
        #[arg(long, default_value = "", help = "Range start (excluded for tag/hash)")]
        start: String,
        #[arg(long, default_value = "", help = "Range end (included)")]
        end: String,
    },
    /// Print the current branch
    Branch,
    /// Report whether HEAD is detached
    Detached,
    /// Print the version of the last release tag
    CurrentVersion,
    /// Print the version the commits since the last tag call for
    NextVersion,
    /// Create a commit from header, body and footer paragraphs
    Commit {
        header: String,
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long, default_value = "")]
        footer: String,
    },
    /// Tag the given version and push the tag to origin
    Tag { version: semver::Version },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config: Config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;

    let mut runner = SystemGit::new();
    if let Some(dir) = &args.repo {
        runner = runner.with_repo_dir(dir);
    }
    let processor = ConventionalProcessor::new(config.commit_message.clone());
    let git = GitGateway::with_runner(processor, config.tag.clone(), runner);

    match args.command {
        Command::LastTag => {
            let tag = git.last_tag();
            if tag.is_empty() {
                ui::display_status("No release tag found");
            } else {
                println!("{}", tag);
            }
        }
        Command::Tags => ui::display_tags(&git.tags()?),
        Command::Log { range, start, end } => {
            let commits = git.log(&LogRange::new(range, start, end))?;
            ui::display_commits(&commits);
        }
        Command::Branch => {
            let branch = git.branch();
            if branch.is_empty() {
                ui::display_status("Not on a branch");
            } else {
                println!("{}", branch);
            }
        }
        Command::Detached => println!("{}", git.is_detached()?),
        Command::CurrentVersion => {
            let tag = git.last_tag();
            println!("{}", version::parse_tag_version(&tag, &config.tag.pattern)?);
        }
        Command::NextVersion => {
            let tag = git.last_tag();
            let current = version::parse_tag_version(&tag, &config.tag.pattern)?;
            let commits = git.log(&LogRange::new(LogRangeType::Tag, tag, ""))?;
            let messages: Vec<_> = commits.into_iter().map(|c| c.message).collect();
            match version::next_version(&current, &messages) {
                Some(next) => println!("{}", next),
                None => {
                    ui::display_status("No release-worthy commits since last tag");
                    println!("{}", current);
                }
            }
        }
        Command::Commit {
            header,
            body,
            footer,
        } => git.commit(&header, &body, &footer)?,
        Command::Tag { version } => {
            ui::display_status(&format!("Tagging version {}", version));
            match git.tag(&version) {
                Ok(tag) => ui::display_success(&format!("Created and pushed tag: {}", tag)),
                Err(e) => {
                    let tag = e.tag_name().unwrap_or_default().to_string();
                    return Err(e).with_context(|| format!("Failed to publish tag '{}'", tag));
                }
            }
        }
    }

    Ok(())
}

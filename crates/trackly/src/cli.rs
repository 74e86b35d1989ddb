//! Clap derive structures for the `trackly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use trackly_core::{IssueId, Priority, SortField, Status};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// trackly -- browse and edit issues from the command line
#[derive(Debug, Parser)]
#[command(
    name = "trackly",
    version,
    about = "Browse, filter and edit issues from the command line",
    long_about = "A client for issue tracker JSON APIs.\n\n\
        Lists, filters, sorts and pages through issues, and creates or\n\
        edits them. `trackly browse` runs an interactive session.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "TRACKLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "TRACKLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: `[defaults] output`, else table]
    #[arg(long, short = 'o', env = "TRACKLY_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: `[defaults] color`, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TRACKLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TRACKLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Output format after flag, env var and `[defaults]` resolution.
    pub fn output(&self) -> &OutputFormat {
        self.output.as_ref().unwrap_or(&OutputFormat::Table)
    }

    /// Color mode after flag and `[defaults]` resolution.
    pub fn color(&self) -> &ColorMode {
        self.color.as_ref().unwrap_or(&ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect, create and edit issues
    #[command(alias = "i")]
    Issues(IssuesArgs),

    /// Interactive browsing session
    #[command(alias = "b")]
    Browse(BrowseArgs),

    /// Check that the API is reachable
    Health,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared value parsers ─────────────────────────────────────────────

/// Accept only statuses the client can send.
fn parse_status(raw: &str) -> Result<Status, String> {
    match raw.parse::<Status>() {
        Ok(Status::Unknown) | Err(_) => {
            Err("expected one of: open, in-progress, closed".into())
        }
        Ok(status) => Ok(status),
    }
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    match raw.parse::<Priority>() {
        Ok(Priority::Unknown) | Err(_) => Err("expected one of: low, medium, high".into()),
        Ok(priority) => Ok(priority),
    }
}

fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    raw.parse::<SortField>().map_err(|_| {
        "expected one of: id, title, status, priority, assignee, createdAt, updatedAt".into()
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ISSUES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IssuesArgs {
    #[command(subcommand)]
    pub command: IssuesCommand,
}

#[derive(Debug, Subcommand)]
pub enum IssuesCommand {
    /// List issues with filters, sorting and pagination
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single issue
    Get {
        /// Issue ID (a leading `#` is accepted)
        id: IssueId,
    },

    /// Create a new issue
    Create(CreateArgs),

    /// Edit an existing issue; omitted fields keep their current value
    Edit {
        /// Issue ID (a leading `#` is accepted)
        id: IssueId,

        #[command(flatten)]
        fields: EditFields,
    },
}

/// Filter, sort and paging arguments shared by `list` and `browse`.
#[derive(Debug, Args, Default)]
pub struct ViewArgs {
    /// Free-text search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Filter by status
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by priority
    #[arg(long)]
    pub priority: Option<String>,

    /// Filter by assignee
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Results per page (1-100)
    #[arg(long, short = 'n')]
    pub page_size: Option<u32>,

    /// Sort field (id, title, status, priority, assignee, createdAt, updatedAt)
    #[arg(long, value_parser = parse_sort_field)]
    pub sort: Option<SortField>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Page to show (clamped to the last page)
    #[arg(long, default_value = "1")]
    pub page: u32,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Issue title (required, non-empty)
    #[arg(long, short = 't')]
    pub title: String,

    /// Longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Initial status
    #[arg(long, value_parser = parse_status, default_value = "open")]
    pub status: Status,

    /// Priority
    #[arg(long, value_parser = parse_priority, default_value = "medium")]
    pub priority: Priority,

    /// Assignee
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditFields {
    /// New title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New status
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,

    /// New priority
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    /// New assignee
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,
}

impl EditFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BROWSE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Initial filters and sort
    #[command(flatten)]
    pub view: ViewArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Config key (api_url, ca_cert, insecure, timeout, page_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_parser_rejects_unknown() {
        assert_eq!(parse_status("in-progress"), Ok(Status::InProgress));
        assert!(parse_status("unknown").is_err());
        assert!(parse_priority("urgent").is_err());
        assert_eq!(parse_sort_field("createdAt"), Ok(SortField::CreatedAt));
    }
}

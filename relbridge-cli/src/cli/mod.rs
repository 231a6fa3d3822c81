//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the relbridge tool,
//! including subcommands for releases, issues, and configuration.

mod config;
mod issue;
mod release;
mod tracker;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};
use relbridge_core::ColorMode;

/// Top-level CLI command for the relbridge tool
#[derive(Parser)]
#[command(name = "relbridge")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Drive release versions and issue workflows on the issue tracker")]
#[command(
  long_about = "Relbridge connects release automation to the issue tracker.\n\n\
        It creates and releases versions, lists the issues fixed in a release,\n\
        and moves those issues through the tracker's workflow."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Path to the configuration file (defaults to the user config directory)
  #[arg(long, global = true, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Project selection shared by the release-scoped commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
  /// Project key to operate on
  #[arg(long, short = 'p', value_name = "KEY", conflicts_with = "application")]
  pub project: Option<String>,

  /// Application whose project to operate on
  #[arg(
    long,
    short = 'a',
    value_name = "NAME",
    long_help = "Application whose project to operate on.\n\n\
             The project comes from the [applications] table of the configuration,\n\
             then the legacy `project` setting, then the tracker project whose name\n\
             matches the application."
  )]
  pub application: Option<String>,
}

/// Subcommands for the relbridge tool
#[derive(Subcommand)]
pub enum Commands {
  /// Check that the tracker accepts the configured credentials
  #[command(long_about = "Logs in to the tracker and immediately logs out again.\n\n\
            Use this to verify the connection settings and credentials.")]
  Validate,

  /// List the projects visible to the configured user
  Projects,

  /// Show the project an application maps to by name
  #[command(name = "default-filter")]
  DefaultFilter {
    /// Application name to match against project names
    application: String,
  },

  /// List the issues fixed in a release
  Issues {
    /// Release (version) name
    release: String,

    #[command(flatten)]
    filter: FilterArgs,
  },

  /// Create a release version unless it already exists
  #[command(name = "create-release")]
  CreateRelease {
    /// Release (version) name
    release: String,

    #[command(flatten)]
    filter: FilterArgs,
  },

  /// Mark an existing release version as released
  #[command(name = "deploy-release")]
  DeployRelease {
    /// Release (version) name
    release: String,

    #[command(flatten)]
    filter: FilterArgs,
  },

  /// Close an issue
  Close {
    /// Issue key (e.g., OPS-123)
    issue_key: String,
  },

  /// Close every issue fixed in a release
  #[command(name = "close-all")]
  CloseAll {
    /// Release (version) name
    release: String,

    #[command(flatten)]
    filter: FilterArgs,
  },

  /// Add a comment to an issue
  Comment {
    /// Issue key (e.g., OPS-123)
    issue_key: String,

    /// Comment text
    text: String,
  },

  /// Move an issue to a status
  #[command(long_about = "Moves an issue to the given status through its workflow.\n\n\
            The workflow action is picked by name: the status without its last\n\
            character must appear in the action name, so \"Resolved\" selects\n\
            \"Resolve Issue\". Issues already in the status are left alone.")]
  Status {
    /// Issue key (e.g., OPS-123)
    issue_key: String,

    /// Target status name (e.g., Resolved)
    status: String,
  },

  /// Move every issue of a release from one status to another
  #[command(name = "status-all")]
  StatusAll {
    /// Release (version) name
    release: String,

    /// Only issues currently in this status are moved
    #[arg(long)]
    from: String,

    /// Target status name
    #[arg(long)]
    to: String,

    #[command(flatten)]
    filter: FilterArgs,
  },

  /// Show or change the configuration
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let config_path = cli.config;
  match cli.command {
    Commands::Validate => tracker::handle_validate(config_path),
    Commands::Projects => tracker::handle_projects(config_path),
    Commands::DefaultFilter { application } => tracker::handle_default_filter(config_path, &application),
    Commands::Issues { release, filter } => release::handle_issues(config_path, &release, &filter),
    Commands::CreateRelease { release, filter } => release::handle_create_release(config_path, &release, &filter),
    Commands::DeployRelease { release, filter } => release::handle_deploy_release(config_path, &release, &filter),
    Commands::Close { issue_key } => issue::handle_close(config_path, &issue_key),
    Commands::CloseAll { release, filter } => release::handle_close_all(config_path, &release, &filter),
    Commands::Comment { issue_key, text } => issue::handle_comment(config_path, &issue_key, &text),
    Commands::Status { issue_key, status } => issue::handle_status(config_path, &issue_key, &status),
    Commands::StatusAll {
      release,
      from,
      to,
      filter,
    } => release::handle_status_all(config_path, &release, &filter, &from, &to),
    Commands::Config(args) => config::handle_config_command(config_path, args),
  }
}

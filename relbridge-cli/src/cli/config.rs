//! # Config Command
//!
//! Shows and edits `relbridge.toml`: the tracker connection, the legacy
//! project filter, and the per-application projects.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use relbridge_core::output::format_key;
use relbridge_core::{RelbridgeConfig, ensure_url_scheme, print_header, print_success};

use crate::clients::config_path;

/// Command for configuration management
#[derive(Args)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Show the effective configuration, including environment overrides
  Show,

  /// Change configuration values
  #[command(long_about = "Change values in the configuration file.\n\n\
                     Only the given options are changed. Passwords are not stored here;\n\
                     use ~/.netrc or the RELBRIDGE_PASSWORD environment variable.")]
  #[command(arg_required_else_help = true)]
  Set(SetArgs),
}

/// Values accepted by `config set`
#[derive(Args, Debug, Default)]
pub struct SetArgs {
  /// Tracker base URL (e.g., https://jira.example.com)
  #[arg(long)]
  pub url: Option<String>,

  /// Tracker username
  #[arg(long)]
  pub username: Option<String>,

  /// Remote procedure endpoint, relative to the base URL
  #[arg(long, value_name = "PATH")]
  pub service_path: Option<String>,

  /// Legacy project filter used when an application has no project of its own
  #[arg(long, value_name = "KEY")]
  pub project: Option<String>,

  /// Map an application to a project key (repeatable)
  #[arg(long = "application", value_name = "NAME=KEY", value_parser = parse_mapping)]
  pub applications: Vec<(String, String)>,
}

fn parse_mapping(value: &str) -> Result<(String, String), String> {
  match value.split_once('=') {
    Some((name, key)) if !name.trim().is_empty() && !key.trim().is_empty() => {
      Ok((name.trim().to_string(), key.trim().to_string()))
    }
    _ => Err(format!("expected NAME=KEY, got '{value}'")),
  }
}

/// Handle the config command
pub fn handle_config_command(explicit_path: Option<PathBuf>, args: ConfigArgs) -> Result<()> {
  let path = config_path(explicit_path)?;

  match args.subcommand {
    ConfigSubcommands::Show => {
      let config = RelbridgeConfig::load(&path)?.with_env_overrides();
      show_config(&path, &config);
      Ok(())
    }
    ConfigSubcommands::Set(set) => {
      let mut config = RelbridgeConfig::load(&path)?;
      apply_set(&mut config, set)?;
      config.save(&path)?;
      print_success(&format!("Saved configuration to {}", path.display()));
      Ok(())
    }
  }
}

fn apply_set(config: &mut RelbridgeConfig, set: SetArgs) -> Result<()> {
  if set.url.is_none()
    && set.username.is_none()
    && set.service_path.is_none()
    && set.project.is_none()
    && set.applications.is_empty()
  {
    bail!("Nothing to change");
  }

  if let Some(url) = set.url {
    config.connection.base_url = Some(ensure_url_scheme(&url)?);
  }
  if let Some(username) = set.username {
    config.connection.username = Some(username);
  }
  if let Some(service_path) = set.service_path {
    config.connection.service_path = service_path;
  }
  if let Some(project) = set.project {
    config.project = Some(project.trim().to_string()).filter(|project| !project.is_empty());
  }
  config.applications.extend(set.applications);

  Ok(())
}

#[allow(clippy::print_stdout)]
fn show_config(path: &Path, config: &RelbridgeConfig) {
  let unset = || "(unset)".dimmed().to_string();
  let connection = &config.connection;

  print_header("Configuration");
  println!("  File: {}", path.display());
  println!("  URL: {}", connection.base_url.clone().unwrap_or_else(unset));
  println!("  Username: {}", connection.username.clone().unwrap_or_else(unset));
  println!(
    "  Password: {}",
    if connection.password.is_some() {
      "(set)".to_string()
    } else {
      "(from .netrc)".dimmed().to_string()
    }
  );
  println!("  Service path: {}", connection.service_path);
  println!(
    "  Project: {}",
    config.project.as_deref().map(format_key).unwrap_or_else(unset)
  );

  if !config.applications.is_empty() {
    print_header("Applications");
    for (application, key) in &config.applications {
      println!("  {application} → {}", format_key(key));
    }
  }
}

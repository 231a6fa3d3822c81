//! # Output Formatting
//!
//! Formatted output functions with colors and emojis for user-facing
//! messages in the terminal.

use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  Never,
}

impl ColorMode {
  /// Apply the mode to owo-colors' global override
  pub fn apply(self) {
    match self {
      ColorMode::Always => owo_colors::set_override(true),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Auto => owo_colors::unset_override(),
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
#[allow(clippy::print_stdout)]
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an info message
#[allow(clippy::print_stdout)]
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
#[allow(clippy::print_stdout)]
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format an issue or project key
pub fn format_key(key: &str) -> String {
  key.bright_blue().to_string()
}

/// Format a release name
pub fn format_release(name: &str) -> String {
  name.bright_cyan().bold().to_string()
}

/// Format a workflow status name
pub fn format_status(status: &str) -> String {
  let lowered = status.to_ascii_lowercase();
  if lowered.contains("closed") || lowered.contains("resolved") || lowered.contains("done") {
    status.green().to_string()
  } else if lowered.contains("progress") {
    status.yellow().to_string()
  } else {
    status.to_string()
  }
}

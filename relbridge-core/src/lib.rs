//! # Relbridge Core Library
//!
//! Shared building blocks for the relbridge crates: configuration files and
//! directories, URL normalization, credential lookup, and terminal output
//! helpers. Nothing in here talks to the issue tracker itself.

pub mod config;
pub mod consts;
pub mod creds;
pub mod output;
pub mod url;

pub use config::{ConfigDirs, ConnectionConfig, RelbridgeConfig, get_config_dirs};
pub use output::{ColorMode, print_header, print_info, print_success};
pub use url::{combine_url, ensure_url_scheme, trim_base_url};

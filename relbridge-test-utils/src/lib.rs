//! Test utilities shared across the relbridge workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Temporary home directories with a `.netrc` ([`NetrcGuard`])
//! - Mock tracker endpoints speaking the remote procedure protocol
//!   ([`rpc`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests.

#![allow(dead_code)]

pub mod env;
pub mod netrc;
pub mod rpc;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use netrc::NetrcGuard;
pub use rpc::{SERVICE_PATH, TEST_TOKEN, mount_login, mount_logout, mount_rpc, mount_unexpected, rpc_path};

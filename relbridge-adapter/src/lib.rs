//! # Release Tracker Adapter
//!
//! Connects release automation to an issue tracker. The adapter keeps one
//! lazily acquired session per instance, caches the tracker's status names,
//! reconciles release versions (create when absent, release when unreleased),
//! enumerates the issues fixed in a release, and moves issues through a
//! workflow whose actions are only known at runtime.
//!
//! [`TrackerAdapter`] is the entry point; the component modules are public so
//! hosts can reuse individual pieces such as [`transition::select_action`].

mod adapter;
pub mod catalog;
mod error;
pub mod filter;
pub mod projects;
pub mod query;
pub mod release;
pub mod session;
pub mod transition;

#[cfg(test)]
mod test_support;

pub use adapter::{StatusChange, TrackerAdapter};
pub use error::{AdapterError, Result};
pub use filter::{ApplicationFilter, effective_filter};
pub use projects::Project;
pub use query::Issue;
pub use release::ReleaseOutcome;
pub use session::{Credentials, SessionManager};
pub use transition::WorkflowAction;

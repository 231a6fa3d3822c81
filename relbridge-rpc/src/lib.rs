//! # Issue Tracker Remote Procedure Client
//!
//! Thin client for the tracker's remote procedure endpoint: session login and
//! logout, status and project metadata, versions, issue search, comments, and
//! workflow actions. Every method maps one-to-one onto a remote procedure and
//! returns the raw remote records; interpretation lives in the adapter.

mod client;
mod consts;
mod endpoints;
pub mod models;

// Re-export the client
pub use client::RpcClient;
pub use consts::{UNLIMITED_RESULTS, USER_AGENT};
// Re-export models
pub use models::{RemoteAction, RemoteComment, RemoteFieldValue, RemoteIssue, RemoteProject, RemoteStatus, RemoteVersion};

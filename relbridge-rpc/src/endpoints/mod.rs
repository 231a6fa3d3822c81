//! # Remote Procedure Endpoints
//!
//! Endpoint implementations grouped by resource: session, metadata
//! (statuses and projects), versions, issues, and workflow actions.

pub mod issues;
pub mod metadata;
pub mod session;
pub mod versions;
pub mod workflow;

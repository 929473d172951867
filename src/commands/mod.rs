//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - dashboard: Interactive per-request charts
//! - summary: One-shot grouped report (text or JSON)
//! - config: Configuration display and validation

pub mod config;
pub mod dashboard;
pub mod summary;

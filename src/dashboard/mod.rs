//! Dashboard module for charting request logs in the terminal
//!
//! One panel per request name, each plotting execution time (left scale)
//! and status code (right scale) over a shared date axis.

pub mod chart;
pub mod ui;

// Re-export commonly used types
pub use ui::{DashboardAction, DashboardApp};

//! Log ingestion pipeline
//!
//! Fetches request logs from the HTTP endpoint and groups them by request
//! name into series ready for the dashboard charts.

pub mod fetcher;
pub mod grouping;
pub mod model;
pub mod sample;
pub mod state;

// Re-export commonly used types
pub use fetcher::{DataSource, FetchOutcome, LogFetcher, RetryPolicy};
pub use grouping::{group_by_request_name, GroupedSeries, SeriesGroup};
pub use model::{ChartPoint, LogRecord};
pub use state::FetchState;

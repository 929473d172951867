//! Request-log records as served by the endpoint, and their chart projection

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Label used when a record's timestamp cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// One executed request, received verbatim from the log endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogRecord {
    /// ISO-8601 timestamp of the execution
    pub date: String,
    pub request_name: String,
    /// Duration in milliseconds
    pub execution_time: f64,
    pub status_code: i64,
    #[serde(default)]
    pub description: String,
}

impl LogRecord {
    pub fn new(
        date: impl Into<String>,
        request_name: impl Into<String>,
        execution_time: f64,
        status_code: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            request_name: request_name.into(),
            execution_time,
            status_code,
            description: description.into(),
        }
    }

    /// Parse the timestamp, accepting naive ISO-8601, RFC 3339 and bare dates
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();

        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Project this record onto a chart point
    pub fn to_chart_point(&self, date_format: &str) -> ChartPoint {
        let date = match self.parsed_date() {
            Some(d) => d.format(date_format).to_string(),
            None => {
                tracing::debug!(raw = %self.date, "Unparseable log timestamp");
                INVALID_DATE.to_string()
            }
        };

        ChartPoint {
            date,
            execution_time: self.execution_time,
            status_code: self.status_code,
        }
    }
}

/// Display-ready projection of a [`LogRecord`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Formatted date, time of day dropped
    pub date: String,
    pub execution_time: f64,
    pub status_code: i64,
}

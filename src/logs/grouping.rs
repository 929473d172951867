//! Partition log records by request name into chart-ready series
//!
//! Groups keep first-occurrence order of their request name, and points
//! inside a group keep the order their records were encountered in. Nothing
//! is sorted or deduplicated.

use serde::Serialize;
use std::collections::HashMap;

use crate::logs::model::{ChartPoint, LogRecord};

/// Points for a single request name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesGroup {
    pub request_name: String,
    pub points: Vec<ChartPoint>,
}

impl SeriesGroup {
    fn new(request_name: String) -> Self {
        Self {
            request_name,
            points: Vec::new(),
        }
    }

    /// Distinct date labels in first-seen order; these are the x categories
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for point in &self.points {
            if !seen.contains(&point.date.as_str()) {
                seen.push(point.date.as_str());
            }
        }
        seen
    }

    /// Category index of every point; points sharing a date share an index
    pub fn x_positions(&self) -> Vec<f64> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        self.points
            .iter()
            .map(|point| {
                let next = index.len();
                *index.entry(point.date.as_str()).or_insert(next) as f64
            })
            .collect()
    }

    /// (x, execution time) pairs
    pub fn execution_series(&self) -> Vec<(f64, f64)> {
        self.x_positions()
            .into_iter()
            .zip(self.points.iter().map(|p| p.execution_time))
            .collect()
    }

    /// (x, status code) pairs
    pub fn status_series(&self) -> Vec<(f64, f64)> {
        self.x_positions()
            .into_iter()
            .zip(self.points.iter().map(|p| p.status_code as f64))
            .collect()
    }
}

/// Request name -> ordered chart points, in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSeries {
    groups: Vec<SeriesGroup>,
    index: HashMap<String, usize>,
}

impl GroupedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point under `request_name`, creating the group on first sight
    pub fn push(&mut self, request_name: &str, point: ChartPoint) {
        let slot = match self.index.get(request_name) {
            Some(&slot) => slot,
            None => {
                self.groups.push(SeriesGroup::new(request_name.to_string()));
                let slot = self.groups.len() - 1;
                self.index.insert(request_name.to_string(), slot);
                slot
            }
        };
        self.groups[slot].points.push(point);
    }

    pub fn get(&self, request_name: &str) -> Option<&SeriesGroup> {
        self.index.get(request_name).map(|&slot| &self.groups[slot])
    }

    pub fn groups(&self) -> &[SeriesGroup] {
        &self.groups
    }

    pub fn request_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.request_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Points summed across every group
    pub fn total_points(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

/// Group records by request name in a single pass
pub fn group_by_request_name(records: &[LogRecord], date_format: &str) -> GroupedSeries {
    let mut series = GroupedSeries::new();
    for record in records {
        series.push(&record.request_name, record.to_chart_point(date_format));
    }

    tracing::debug!(
        records = records.len(),
        groups = series.len(),
        "Grouped logs by request name"
    );

    series
}

#[cfg(test)]
mod tests {
    use super::*;

    const FMT: &str = "%-m/%-d/%Y";

    fn record(date: &str, name: &str, time: f64, status: i64) -> LogRecord {
        LogRecord::new(date, name, time, status, "")
    }

    #[test]
    fn test_empty_input_gives_empty_series() {
        let series = group_by_request_name(&[], FMT);
        assert!(series.is_empty());
        assert_eq!(series.total_points(), 0);
    }

    #[test]
    fn test_key_order_is_first_occurrence() {
        let records = vec![
            record("2024-03-01T10:00:00", "B", 1.0, 200),
            record("2024-03-01T10:01:00", "A", 2.0, 200),
            record("2024-03-01T10:02:00", "B", 3.0, 200),
            record("2024-03-01T10:03:00", "C", 4.0, 200),
        ];

        let series = group_by_request_name(&records, FMT);
        let names: Vec<&str> = series.request_names().collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_points_not_sorted_by_date() {
        let records = vec![
            record("2024-03-05T10:00:00", "A", 1.0, 200),
            record("2024-03-01T10:00:00", "A", 2.0, 200),
        ];

        let series = group_by_request_name(&records, FMT);
        let group = series.get("A").unwrap();
        assert_eq!(group.points[0].date, "3/5/2024");
        assert_eq!(group.points[1].date, "3/1/2024");
    }

    #[test]
    fn test_duplicate_dates_share_x_position() {
        let records = vec![
            record("2024-03-01T10:00:00", "A", 150.0, 200),
            record("2024-03-01T10:10:00", "A", 120.0, 500),
            record("2024-03-02T09:00:00", "A", 90.0, 200),
        ];

        let series = group_by_request_name(&records, FMT);
        let group = series.get("A").unwrap();

        assert_eq!(group.points.len(), 3);
        assert_eq!(group.categories(), vec!["3/1/2024", "3/2/2024"]);
        assert_eq!(group.x_positions(), vec![0.0, 0.0, 1.0]);
        assert_eq!(
            group.execution_series(),
            vec![(0.0, 150.0), (0.0, 120.0), (1.0, 90.0)]
        );
        assert_eq!(
            group.status_series(),
            vec![(0.0, 200.0), (0.0, 500.0), (1.0, 200.0)]
        );
    }

    #[test]
    fn test_single_point_group() {
        let series = group_by_request_name(&[record("2024-03-01", "Only", 5.0, 201)], FMT);
        let group = series.get("Only").unwrap();
        assert_eq!(group.points.len(), 1);
        assert_eq!(group.x_positions(), vec![0.0]);
    }

    #[test]
    fn test_get_unknown_group() {
        let series = group_by_request_name(&[record("2024-03-01", "A", 5.0, 200)], FMT);
        assert!(series.get("B").is_none());
    }
}

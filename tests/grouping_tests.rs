/// Integration tests for grouping fetched logs into per-request chart series
use reqlog_dash::logs::{
    group_by_request_name, sample::sample_logs, FetchOutcome, FetchState, LogRecord,
};
use std::collections::HashSet;

const FMT: &str = "%-m/%-d/%Y";

fn record(date: &str, name: &str, time: f64, status: i64) -> LogRecord {
    LogRecord::new(date, name, time, status, "")
}

#[test]
fn test_two_point_scenario() {
    let records = vec![
        record("2024-03-01T10:00:00", "GetBalance", 150.0, 200),
        record("2024-03-01T10:10:00", "GetBalance", 120.0, 500),
    ];

    let series = group_by_request_name(&records, FMT);
    assert_eq!(series.len(), 1);

    let group = series.get("GetBalance").unwrap();
    let times: Vec<f64> = group.points.iter().map(|p| p.execution_time).collect();
    let codes: Vec<i64> = group.points.iter().map(|p| p.status_code).collect();
    assert_eq!(times, vec![150.0, 120.0]);
    assert_eq!(codes, vec![200, 500]);
}

#[test]
fn test_interleaved_names_keep_own_order() {
    let records = vec![
        record("2024-03-01T10:00:00", "GetBalance", 1.0, 200),
        record("2024-03-01T10:01:00", "TransferMoney", 2.0, 200),
        record("2024-03-01T10:02:00", "GetBalance", 3.0, 500),
        record("2024-03-01T10:03:00", "TransferMoney", 4.0, 400),
        record("2024-03-01T10:04:00", "GetBalance", 5.0, 200),
    ];

    let series = group_by_request_name(&records, FMT);
    assert_eq!(series.len(), 2);

    let balance: Vec<f64> = series
        .get("GetBalance")
        .unwrap()
        .points
        .iter()
        .map(|p| p.execution_time)
        .collect();
    let transfer: Vec<f64> = series
        .get("TransferMoney")
        .unwrap()
        .points
        .iter()
        .map(|p| p.execution_time)
        .collect();

    assert_eq!(balance, vec![1.0, 3.0, 5.0]);
    assert_eq!(transfer, vec![2.0, 4.0]);
}

#[test]
fn test_group_count_and_point_total_match_input() {
    let inputs = vec![
        sample_logs(),
        vec![record("2024-03-01", "A", 1.0, 200)],
        (0..50)
            .map(|i| record("2024-03-01T10:00:00", &format!("R{}", i % 7), i as f64, 200))
            .collect(),
    ];

    for records in inputs {
        let series = group_by_request_name(&records, FMT);
        let distinct: HashSet<&str> = records.iter().map(|r| r.request_name.as_str()).collect();

        assert_eq!(series.len(), distinct.len());
        assert_eq!(series.total_points(), records.len());
    }
}

#[test]
fn test_sample_dataset_groups() {
    let series = group_by_request_name(&sample_logs(), FMT);
    let names: Vec<&str> = series.request_names().collect();

    assert_eq!(names, vec!["GetBalance", "TransferMoney", "GetTransactions"]);
    assert_eq!(series.get("GetBalance").unwrap().points.len(), 3);
    assert_eq!(series.get("TransferMoney").unwrap().points.len(), 2);
    assert_eq!(series.get("GetTransactions").unwrap().points.len(), 3);
}

#[test]
fn test_duplicate_timestamps_not_deduplicated() {
    let records = vec![
        record("2024-03-01T10:00:00", "A", 10.0, 200),
        record("2024-03-01T10:00:00", "A", 20.0, 200),
    ];

    let series = group_by_request_name(&records, FMT);
    let group = series.get("A").unwrap();
    assert_eq!(group.points.len(), 2);
    assert_eq!(group.x_positions(), vec![0.0, 0.0]);
    assert_eq!(group.points[0].execution_time, 10.0);
    assert_eq!(group.points[1].execution_time, 20.0);
}

#[test]
fn test_zero_records_reach_no_data_state() {
    let state = FetchState::Success(FetchOutcome::remote(Vec::new()));
    assert!(state.is_empty_success());

    if let FetchState::Success(outcome) = state {
        assert!(group_by_request_name(&outcome.records, FMT).is_empty());
    }
}

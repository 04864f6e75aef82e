//! 统计模型解码与查询测试

use gym_viewer::models::decode;

#[test]
fn test_full_stats_decode() {
    let body = r#"{
        "machine_id": 9,
        "machine_name": "跑步机",
        "total_starts": 12,
        "total_ends": 11,
        "daily_usage": [
            {"date": "2024-01-01", "count": 5},
            {"date": "2024-01-02", "count": 7}
        ]
    }"#;

    let stats = decode::stats(body).unwrap();

    assert_eq!(stats.machine_id, 9);
    assert_eq!(stats.total_starts, 12);
    assert_eq!(stats.daily_usage.len(), 2);
    assert_eq!(stats.daily_usage[1].date, "2024-01-02");
}

#[test]
fn test_minimal_stats_gets_defaults() {
    let stats = decode::stats(r#"{"machine_id": 1}"#).unwrap();

    assert_eq!(stats.machine_name, "");
    assert_eq!(stats.total_starts, 0);
    assert_eq!(stats.total_ends, 0);
    assert!(stats.daily_usage.is_empty());
}

#[test]
fn test_stats_without_machine_id_is_rejected() {
    assert!(decode::stats(r#"{"total_starts": 3}"#).is_err());
}

// is_empty真值表: 任一总数非零或存在按天数据即非空

#[test]
fn test_is_empty_true_only_when_all_zero() {
    let stats = decode::stats(r#"{"machine_id": 1}"#).unwrap();
    assert!(stats.is_empty());
}

#[test]
fn test_nonzero_starts_is_not_empty() {
    let stats = decode::stats(r#"{"machine_id": 1, "total_starts": 1}"#).unwrap();
    assert!(!stats.is_empty());
}

#[test]
fn test_nonzero_ends_is_not_empty() {
    let stats = decode::stats(r#"{"machine_id": 1, "total_ends": 1}"#).unwrap();
    assert!(!stats.is_empty());
}

#[test]
fn test_daily_usage_alone_is_not_empty() {
    let body = r#"{"machine_id": 1, "daily_usage": [{"date": "2024-01-01", "count": 0}]}"#;
    let stats = decode::stats(body).unwrap();
    assert!(!stats.is_empty());
}

#[test]
fn test_busiest_day_picks_maximum() {
    let body = r#"{"machine_id": 1, "daily_usage": [
        {"date": "2024-01-01", "count": 2},
        {"date": "2024-01-02", "count": 8},
        {"date": "2024-01-03", "count": 5}
    ]}"#;
    let stats = decode::stats(body).unwrap();

    let busiest = stats.busiest_day().unwrap();
    assert_eq!(busiest.date, "2024-01-02");
    assert_eq!(busiest.count, 8);
}

#[test]
fn test_busiest_day_tie_keeps_first() {
    let body = r#"{"machine_id": 1, "daily_usage": [
        {"date": "2024-01-01", "count": 3},
        {"date": "2024-01-02", "count": 6},
        {"date": "2024-01-03", "count": 6}
    ]}"#;
    let stats = decode::stats(body).unwrap();

    assert_eq!(stats.busiest_day().unwrap().date, "2024-01-02");
}

#[test]
fn test_busiest_day_empty_is_none() {
    let stats = decode::stats(r#"{"machine_id": 1}"#).unwrap();
    assert!(stats.busiest_day().is_none());
}

//! 事件模型解码测试
//!
//! 重点: 器械ID的双拼写解析规则。

use gym_viewer::models::decode;

#[test]
fn test_full_event_decodes() {
    let body = r#"{
        "id": 10,
        "machine": 3,
        "machine_name": "跑步机",
        "event_type": "start",
        "event_type_display": "开始使用",
        "image": "/media/events/10.jpg",
        "captured_at": "2024-01-01T09:00:00Z",
        "person_count": 2
    }"#;

    let event = decode::event(body).unwrap();

    assert_eq!(event.id, 10);
    assert_eq!(event.machine_id, 3);
    assert_eq!(event.event_type_display, "开始使用");
    assert_eq!(event.image_url, "/media/events/10.jpg");
    assert_eq!(event.person_count, 2);
}

#[test]
fn test_machine_field_wins_when_nonzero() {
    let event = decode::event(r#"{"id": 1, "machine": 7, "machine_id": 9}"#).unwrap();
    assert_eq!(event.machine_id, 7);
}

#[test]
fn test_zero_machine_falls_back_to_machine_id() {
    let event = decode::event(r#"{"id": 1, "machine": 0, "machine_id": 9}"#).unwrap();
    assert_eq!(event.machine_id, 9);
}

#[test]
fn test_missing_machine_falls_back_to_machine_id() {
    let event = decode::event(r#"{"id": 1, "machine_id": 9}"#).unwrap();
    assert_eq!(event.machine_id, 9);
}

#[test]
fn test_both_spellings_missing_yields_zero() {
    let event = decode::event(r#"{"id": 1}"#).unwrap();
    assert_eq!(event.machine_id, 0);
}

#[test]
fn test_minimal_event_gets_defaults() {
    let event = decode::event(r#"{"id": 1}"#).unwrap();

    assert_eq!(event.machine_name, "");
    assert_eq!(event.event_type, "");
    assert_eq!(event.event_type_display, "");
    assert_eq!(event.image_url, "");
    assert_eq!(event.captured_at, "");
    assert_eq!(event.person_count, 0);
}

#[test]
fn test_event_without_id_is_rejected() {
    assert!(decode::event(r#"{"machine": 3}"#).is_err());
}

#[test]
fn test_event_page_decodes() {
    let body = r#"{"results": [{"id": 1, "machine": 2}, {"id": 2, "machine_id": 2}]}"#;
    let events = decode::event_page(body).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].machine_id, 2);
    assert_eq!(events[1].machine_id, 2);
}

#[test]
fn test_event_fields_are_adjustable() {
    // 字段公开可写, 调用方可补全缺失的展示信息
    let mut event = decode::event(r#"{"id": 1, "machine": 2}"#).unwrap();
    event.machine_name = "划船机".to_string();
    assert_eq!(event.machine_name, "划船机");
}

//! 器械模型解码测试

use gym_viewer::models::decode;

#[test]
fn test_full_machine_decodes() {
    let body = r#"{
        "id": 3,
        "name": "跑步机",
        "machine_type": "treadmill",
        "location": "2F",
        "description": "靠窗",
        "thumbnail": "/media/thumbs/3.jpg",
        "is_active": false,
        "event_count": 42,
        "last_event": {"event_type": "start", "captured_at": "2024-01-01T09:00:00Z"}
    }"#;

    let machine = decode::machine(body).unwrap();

    assert_eq!(machine.id, 3);
    assert_eq!(machine.name, "跑步机");
    assert_eq!(machine.thumbnail_url, "/media/thumbs/3.jpg");
    assert!(!machine.is_active);
    assert_eq!(machine.event_count, 42);
    let last = machine.last_event.unwrap();
    assert_eq!(last.event_type, "start");
}

#[test]
fn test_minimal_machine_gets_defaults() {
    // 必填字段只有id, 其余全部取默认值
    let machine = decode::machine(r#"{"id": 1}"#).unwrap();

    assert_eq!(machine.id, 1);
    assert_eq!(machine.name, "");
    assert_eq!(machine.machine_type, "");
    assert_eq!(machine.location, "");
    assert_eq!(machine.thumbnail_url, "");
    assert!(machine.is_active);
    assert_eq!(machine.event_count, 0);
    assert!(machine.last_event.is_none());
}

#[test]
fn test_machine_without_id_is_rejected() {
    assert!(decode::machine(r#"{"name": "无ID"}"#).is_err());
}

#[test]
fn test_paged_envelope_yields_items() {
    let body = r#"{"count": 2, "results": [{"id": 1}, {"id": 2}]}"#;
    let machines = decode::machine_page(body).unwrap();

    assert_eq!(machines.len(), 2);
    assert_eq!(machines[1].id, 2);
}

#[test]
fn test_paged_envelope_rejects_bare_array() {
    assert!(decode::machine_page(r#"[{"id": 1}]"#).is_err());
}

#[test]
fn test_bare_array_decodes() {
    let machines = decode::machine_array(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#).unwrap();
    assert_eq!(machines.len(), 3);
}

#[test]
fn test_bare_array_rejects_paged_envelope() {
    assert!(decode::machine_array(r#"{"results": [{"id": 1}]}"#).is_err());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let machine = decode::machine(r#"{"id": 5, "firmware": "v2", "extra": null}"#).unwrap();
    assert_eq!(machine.id, 5);
}

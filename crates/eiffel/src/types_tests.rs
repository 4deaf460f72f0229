use super::*;

#[test]
fn test_event_kind_serialises_as_eiffel_tag() {
    for kind in EventKind::ALL {
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
    }
}

#[test]
fn test_event_kind_parses_from_eiffel_tag() {
    let kind: EventKind = serde_json::from_str("\"EiffelActivityFinishedEvent\"").unwrap();
    assert_eq!(kind, EventKind::ActivityFinished);
}

#[test]
fn test_event_kind_rejects_unknown_tag() {
    let result = serde_json::from_str::<EventKind>("\"EiffelArtifactCreatedEvent\"");
    assert!(result.is_err());
}

#[test]
fn test_all_kinds_use_schema_version_4() {
    for kind in EventKind::ALL {
        assert_eq!(kind.schema_version(), "4.0.0");
    }
}

#[test]
fn test_timestamp_now_never_decreases() {
    let mut previous = Timestamp::now();
    for _ in 0..1_000 {
        let next = Timestamp::now();
        assert!(next >= previous, "{next:?} < {previous:?}");
        previous = next;
    }
}

#[test]
fn test_timestamp_is_close_to_wall_clock() {
    let before = Utc::now().timestamp_millis();
    let ts = Timestamp::now();
    let after = Utc::now().timestamp_millis();

    // Clamping may push the value up to an earlier reading, never above `after`.
    assert!(ts.as_millis() <= after);
    assert!(ts.as_millis() >= before - 1_000);
}

#[test]
fn test_timestamp_serialises_as_integer() {
    let ts = Timestamp::from_millis(1_700_000_000_123);
    assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000123");
}

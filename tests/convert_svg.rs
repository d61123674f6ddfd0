use solvetrace::{SessionRecord, Style};

fn fixture() -> SessionRecord {
    let s = include_str!("data/mini_solve.json");
    serde_json::from_str(s).unwrap()
}

#[test]
fn json_fixture_validates() {
    let record = fixture();
    record.validate().unwrap();
    assert_eq!(record.events.len(), 15);
}

#[test]
fn convert_replays_full_session() {
    let doc = solvetrace::convert(&fixture(), Style::default()).unwrap();

    assert!(doc.starts_with("<svg version=\"1.1\""));
    assert!(doc.trim_end().ends_with("</svg>"));

    // One blocked square, eight fillable ones.
    assert_eq!(doc.matches("fill=\"black\"").count(), 1);
    assert_eq!(doc.matches("fill=\"white\"").count(), 8);

    // The cleared "R" at (1,1) is visible from 700ms to 800ms only.
    assert!(doc.contains("to=\"visible\" begin=\"700ms\" end=\"800ms\""));

    // Only the successful submit reveals the completion marker.
    assert_eq!(doc.matches("Complete!<set").count(), 1);
    assert!(doc.contains("Complete!<set attributeName=\"visibility\" to=\"visible\" begin=\"1200ms\"/>"));
}

#[test]
fn convert_is_deterministic() {
    let record = fixture();
    let a = solvetrace::convert(&record, Style::default()).unwrap();
    let b = solvetrace::convert(&record, Style::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_clue_label_aborts_with_lookup_error() {
    let mut record = fixture();
    record.events = vec![serde_json::from_str(
        r#"{ "type": "selectClue", "timestamp": 0.0, "clueSection": "Across", "clueLabel": "99" }"#,
    )
    .unwrap()];
    let err = solvetrace::convert(&record, Style::default()).unwrap_err();
    assert!(err.to_string().contains("lookup error"));
}

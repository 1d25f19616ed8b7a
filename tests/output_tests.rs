use chart_studio::aggregator::{build_timeline, summarize};
use chart_studio::output::{read_summary, summary_to_string, write_events_csv, write_timeline_csv};
use chart_studio::parser::{DecodedEvent, EventKind};
use pretty_assertions::assert_eq;

fn events() -> Vec<DecodedEvent> {
    vec![
        DecodedEvent { timestamp: 0, kind: Some(EventKind::Bpm), value: 150, length: 0 },
        DecodedEvent { timestamp: 0, kind: Some(EventKind::Measure), value: 0, length: 0 },
        DecodedEvent { timestamp: 250, kind: Some(EventKind::Key), value: 3, length: 750 },
        DecodedEvent { timestamp: 2000, kind: Some(EventKind::End), value: 0, length: 0 },
    ]
}

#[test]
fn test_events_csv_with_header() {
    let mut out = Vec::new();
    write_events_csv(&events(), &mut out, true).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "timestamp,event_name,value,length");
    assert_eq!(lines[3], "250,key,3,750");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_timeline_csv() {
    let rows = build_timeline(&events()).rows();

    let mut out = Vec::new();
    write_timeline_csv(&rows, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "timestamp,key,keyon,keyoff,measurebeatend,bpm\n0,,,,m,150\n250,,8,,,\n1000,,,8,,\n2000,,,,e,\n"
    );
}

#[test]
fn test_compact_summary_round_trip() {
    let summary = summarize(&events());
    let json = summary_to_string(&summary).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    std::fs::write(&path, &json).unwrap();

    assert_eq!(read_summary(&path).unwrap(), summary);
    assert!(json.contains(r#""timing":"nonstandard","timing_steps":[]"#));
}
